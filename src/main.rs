use std::process::ExitCode;

use bfascii::{check, decode_with, encode, interpreter::Codec};
use clap::{error::ErrorKind, Parser, ValueEnum};
use log::{info, Level, LevelFilter};

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
struct Command {
    #[command(subcommand)]
    subcommand: SubCommand,
    /// Overrides the default level of `RUST_LOG`
    #[arg(long)]
    log_level: Option<Level>,
}

#[derive(Debug, clap::Subcommand)]
enum SubCommand {
    /// Print a program that outputs TEXT
    #[command(visible_alias = "e")]
    Encode(Payload),
    /// Run CODE
    #[command(visible_alias = "d")]
    Decode(DecodeArg),
    /// Check CODE for unmatched brackets
    #[command(visible_alias = "c")]
    Check(Payload),
}

#[derive(Debug, clap::Args)]
struct Payload {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    words: Vec<String>,
}
impl Payload {
    fn joined(&self) -> String {
        self.words.join(" ")
    }
}

#[derive(Debug, clap::Args)]
struct DecodeArg {
    #[arg(long, value_enum, default_value_t = CodecArg::Ascii)]
    codec: CodecArg,
    #[command(flatten)]
    payload: Payload,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CodecArg {
    Ascii,
    Latin1,
    Utf8,
}
impl From<CodecArg> for Codec {
    fn from(codec: CodecArg) -> Self {
        match codec {
            CodecArg::Ascii => Codec::Ascii,
            CodecArg::Latin1 => Codec::Latin1,
            CodecArg::Utf8 => Codec::Utf8,
        }
    }
}

macro_rules! time {
    ($e:expr) => {{
        let instant = std::time::Instant::now();
        let e_ret = $e;
        let dur = instant.elapsed();
        log::info!("line:{} {} {}ms", line!(), stringify!($e), dur.as_millis());
        e_ret
    }};
}

fn usage() {
    let name = std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_BIN_NAME").to_string());

    println!("Brainfuck Interpreter");
    println!("Usage:");
    println!("\t{name} [e]ncode [ASCII]");
    println!("\t{name} [d]ecode [BRAINFUCK]");
    println!("\t{name} [c]heck [BRAINFUCK]");
}

const SUBCOMMANDS: [&str; 6] = ["encode", "e", "decode", "d", "check", "c"];

/// clap swallows the first `--` after a subcommand. Payload words may
/// start with `--`, so that one is doubled to survive parsing.
fn keep_leading_separator(mut args: Vec<String>) -> Vec<String> {
    let Some(subcommand) = args
        .iter()
        .skip(1)
        .position(|arg| SUBCOMMANDS.contains(&arg.as_str()))
    else {
        return args;
    };

    let mut i = subcommand + 2;
    while let Some(arg) = args.get(i) {
        match arg.as_str() {
            "--codec" => i += 2,
            arg if arg.starts_with("--codec=") => i += 1,
            _ => break,
        }
    }
    if args.get(i).map(String::as_str) == Some("--") {
        args.insert(i, "--".to_string());
    }

    args
}

fn shows_usage(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::MissingSubcommand
            | ErrorKind::InvalidSubcommand
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

fn main() -> anyhow::Result<ExitCode> {
    let args = keep_leading_separator(std::env::args().collect());
    let arg = match Command::try_parse_from(args) {
        Ok(arg) => arg,
        Err(err) if shows_usage(err.kind()) => {
            usage();
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => err.exit(),
    };

    let mut logger = env_logger::builder();
    logger.filter_level(LevelFilter::Warn).parse_default_env();
    if let Some(level) = arg.log_level {
        logger.filter_level(level.to_level_filter());
    }
    logger.init();

    match arg.subcommand {
        SubCommand::Encode(payload) => {
            let code = time!(encode(&payload.joined()));
            info!("{} instructions", code.len());
            print!("{code}");
        }
        SubCommand::Decode(arg) => {
            time!(decode_with(&arg.payload.joined(), arg.codec.into())?);
        }
        SubCommand::Check(payload) => {
            let report = check(&payload.joined());
            println!("{}", serde_json::to_string(&report)?);
            if !report.valid {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod test {
    use clap::{error::ErrorKind, Parser};
    use log::Level;

    use super::{keep_leading_separator, shows_usage, CodecArg, Command, SubCommand};

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        let args = args.iter().map(|arg| arg.to_string()).collect();
        Command::try_parse_from(keep_leading_separator(args))
    }

    fn payload(args: &[&str]) -> String {
        match parse(args).unwrap().subcommand {
            SubCommand::Encode(payload) | SubCommand::Check(payload) => payload.joined(),
            SubCommand::Decode(arg) => arg.payload.joined(),
        }
    }

    #[test]
    fn test_payload_is_joined() {
        assert_eq!(payload(&["bfa", "e", "Hello,", "World!"]), "Hello, World!");
        assert_eq!(payload(&["bfa", "encode", "-x", "--y"]), "-x --y");
        assert_eq!(payload(&["bfa", "d", "+++", "--", "."]), "+++ -- .");
        assert_eq!(payload(&["bfa", "c"]), "");
    }

    #[test]
    fn test_leading_double_dash_is_payload() {
        assert_eq!(payload(&["bfa", "e", "--", "x"]), "-- x");
        assert_eq!(payload(&["bfa", "d", "--"]), "--");
        assert_eq!(payload(&["bfa", "d", "--codec", "utf8", "--", "."]), "-- .");
        assert_eq!(payload(&["bfa", "d", "--codec=latin1", "--"]), "--");
        assert_eq!(
            payload(&["bfa", "--log-level", "debug", "c", "--", "[]"]),
            "-- []"
        );
    }

    #[test]
    fn test_options() {
        let args = ["bfa", "--log-level", "debug", "d", "--codec", "utf8", "."];
        let command = parse(&args).unwrap();
        assert_eq!(command.log_level, Some(Level::Debug));
        assert!(matches!(
            command.subcommand,
            SubCommand::Decode(arg) if matches!(arg.codec, CodecArg::Utf8)
        ));

        let command = parse(&["bfa", "e", "hi"]).unwrap();
        assert_eq!(command.log_level, None);
    }

    #[test]
    fn test_usage_only_for_subcommand_errors() {
        fn kind(args: &[&str]) -> ErrorKind {
            parse(args).unwrap_err().kind()
        }

        assert!(shows_usage(kind(&["bfa"])));
        assert!(shows_usage(kind(&["bfa", "x", "hi"])));

        let bad_codec = kind(&["bfa", "d", "--codec", "bogus", "."]);
        assert_eq!(bad_codec, ErrorKind::InvalidValue);
        assert!(!shows_usage(bad_codec));

        let bad_level = kind(&["bfa", "--log-level", "bfascii=debug", "e", "hi"]);
        assert_eq!(bad_level, ErrorKind::ValueValidation);
        assert!(!shows_usage(bad_level));
    }
}
