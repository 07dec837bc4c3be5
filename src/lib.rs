pub mod encode;
pub mod error;
pub mod instruction;
pub mod interpreter;
pub mod validate;

use std::io::{self, Read};

pub use encode::encode;
pub use error::{Error, Result};
pub use interpreter::Interpreter;
pub use validate::{check, validate, Validation};

use interpreter::{Codec, Stream};

/// Runs `code` against stdin and writes its output to stdout as ASCII.
pub fn decode(code: &str) -> Result<()> {
    decode_with(code, Codec::Ascii)
}

pub fn decode_with(code: &str, codec: Codec) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    Interpreter::builder(code)
        .input(stdin.lock())
        .output(Stream::new(stdout.lock(), codec))
        .build()?
        .run()?;

    Ok(())
}

/// Runs `code` and returns its output instead of printing it.
pub fn decode_to_string<R: Read>(code: &str, input: R) -> Result<String> {
    Interpreter::builder(code).input(input).build()?.run_to_string()
}
