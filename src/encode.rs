/// Deltas below this are written as a plain run of `+` or `-`.
const LOOP_THRESHOLD: u64 = 10;

fn push_run(code: &mut String, c: char, n: u64) {
    code.extend((0..n).map(|_| c));
}

/// Builds a program that prints `text` one character at a time.
///
/// Only the current cell and the one to its right are touched. Large deltas
/// use the right cell as a loop counter: `root` iterations of `root` steps,
/// followed by a correction run for `diff - root²`.
pub fn encode(text: &str) -> String {
    let mut code = String::new();
    let mut current = 0i64;

    for c in text.chars() {
        let target = c as i64;
        let diff = (target - current).unsigned_abs();
        let (sign, opposite) = if target > current {
            ('+', '-')
        } else {
            ('-', '+')
        };

        match diff {
            0 => (),
            n if n < LOOP_THRESHOLD => push_run(&mut code, sign, n),
            n => {
                let root = (n as f64).sqrt().round() as u64;
                let rest = n as i64 - (root * root) as i64;

                code.push('>');
                push_run(&mut code, '+', root);
                code.push_str("[<");
                push_run(&mut code, sign, root);
                code.push_str(">-]<");

                if rest > 0 {
                    push_run(&mut code, sign, rest.unsigned_abs());
                } else {
                    push_run(&mut code, opposite, rest.unsigned_abs());
                }
            }
        }
        code.push('.');

        current = target;
    }

    code
}
