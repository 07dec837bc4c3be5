use serde::Serialize;

use crate::error::{Error, Result};

const EXCERPT_BEFORE: usize = 5;
const EXCERPT_LEN: usize = 11;

/// Checks that every `[` has a matching `]`.
///
/// The scan stops at the first `]` that has no opening partner. On failure
/// the most recent bracket of the offending kind is reported together with
/// a short excerpt of the code around it.
pub fn validate(code: &str) -> Result<()> {
    let chars = code.chars().collect::<Vec<_>>();

    let mut depth = 0isize;
    let mut last_open = 0;
    let mut last_close = 0;

    for (i, c) in chars.iter().enumerate() {
        match c {
            '[' => {
                last_open = i;
                depth += 1;
            }
            ']' => {
                last_close = i;
                depth -= 1;
            }
            _ => (),
        }

        if depth < 0 {
            break;
        }
    }

    if depth == 0 {
        return Ok(());
    }

    let (bracket, position) = if depth > 0 {
        ('[', last_open)
    } else {
        (']', last_close)
    };
    let start = position.saturating_sub(EXCERPT_BEFORE);
    let excerpt = chars[start..].iter().take(EXCERPT_LEN).collect();

    Err(Error::MalformedProgram {
        bracket,
        position,
        excerpt,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub reason: Option<String>,
}

pub fn check(code: &str) -> Validation {
    match validate(code) {
        Ok(()) => Validation {
            valid: true,
            reason: None,
        },
        Err(err) => Validation {
            valid: false,
            reason: Some(err.to_string()),
        },
    }
}
