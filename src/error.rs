use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unmatched {bracket} at position {position}: {excerpt}")]
    MalformedProgram {
        bracket: char,
        position: usize,
        excerpt: String,
    },
    #[error("I/O Error: {0}")]
    IoError(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
