use std::io::{self, ErrorKind, Read, Write};

use super::Cell;

/// Value stored by `,` once the input is exhausted.
pub const EOF: Cell = -1;

/// Where `,` reads from.
pub trait Input {
    fn read_cell(&mut self) -> io::Result<Cell>;
}

impl<R: Read> Input for R {
    fn read_cell(&mut self) -> io::Result<Cell> {
        let mut buf = [0];
        loop {
            match self.read(&mut buf) {
                Ok(0) => return Ok(EOF),
                Ok(_) => return Ok(Cell::from(buf[0])),
                Err(err) if err.kind() == ErrorKind::Interrupted => (),
                Err(err) => return Err(err),
            }
        }
    }
}

/// Where `.` writes to.
pub trait Output {
    fn put(&mut self, c: char) -> io::Result<()>;
}

/// How a [`Stream`] turns characters into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Codec {
    /// Anything above U+007F becomes `?`.
    #[default]
    Ascii,
    /// Anything above U+00FF becomes `?`.
    Latin1,
    Utf8,
}

impl Codec {
    pub fn encode(self, c: char, buf: &mut [u8; 4]) -> &[u8] {
        let single = |limit: u32, buf: &mut [u8; 4]| {
            buf[0] = u8::try_from(c as u32)
                .ok()
                .filter(|b| u32::from(*b) <= limit)
                .unwrap_or(b'?');
            1
        };

        let len = match self {
            Codec::Ascii => single(0x7f, buf),
            Codec::Latin1 => single(0xff, buf),
            Codec::Utf8 => c.encode_utf8(buf).len(),
        };
        &buf[..len]
    }
}

/// Writes every character as soon as it is produced.
#[derive(Debug)]
pub struct Stream<W: Write> {
    writer: W,
    codec: Codec,
}

impl<W: Write> Stream<W> {
    pub fn new(writer: W, codec: Codec) -> Self {
        Self { writer, codec }
    }
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Output for Stream<W> {
    fn put(&mut self, c: char) -> io::Result<()> {
        let mut buf = [0; 4];
        self.writer.write_all(self.codec.encode(c, &mut buf))?;
        self.writer.flush()
    }
}

/// Collects the output in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Buffer(String);

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Output for Buffer {
    fn put(&mut self, c: char) -> io::Result<()> {
        self.0.push(c);
        Ok(())
    }
}
