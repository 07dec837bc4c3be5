use std::{io, num::NonZeroUsize};

use log::{debug, trace, warn};

use crate::{
    error::Result,
    instruction::{Instruction, Program},
};

pub use channel::{Buffer, Codec, Input, Output, Stream, EOF};
pub use tape::{Cell, Tape, DEFAULT_TAPE_LEN};

mod channel;
mod tape;

fn cell_to_char(value: Cell) -> char {
    u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Runs one program once. Build a new interpreter for every run.
pub struct Interpreter<I: Input, O: Output> {
    program: Program,
    tape: Tape,
    input: I,
    output: O,
    now: usize,
}
impl Interpreter<io::Empty, Buffer> {
    pub fn builder(code: &str) -> InterpreterBuilder<'_, io::Empty, Buffer> {
        InterpreterBuilder {
            code,
            tape_len: None,
            input: io::empty(),
            output: Buffer::new(),
        }
    }
}
impl<I: Input, O: Output> Interpreter<I, O> {
    pub fn tape(&self) -> &Tape {
        &self.tape
    }
    pub fn pointer(&self) -> usize {
        self.tape.pointer()
    }
    pub fn now(&self) -> usize {
        self.now
    }
    pub fn output(&self) -> &O {
        &self.output
    }
    pub fn into_output(self) -> O {
        self.output
    }
    pub fn is_finished(&self) -> bool {
        self.now >= self.program.len()
    }
    /// Executes the instruction under the cursor. Does nothing once finished.
    #[inline]
    pub fn step(&mut self) -> Result<()> {
        let Some(instruction) = self.program.get(self.now) else {
            return Ok(());
        };

        match instruction {
            Instruction::PtrIncrement => self.tape.right(),
            Instruction::PtrDecrement => self.tape.left(),
            Instruction::Increment => {
                let cell = self.tape.get_mut();
                *cell = cell.wrapping_add(1);
            }
            Instruction::Decrement => {
                let cell = self.tape.get_mut();
                *cell = cell.wrapping_sub(1);
            }
            Instruction::Output => self.output.put(cell_to_char(self.tape.get()))?,
            Instruction::Input => {
                let value = self.input.read_cell()?;
                if value == Cell::from(b'\r') {
                    warn!("read \\r from input");
                }
                *self.tape.get_mut() = value;
            }
            Instruction::WhileBegin(end) if self.tape.get() == 0 => {
                trace!("skip loop {} -> {}", self.now, end);
                self.now = end + 1;
                return Ok(());
            }
            Instruction::WhileBegin(_) => (),
            // `[` が再評価されてループを抜けるか決める
            Instruction::WhileEnd(begin) => {
                self.now = begin;
                return Ok(());
            }
        }
        self.now += 1;

        Ok(())
    }
    /// Runs until the cursor passes the last instruction and returns the
    /// number of steps taken.
    pub fn run(&mut self) -> Result<usize> {
        let mut step_count = 0;
        while !self.is_finished() {
            self.step()?;
            step_count += 1;
        }
        debug!("finished after {step_count} steps");

        Ok(step_count)
    }
}

impl<I: Input> Interpreter<I, Buffer> {
    /// Runs the program and returns everything it printed.
    pub fn run_to_string(mut self) -> Result<String> {
        self.run()?;
        Ok(self.output.into_string())
    }
}

pub struct InterpreterBuilder<'a, I: Input, O: Output> {
    code: &'a str,
    tape_len: Option<NonZeroUsize>,
    input: I,
    output: O,
}
impl<'a, I: Input, O: Output> InterpreterBuilder<'a, I, O> {
    pub fn tape_len(self, tape_len: NonZeroUsize) -> Self {
        Self {
            tape_len: Some(tape_len),
            ..self
        }
    }
    pub fn input<R: Input>(self, input: R) -> InterpreterBuilder<'a, R, O> {
        let Self {
            code,
            tape_len,
            output,
            ..
        } = self;

        InterpreterBuilder {
            code,
            tape_len,
            input,
            output,
        }
    }
    pub fn output<W: Output>(self, output: W) -> InterpreterBuilder<'a, I, W> {
        let Self {
            code,
            tape_len,
            input,
            ..
        } = self;

        InterpreterBuilder {
            code,
            tape_len,
            input,
            output,
        }
    }
    /// Fails if the code has an unmatched bracket. Nothing runs in that case.
    pub fn build(self) -> Result<Interpreter<I, O>> {
        let Self {
            code,
            tape_len,
            input,
            output,
        } = self;

        let program = Program::parse(code)?;

        let tape = match tape_len {
            Some(len) => Tape::new(len),
            None => Tape::default(),
        };

        Ok(Interpreter {
            program,
            tape,
            input,
            output,
            now: 0,
        })
    }
}
