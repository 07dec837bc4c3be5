use std::num::NonZeroUsize;

use log::trace;

/// Cells are not reduced modulo 256; they only wrap at the `i64` bounds.
pub type Cell = i64;

pub const DEFAULT_TAPE_LEN: usize = 30000;

/// A fixed-length ring of cells. Moving off either end wraps to the other.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<Cell>,
    pointer: usize,
}

impl Tape {
    pub fn new(len: NonZeroUsize) -> Self {
        Self {
            cells: vec![0; len.get()],
            pointer: 0,
        }
    }
    #[inline]
    pub fn right(&mut self) {
        if self.pointer == self.cells.len() - 1 {
            trace!("pointer wrapped {} -> 0", self.pointer);
            self.pointer = 0;
        } else {
            self.pointer += 1;
        }
    }
    #[inline]
    pub fn left(&mut self) {
        if self.pointer == 0 {
            self.pointer = self.cells.len() - 1;
            trace!("pointer wrapped 0 -> {}", self.pointer);
        } else {
            self.pointer -= 1;
        }
    }
    #[inline]
    pub fn get(&self) -> Cell {
        self.cells[self.pointer]
    }
    #[inline]
    pub fn get_mut(&mut self) -> &mut Cell {
        &mut self.cells[self.pointer]
    }
    pub fn pointer(&self) -> usize {
        self.pointer
    }
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self {
            cells: vec![0; DEFAULT_TAPE_LEN],
            pointer: 0,
        }
    }
}

#[cfg(test)]
mod test {
    use std::num::NonZeroUsize;

    use super::{Tape, DEFAULT_TAPE_LEN};

    #[test]
    fn test_wraparound() {
        let mut tape = Tape::default();
        assert_eq!(tape.cells().len(), DEFAULT_TAPE_LEN);

        tape.left();
        assert_eq!(tape.pointer(), 29999);

        tape.right();
        assert_eq!(tape.pointer(), 0);
    }

    #[test]
    fn test_single_cell() {
        let mut tape = Tape::new(NonZeroUsize::new(1).unwrap());

        tape.right();
        assert_eq!(tape.pointer(), 0);
        tape.left();
        assert_eq!(tape.pointer(), 0);
    }

    #[test]
    fn test_cells_are_unbounded() {
        let mut tape = Tape::new(NonZeroUsize::new(3).unwrap());

        *tape.get_mut() = 300;
        tape.right();
        *tape.get_mut() = -5;

        assert_eq!(tape.cells(), &[300, -5, 0]);
        assert_eq!(tape.get(), -5);
    }
}
