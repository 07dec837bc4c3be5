use log::debug;

use crate::{error::Result, validate::validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    PtrIncrement,
    PtrDecrement,
    Increment,
    Decrement,
    Output,
    Input,
    // 行き先: the matching `]`
    WhileBegin(usize),
    // 行き先: the matching `[`
    WhileEnd(usize),
}

/// A program with every loop jump resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program(Vec<Instruction>);

impl Program {
    /// Characters outside the alphabet are dropped, so they act as no-ops.
    pub fn parse(code: &str) -> Result<Program> {
        validate(code)?;

        let mut instructions = Vec::with_capacity(code.len());
        let mut while_stack = Vec::new();

        for c in code.chars() {
            let i = instructions.len();
            let instruction = match c {
                '>' => Instruction::PtrIncrement,
                '<' => Instruction::PtrDecrement,
                '+' => Instruction::Increment,
                '-' => Instruction::Decrement,
                '.' => Instruction::Output,
                ',' => Instruction::Input,
                '[' => {
                    while_stack.push(i);
                    // 後で埋める
                    Instruction::WhileBegin(i)
                }
                // validate 済みなので必ず対応する `[` がある
                ']' => match while_stack.pop() {
                    Some(begin) => {
                        instructions[begin] = Instruction::WhileBegin(i);
                        Instruction::WhileEnd(begin)
                    }
                    None => Instruction::WhileEnd(i),
                },
                _ => continue,
            };
            instructions.push(instruction);
        }

        debug!(
            "compiled {} instructions, {} loops",
            instructions.len(),
            instructions
                .iter()
                .filter(|ins| matches!(ins, Instruction::WhileEnd(_)))
                .count()
        );

        Ok(Program(instructions))
    }
    pub fn get(&self, index: usize) -> Option<Instruction> {
        self.0.get(index).copied()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::{Instruction, Program};
    use crate::error::Error;

    fn helper(code: &str, expected: &[Instruction]) {
        let program = Program::parse(code).unwrap();

        assert_eq!(program.len(), expected.len());
        for (i, instruction) in expected.iter().enumerate() {
            assert_eq!(program.get(i), Some(*instruction));
        }
    }

    #[test]
    fn test_alphabet() {
        use Instruction::*;

        helper(
            "><+-.,[]",
            &[
                PtrIncrement,
                PtrDecrement,
                Increment,
                Decrement,
                Output,
                Input,
                WhileBegin(7),
                WhileEnd(6),
            ],
        );
    }

    #[test]
    fn test_jump_table() {
        use Instruction::*;

        helper(
            "+[>[-]<]",
            &[
                Increment,
                WhileBegin(7),
                PtrIncrement,
                WhileBegin(5),
                Decrement,
                WhileEnd(3),
                PtrDecrement,
                WhileEnd(1),
            ],
        );
    }

    #[test]
    fn test_ignores_other_characters() {
        use Instruction::*;

        helper("a + b", &[Increment]);
        // 飛び先は読み飛ばした文字を数えない
        helper("x[ y ]z", &[WhileBegin(1), WhileEnd(0)]);
        assert!(Program::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_unbalanced() {
        assert!(matches!(
            Program::parse("["),
            Err(Error::MalformedProgram { bracket: '[', .. })
        ));
        assert!(matches!(
            Program::parse("]"),
            Err(Error::MalformedProgram { bracket: ']', .. })
        ));
    }
}
