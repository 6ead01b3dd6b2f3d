//! This module defines the core data structures and types used throughout the quintuple
//! Turing Machine, including program representation, instructions, execution results, and
//! error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Rule;

/// The value of every cell the machine has not written yet.
pub const BLANK_SYMBOL: char = ' ';
/// Match-position symbol that matches whatever is under the head.
pub const WILDCARD_SYMBOL: char = '?';
/// Write-position symbol that leaves the cell under the head unchanged.
pub const KEEP_SYMBOL: char = '*';
/// Symbol programs write over consumed input. Rendered like blank at the tape ends.
pub const ERASED_SYMBOL: char = '_';
/// Encoded label of the start state.
pub const INIT_LABEL: char = '0';
/// Encoded label of the terminal state.
pub const HALT_LABEL: char = 'H';
/// Number of characters in one encoded instruction.
pub const INSTRUCTION_WIDTH: usize = 5;
/// Number of cells of a bounded tape. The head starts in the middle.
pub const TAPE_LENGTH: usize = 128;
/// The maximum allowed size for a program document in bytes.
pub const MAX_PROGRAM_SIZE: usize = 65536; // 64KB
/// The default number of steps for callers that bound execution.
pub const MAX_EXECUTION_STEPS: usize = 10000;

/// A control state of the machine.
///
/// Serialized as its encoded character, so `"H"` always reads back as [`State::Halt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "char", into = "char")]
pub enum State {
    /// The unique terminal state.
    Halt,
    /// Any other state, identified by its encoded character.
    Label(char),
}

impl State {
    /// The state every machine starts in.
    pub const INIT: State = State::Label(INIT_LABEL);

    /// Decodes a state character. `H` is the halt state.
    pub fn from_char(c: char) -> Self {
        if c == HALT_LABEL {
            State::Halt
        } else {
            State::Label(c)
        }
    }

    pub fn to_char(self) -> char {
        match self {
            State::Halt => HALT_LABEL,
            State::Label(c) => c,
        }
    }

    pub fn is_halt(self) -> bool {
        self == State::Halt
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Halt => write!(f, "halt"),
            State::Label(c) => write!(f, "'{c}'"),
        }
    }
}

/// The symbol an instruction expects under the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "char", into = "char")]
pub enum Pattern {
    /// Matches any symbol.
    Any,
    /// Matches exactly this symbol.
    Exact(char),
}

impl Pattern {
    pub fn from_char(c: char) -> Self {
        if c == WILDCARD_SYMBOL {
            Pattern::Any
        } else {
            Pattern::Exact(c)
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Pattern::Any => WILDCARD_SYMBOL,
            Pattern::Exact(c) => c,
        }
    }

    /// Checks whether `symbol` satisfies this pattern.
    pub fn matches(self, symbol: char) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Exact(c) => c == symbol,
        }
    }
}

/// What an instruction does to the cell under the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "char", into = "char")]
pub enum Output {
    /// Leave the cell unchanged.
    Keep,
    /// Overwrite the cell.
    Write(char),
}

impl Output {
    pub fn from_char(c: char) -> Self {
        if c == KEEP_SYMBOL {
            Output::Keep
        } else {
            Output::Write(c)
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Output::Keep => KEEP_SYMBOL,
            Output::Write(c) => c,
        }
    }
}

impl From<char> for State {
    fn from(c: char) -> Self {
        State::from_char(c)
    }
}

impl From<State> for char {
    fn from(state: State) -> Self {
        state.to_char()
    }
}

impl From<char> for Pattern {
    fn from(c: char) -> Self {
        Pattern::from_char(c)
    }
}

impl From<Pattern> for char {
    fn from(pattern: Pattern) -> Self {
        pattern.to_char()
    }
}

impl From<char> for Output {
    fn from(c: char) -> Self {
        Output::from_char(c)
    }
}

impl From<Output> for char {
    fn from(output: Output) -> Self {
        output.to_char()
    }
}

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    pub fn to_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Stay => 'N',
        }
    }
}

/// A single rule of a program: when the machine is in `state` and the symbol under
/// the head satisfies `read`, apply `write`, move in `direction` and continue in `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub state: State,
    pub read: Pattern,
    pub write: Output,
    pub direction: Direction,
    pub next: State,
}

impl Instruction {
    /// Checks whether this instruction applies to `state` reading `symbol`.
    pub fn matches(&self, state: State, symbol: char) -> bool {
        self.state == state && self.read.matches(symbol)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.state.to_char(),
            self.read.to_char(),
            self.write.to_char(),
            self.direction.to_char(),
            self.next.to_char()
        )
    }
}

/// An ordered, immutable table of instructions.
///
/// The order is significant: lookup returns the first matching instruction, so an
/// exact rule placed after a wildcard rule of the same state is never used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// The name of the program.
    pub name: String,
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(name: impl Into<String>, instructions: Vec<Instruction>) -> Self {
        Self {
            name: name.into(),
            instructions,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Finds the first instruction, in declaration order, that applies to `state`
    /// reading `symbol`.
    pub fn lookup(&self, state: State, symbol: char) -> Option<&Instruction> {
        self.instructions.iter().find(|i| i.matches(state, symbol))
    }

    /// Returns every state that appears in the table, in order of first appearance.
    pub fn states(&self) -> Vec<State> {
        let mut states = Vec::new();
        for instruction in &self.instructions {
            for state in [instruction.state, instruction.next] {
                if !states.contains(&state) {
                    states.push(state);
                }
            }
        }

        states
    }
}

/// Represents the outcome of a machine execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine successfully performed a step and continues execution.
    Continue,
    /// The machine has stopped.
    Halt(Halt),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// Reached the halt state.
    Ok,

    Err(TuringMachineError),
}

/// Represents various errors that can occur while parsing or running a program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// No instruction matches the current state and the symbol under the head.
    #[error("No instruction for state {0} and symbol {1:?}")]
    UndefinedTransition(State, char),
    /// The head moved past an edge of a bounded tape.
    #[error("Tape boundary exceeded")]
    TapeBoundary,
    /// The encoded program length is not a multiple of the instruction width.
    #[error("Invalid program: length {0} is not a multiple of {width}", width = INSTRUCTION_WIDTH)]
    InvalidEncoding(usize),
    /// The machine did not halt within the allowed number of steps.
    #[error("Step limit of {0} exceeded")]
    StepLimitExceeded(usize),
    /// Indicates an error during the parsing of a program.
    #[error("Program parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates an error during the validation of a program's structure or logic.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to file system operations, such as reading program files.
    #[error("File error: {0}")]
    FileError(String),
}
