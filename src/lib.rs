//! This crate provides a quintuple Turing Machine: programs are tables of five-character
//! instructions (`STATE MATCH WRITE MOVE NEXT`) evaluated over a bounded or unbounded tape.
//! It includes modules for parsing and encoding programs, running them, analyzing program
//! correctness, and managing a collection of built-in programs.

pub mod analyzer;
pub mod encoder;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` and `uncovered` functions and the `AnalysisError` enum.
pub use analyzer::{analyze, uncovered, AnalysisError};
/// Re-exports the encoding functions from the encoder module.
pub use encoder::{decode, encode};
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` struct and `evaluate` from the machine module.
pub use machine::{evaluate, TuringMachine};
/// Re-exports the parsing functions from the parser module.
pub use parser::{parse, parse_document};
/// Re-exports `ProgramInfo`, `ProgramManager`, `PROGRAMS` and `measure` from the programs module.
pub use programs::{measure, ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the core types from the types module.
pub use types::{
    Direction, Halt, Instruction, Output, Pattern, Program, State, Step, TuringMachineError,
    MAX_EXECUTION_STEPS, MAX_PROGRAM_SIZE, TAPE_LENGTH,
};
