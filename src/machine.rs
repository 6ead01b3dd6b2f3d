//! This module defines the `TuringMachine` struct, which runs a quintuple program over a
//! single tape. It handles the machine's state, instruction lookup, head movement and the
//! fatal conditions that stop a run.

use crate::tape::Tape;
use crate::types::{Halt, Instruction, Output, Program, State, Step, TuringMachineError};

/// Represents a single-tape Turing Machine.
///
/// The machine owns its program and tape. It starts in [`State::INIT`] and runs until the
/// program moves it into [`State::Halt`], or until a fatal error occurs.
pub struct TuringMachine {
    state: State,
    tape: Tape,
    initial_tape: Tape,
    program: Program,
    step_count: usize,
    error: Option<TuringMachineError>,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` from a program and its initial tape.
    ///
    /// # Arguments
    ///
    /// * `program` - The `Program` to run.
    /// * `tape` - The initial tape, with the head on its first input symbol.
    pub fn new(program: Program, tape: Tape) -> Self {
        Self {
            state: State::INIT,
            initial_tape: tape.clone(),
            tape,
            program,
            step_count: 0,
            error: None,
        }
    }

    /// Executes a single lookup-and-apply step.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if the machine performed a step and has not halted.
    /// * `Step::Halt(Halt::Ok)` once the machine is in the halt state.
    /// * `Step::Halt(Halt::Err(_))` if no instruction matches or the head left a bounded tape.
    ///   The machine stays halted with that error.
    pub fn step(&mut self) -> Step {
        if let Some(error) = &self.error {
            return Step::Halt(Halt::Err(error.clone()));
        }

        if self.is_halted() {
            return Step::Halt(Halt::Ok);
        }

        let instruction = match self.transition().copied() {
            Some(instruction) => instruction,
            None => {
                return self.fail(TuringMachineError::UndefinedTransition(
                    self.state,
                    self.symbol(),
                ))
            }
        };

        if let Err(e) = self.apply(&instruction) {
            return self.fail(e);
        }

        self.step_count += 1;

        if self.is_halted() {
            Step::Halt(Halt::Ok)
        } else {
            Step::Continue
        }
    }

    /// Writes, moves and switches state according to `instruction`.
    fn apply(&mut self, instruction: &Instruction) -> Result<(), TuringMachineError> {
        if let Output::Write(symbol) = instruction.write {
            self.tape.write(symbol);
        }

        self.tape.shift(instruction.direction)?;
        self.state = instruction.next;

        Ok(())
    }

    fn fail(&mut self, error: TuringMachineError) -> Step {
        self.error = Some(error.clone());
        Step::Halt(Halt::Err(error))
    }

    /// Runs the machine until it halts.
    ///
    /// A program that never reaches the halt state makes this loop forever; use
    /// [`TuringMachine::run_with_limit`] for programs that are not known to halt.
    pub fn run(&mut self) -> Step {
        loop {
            match self.step() {
                Step::Continue => continue,
                halt => return halt,
            }
        }
    }

    /// Runs the machine until it halts or `max_steps` steps have been executed.
    ///
    /// A machine that already stopped with an error keeps reporting that error.
    pub fn run_with_limit(&mut self, max_steps: usize) -> Step {
        if let Some(error) = &self.error {
            return Step::Halt(Halt::Err(error.clone()));
        }

        for _ in 0..max_steps {
            match self.step() {
                Step::Continue => continue,
                halt => return halt,
            }
        }

        if self.is_halted() {
            Step::Halt(Halt::Ok)
        } else {
            self.fail(TuringMachineError::StepLimitExceeded(max_steps))
        }
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the program the machine runs.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Returns the current tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Consumes the machine and returns its tape.
    pub fn into_tape(self) -> Tape {
        self.tape
    }

    /// Resets the machine to its initial configuration.
    /// This includes resetting the state, tape, step count and any recorded error.
    pub fn reset(&mut self) {
        self.state = State::INIT;
        self.tape = self.initial_tape.clone();
        self.step_count = 0;
        self.error = None;
    }

    /// Returns the total number of steps executed by the machine.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Checks if the machine has reached the halt state.
    pub fn is_halted(&self) -> bool {
        self.state.is_halt()
    }

    /// Returns the error that stopped the machine, if any.
    pub fn error(&self) -> Option<&TuringMachineError> {
        self.error.as_ref()
    }

    /// Returns the symbol under the head.
    pub fn symbol(&self) -> char {
        self.tape.head()
    }

    /// Finds the instruction for the current state and the symbol under the head.
    ///
    /// # Returns
    ///
    /// * `Some(&Instruction)` for the first matching instruction in program order.
    /// * `None` if no instruction matches.
    pub fn transition(&self) -> Option<&Instruction> {
        self.program.lookup(self.state, self.symbol())
    }
}

/// Runs `program` on `tape` until it halts and renders the final tape.
///
/// ```
/// use quintape::{evaluate, parse, Tape};
///
/// let program = parse("0 *L1110L11?1NH").unwrap();
/// assert_eq!(evaluate(&program, Tape::unbounded("")).unwrap(), "1");
/// ```
pub fn evaluate(program: &Program, tape: Tape) -> Result<String, TuringMachineError> {
    let mut machine = TuringMachine::new(program.clone(), tape);

    match machine.run() {
        Step::Halt(Halt::Err(e)) => Err(e),
        _ => Ok(machine.tape().render()),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::parser::parse;
    use crate::types::TAPE_LENGTH;
    use proptest::prelude::*;

    const MEASURE: &str = concat!(
        "0?*L1", "1 mL2", "2 nL3", "3 0R4", "4m*R5", "4?*R4", "51_L6", "5 *NH", "5?_R5",
        "6n*L7", "6?*L6", "710L7", "7?1R4",
    );

    proptest! {
        #[test]
        fn evaluation_is_deterministic(input in "[01a-z_!]{0,80}") {
            let program = parse(MEASURE).unwrap();

            let first = evaluate(&program, Tape::bounded(&input, TAPE_LENGTH));
            let second = evaluate(&program, Tape::bounded(&input, TAPE_LENGTH));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn measure_counts_ones(input in "[0-9A-Z!]{0,40}") {
            let program = parse(MEASURE).unwrap();
            let ones = input.chars().filter(|&c| c == '1').count();

            let output = evaluate(&program, Tape::unbounded(&input)).unwrap();
            prop_assert_eq!(output, format!("{:b}nm", ones));
        }

        #[test]
        fn tapes_agree_within_bound(input in "[0-9A-Z]{0,40}") {
            let program = parse(MEASURE).unwrap();

            prop_assert_eq!(
                evaluate(&program, Tape::unbounded(&input)),
                evaluate(&program, Tape::bounded(&input, TAPE_LENGTH))
            );
        }
    }
}
