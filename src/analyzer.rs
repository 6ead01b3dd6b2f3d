//! This module provides functions for analyzing quintuple programs to detect common errors
//! before execution. Evaluation itself stays lazy: a missing rule is only reported when the
//! machine reaches it. These checks let callers fail fast instead.

use crate::types::{Pattern, Program, State, TuringMachineError, BLANK_SYMBOL};
use std::collections::HashSet;

/// Represents the problems that can be found during the analysis of a program.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The program has no instructions at all.
    EmptyProgram,
    /// No instruction handles the start state.
    InvalidStartState(State),
    /// Instructions attached to the halt state can never run.
    HaltInstructions(Vec<String>),
    /// Transitions move to states that have no instructions.
    UndefinedNextStates(Vec<String>),
    /// States with instructions that cannot be reached from the start state.
    UnreachableStates(Vec<String>),
    /// The halt state cannot be reached from the start state.
    HaltUnreachable,
    /// The same state and match symbol appear more than once.
    DuplicateRules(Vec<String>),
    /// Rules placed after a wildcard rule of the same state.
    ShadowedRules(Vec<String>),
}

impl From<AnalysisError> for TuringMachineError {
    /// Converts an `AnalysisError` into a `TuringMachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::EmptyProgram => {
                TuringMachineError::ValidationError("Program has no instructions".to_string())
            }
            AnalysisError::InvalidStartState(state) => TuringMachineError::ValidationError(
                format!("No instruction for start state {}", state),
            ),
            AnalysisError::HaltInstructions(rules) => TuringMachineError::ValidationError(
                format!("Instructions on the halt state never run: {:?}", rules),
            ),
            AnalysisError::UndefinedNextStates(transitions) => TuringMachineError::ValidationError(
                format!("Transitions reference undefined states: {:?}", transitions),
            ),
            AnalysisError::UnreachableStates(states) => TuringMachineError::ValidationError(
                format!("Unreachable states detected: {:?}", states),
            ),
            AnalysisError::HaltUnreachable => TuringMachineError::ValidationError(
                "Halt state is unreachable from the start state".to_string(),
            ),
            AnalysisError::DuplicateRules(rules) => TuringMachineError::ValidationError(
                format!("Duplicate rules: {:?}", rules),
            ),
            AnalysisError::ShadowedRules(rules) => TuringMachineError::ValidationError(
                format!("Rules shadowed by an earlier wildcard: {:?}", rules),
            ),
        }
    }
}

/// Analyzes a program for structural and logical errors.
///
/// # Arguments
///
/// * `program` - A reference to the `Program` to be analyzed.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(TuringMachineError::ValidationError)` describing the first failed check.
pub fn analyze(program: &Program) -> Result<(), TuringMachineError> {
    let checks: [fn(&Program) -> Result<(), AnalysisError>; 8] = [
        check_not_empty,
        check_valid_start_state,
        check_halt_instructions,
        check_undefined_next_states,
        check_unreachable_states,
        check_halt_reachable,
        check_duplicate_rules,
        check_shadowed_rules,
    ];

    match checks.iter().find_map(|f| f(program).err()) {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Lists the `(state, symbol)` pairs that reachable states cannot handle.
///
/// `alphabet` is the set of symbols the caller expects on the tape; blank is always
/// included. Pairs are sorted by state, then symbol.
pub fn uncovered(program: &Program, alphabet: &[char]) -> Vec<(State, char)> {
    let mut symbols: Vec<char> = alphabet.to_vec();
    symbols.push(BLANK_SYMBOL);
    symbols.sort();
    symbols.dedup();

    let mut states: Vec<State> = reachable_states(program)
        .into_iter()
        .filter(|state| !state.is_halt())
        .collect();
    states.sort();

    states
        .into_iter()
        .flat_map(|state| symbols.iter().map(move |&symbol| (state, symbol)))
        .filter(|&(state, symbol)| program.lookup(state, symbol).is_none())
        .collect()
}

/// Collects every state reachable from the start state, following transitions.
fn reachable_states(program: &Program) -> HashSet<State> {
    let mut visited = HashSet::new();
    let mut queue = vec![State::INIT];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        for instruction in program.instructions() {
            if instruction.state == state && !visited.contains(&instruction.next) {
                queue.push(instruction.next);
            }
        }
    }

    visited
}

/// States that own at least one instruction.
fn defined_states(program: &Program) -> HashSet<State> {
    program.instructions().iter().map(|i| i.state).collect()
}

fn check_not_empty(program: &Program) -> Result<(), AnalysisError> {
    if program.is_empty() {
        return Err(AnalysisError::EmptyProgram);
    }

    Ok(())
}

/// Checks whether the start state owns at least one instruction.
fn check_valid_start_state(program: &Program) -> Result<(), AnalysisError> {
    if !defined_states(program).contains(&State::INIT) {
        return Err(AnalysisError::InvalidStartState(State::INIT));
    }

    Ok(())
}

fn check_halt_instructions(program: &Program) -> Result<(), AnalysisError> {
    let rules: Vec<String> = program
        .instructions()
        .iter()
        .filter(|i| i.state.is_halt())
        .map(|i| i.to_string())
        .collect();

    if !rules.is_empty() {
        return Err(AnalysisError::HaltInstructions(rules));
    }

    Ok(())
}

/// Checks that every `next` state owns instructions. The halt state needs none.
fn check_undefined_next_states(program: &Program) -> Result<(), AnalysisError> {
    let defined = defined_states(program);

    let undefined: Vec<String> = program
        .instructions()
        .iter()
        .enumerate()
        .filter(|(_, i)| !i.next.is_halt() && !defined.contains(&i.next))
        .map(|(index, i)| format!("{}[{}] -> {}", i.state, index, i.next))
        .collect();

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedNextStates(undefined));
    }

    Ok(())
}

/// Checks for states that cannot be reached from the start state.
fn check_unreachable_states(program: &Program) -> Result<(), AnalysisError> {
    let visited = reachable_states(program);

    let mut unreachable: Vec<State> = defined_states(program)
        .difference(&visited)
        .copied()
        .filter(|state| !state.is_halt())
        .collect();

    if !unreachable.is_empty() {
        unreachable.sort(); // Sort for deterministic output
        return Err(AnalysisError::UnreachableStates(
            unreachable.iter().map(|s| s.to_string()).collect(),
        ));
    }

    Ok(())
}

fn check_halt_reachable(program: &Program) -> Result<(), AnalysisError> {
    if !reachable_states(program).contains(&State::Halt) {
        return Err(AnalysisError::HaltUnreachable);
    }

    Ok(())
}

/// Checks for rules that repeat an earlier `(state, match)` pair. Only the first one
/// is ever used.
fn check_duplicate_rules(program: &Program) -> Result<(), AnalysisError> {
    let mut seen: HashSet<(State, Pattern)> = HashSet::new();

    let duplicates: Vec<String> = program
        .instructions()
        .iter()
        .filter(|i| !seen.insert((i.state, i.read)))
        .map(|i| i.to_string())
        .collect();

    if !duplicates.is_empty() {
        return Err(AnalysisError::DuplicateRules(duplicates));
    }

    Ok(())
}

/// Checks for rules that follow a wildcard rule of the same state.
fn check_shadowed_rules(program: &Program) -> Result<(), AnalysisError> {
    let mut wildcards: HashSet<State> = HashSet::new();
    let mut shadowed = Vec::new();

    for instruction in program.instructions() {
        if wildcards.contains(&instruction.state) {
            shadowed.push(instruction.to_string());
        } else if instruction.read == Pattern::Any {
            wildcards.insert(instruction.state);
        }
    }

    if !shadowed.is_empty() {
        return Err(AnalysisError::ShadowedRules(shadowed));
    }

    Ok(())
}
