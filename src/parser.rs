//! This module provides the parser for quintuple programs, utilizing the `pest` crate.
//! It reads both the flat encoding (`"0?*L11 mL2..."`) and line-oriented program
//! documents into a `Program`.

use crate::types::{
    Direction, Instruction, Output, Pattern, Program, State, TuringMachineError, BLANK_SYMBOL,
    INSTRUCTION_WIDTH,
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;

/// Name given to programs that do not declare one.
pub const UNNAMED_PROGRAM: &str = "untitled";

/// Derives a `PestParser` for the quintuple grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct QuintupleParser;

/// Parses a flat quintuple encoding into a `Program`.
///
/// Only the encoding is checked: the length must be a multiple of the instruction
/// width and every move must be `L`, `N` or `R`. Missing or unreachable rules are
/// not detected here; see [`crate::analyzer::analyze`].
///
/// # Arguments
///
/// * `input` - Concatenated five-character instructions.
///
/// # Returns
///
/// * `Ok(Program)` if the input is a well-formed encoding.
/// * `Err(TuringMachineError::InvalidEncoding)` if the length is not a multiple of five.
/// * `Err(TuringMachineError::ParseError)` if an instruction is malformed.
pub fn parse(input: &str) -> Result<Program, TuringMachineError> {
    let len = input.chars().count();
    if len % INSTRUCTION_WIDTH != 0 {
        return Err(TuringMachineError::InvalidEncoding(len));
    }

    let root = QuintupleParser::parse(Rule::instructions, input)
        .map_err(|e| TuringMachineError::ParseError(e.into()))?
        .next()
        .unwrap();

    let instructions = root
        .into_inner()
        .filter(|p| p.as_rule() == Rule::instruction)
        .map(parse_instruction)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Program::new(UNNAMED_PROGRAM, instructions))
}

/// Parses a program document.
///
/// A document holds one or more instructions per line, `#` comment lines and at most
/// one `name: ...` header. Programs without a header are named `default_name`.
pub fn parse_document(input: &str, default_name: &str) -> Result<Program, TuringMachineError> {
    let root = QuintupleParser::parse(Rule::document, input)
        .map_err(|e| TuringMachineError::ParseError(e.into()))?
        .next()
        .unwrap();

    let mut name: Option<String> = None;
    let mut instructions = Vec::new();

    for p in root.into_inner() {
        match p.as_rule() {
            Rule::header => {
                if name.is_some() {
                    return Err(parse_error("Duplicate \"name:\" declaration", p.as_span()));
                }
                name = Some(parse_name(p));
            }
            Rule::body => {
                for instruction in p.into_inner() {
                    instructions.push(parse_instruction(instruction)?);
                }
            }
            _ => {} // Comments and EOI
        }
    }

    Ok(Program::new(
        name.unwrap_or_else(|| default_name.to_string()),
        instructions,
    ))
}

/// Parses a single five-character instruction from a `Pair<Rule::instruction>`.
fn parse_instruction(pair: Pair<Rule>) -> Result<Instruction, TuringMachineError> {
    let span = pair.as_span();
    let mut state = None;
    let mut read = None;
    let mut write = None;
    let mut direction = None;
    let mut next = None;

    for p in pair.into_inner() {
        let symbol = parse_symbol(p.as_str());
        match p.as_rule() {
            Rule::state => state = Some(State::from_char(symbol)),
            Rule::pattern => read = Some(Pattern::from_char(symbol)),
            Rule::output => write = Some(Output::from_char(symbol)),
            Rule::direction => direction = Some(parse_direction(p)?),
            Rule::next => next = Some(State::from_char(symbol)),
            _ => {}
        }
    }

    match (state, read, write, direction, next) {
        (Some(state), Some(read), Some(write), Some(direction), Some(next)) => Ok(Instruction {
            state,
            read,
            write,
            direction,
            next,
        }),
        _ => Err(parse_error("Incomplete instruction", span)),
    }
}

/// Parses a single direction from a `Pair<Rule::direction>`.
///
/// `L` moves left, `R` moves right and `N` keeps the head in place.
fn parse_direction(pair: Pair<Rule>) -> Result<Direction, TuringMachineError> {
    match pair.as_str() {
        "L" => Ok(Direction::Left),
        "R" => Ok(Direction::Right),
        "N" => Ok(Direction::Stay),
        other => Err(parse_error(
            &format!("Unsupported direction: {other}"),
            pair.as_span(),
        )),
    }
}

/// Extracts the program name from a `Pair<Rule::header>`.
fn parse_name(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .find(|p| p.as_rule() == Rule::name)
        .map(|p| p.as_str().trim_end().to_string())
        .unwrap_or_default()
}

/// Every field of an instruction is exactly one character.
fn parse_symbol(input: &str) -> char {
    input.chars().next().unwrap_or(BLANK_SYMBOL)
}

/// Creates a `TuringMachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TuringMachineError {
    TuringMachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}
