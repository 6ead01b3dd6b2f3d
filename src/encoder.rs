//! This module converts programs back into their textual forms: the flat quintuple
//! encoding understood by [`crate::parser::parse`], program documents, and JSON.

use crate::parser::parse;
use crate::types::{Program, TuringMachineError};

/// Marks a comment line in a program document.
const COMMENT_MARKER: char = '#';

/// Encodes a program as concatenated five-character instructions.
///
/// # Arguments
///
/// * `program` - The Program to encode.
///
/// # Returns
///
/// * `String` - The encoded program, accepted by [`decode`].
pub fn encode(program: &Program) -> String {
    program
        .instructions()
        .iter()
        .map(|instruction| instruction.to_string())
        .collect()
}

/// Decodes a flat quintuple encoding. The program is unnamed.
pub fn decode(encoded: &str) -> Result<Program, TuringMachineError> {
    parse(encoded)
}

/// Writes a program document: a `name:` header followed by one instruction per line.
///
/// The header is left out for an unnamed program. Programs that a document cannot hold
/// are rejected with a `ValidationError`: a line break in the name or in an instruction,
/// a name with surrounding spaces, or an instruction in the `#` state, which would read
/// back as a comment.
pub fn encode_document(program: &Program) -> Result<String, TuringMachineError> {
    let mut document = String::new();

    if !program.name.is_empty() {
        if program.name.contains(is_line_break) || program.name.trim() != program.name {
            return Err(TuringMachineError::ValidationError(format!(
                "Program name {:?} cannot be written to a document",
                program.name
            )));
        }
        document.push_str(&format!("name: {}\n", program.name));
    }

    for (index, instruction) in program.instructions().iter().enumerate() {
        let line = instruction.to_string();
        if line.starts_with(COMMENT_MARKER) || line.contains(is_line_break) {
            return Err(TuringMachineError::ValidationError(format!(
                "Instruction {} ({:?}) cannot be written to a document",
                index, line
            )));
        }
        document.push_str(&line);
        document.push('\n');
    }

    Ok(document)
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Serializes a program to JSON.
pub fn to_json(program: &Program) -> Result<String, TuringMachineError> {
    serde_json::to_string(program).map_err(|e| {
        TuringMachineError::ValidationError(format!("Failed to serialize program: {}", e))
    })
}

/// Deserializes a program from JSON.
pub fn from_json(json: &str) -> Result<Program, TuringMachineError> {
    serde_json::from_str(json).map_err(|e| {
        TuringMachineError::ValidationError(format!("Failed to deserialize program: {}", e))
    })
}
