use crate::machine::evaluate;
use crate::parser::parse_document;
use crate::tape::Tape;
use crate::types::{Program, TuringMachineError, TAPE_LENGTH};

use std::sync::RwLock;

/// Name of the built-in program used by [`measure`].
pub const MEASURE_PROGRAM: &str = "Normalized measurement";

// Default embedded programs
const PROGRAM_TEXTS: [&str; 3] = [
    include_str!("../programs/normalized-measurement.tm"),
    include_str!("../programs/binary-increment.tm"),
    include_str!("../programs/unary-addition.tm"),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: RwLock<Vec<Program>> = RwLock::new(Vec::new());
}

pub struct ProgramManager;

impl ProgramManager {
    /// Parses the embedded programs into the registry.
    pub fn load() -> Result<(), TuringMachineError> {
        let mut programs = Vec::new();

        for (index, program_text) in PROGRAM_TEXTS.iter().enumerate() {
            match parse_document(program_text, &format!("program-{index}")) {
                Ok(program) => programs.push(program),
                Err(e) => eprintln!("Failed to parse embedded program {}: {}", index, e),
            }
        }

        if let Ok(mut write_guard) = PROGRAMS.write() {
            *write_guard = programs;
        } else {
            return Err(TuringMachineError::FileError(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Loads the registry on first use.
    fn ensure_loaded() {
        let empty = PROGRAMS.read().map(|p| p.is_empty()).unwrap_or(true);
        if empty {
            let _ = Self::load();
        }
    }

    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        Self::ensure_loaded();

        PROGRAMS.read().map(|programs| programs.len()).unwrap_or(0)
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        Self::ensure_loaded();

        PROGRAMS
            .read()
            .map_err(|_| TuringMachineError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program index {} out of range", index))
            })
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        Self::ensure_loaded();

        PROGRAMS
            .read()
            .map_err(|_| TuringMachineError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|program| program.name == name)
            .cloned()
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        Self::ensure_loaded();

        PROGRAMS
            .read()
            .map(|programs| {
                programs
                    .iter()
                    .map(|program| program.name.clone())
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let program = Self::get_program_by_index(index)?;
        let states = program.states();

        Ok(ProgramInfo {
            index,
            name: program.name.clone(),
            state_count: states.iter().filter(|state| !state.is_halt()).count(),
            instruction_count: program.instructions().len(),
        })
    }

    /// Search for programs by name
    pub fn search_programs(query: &str) -> Vec<usize> {
        Self::ensure_loaded();

        PROGRAMS
            .read()
            .map(|programs| {
                programs
                    .iter()
                    .enumerate()
                    .filter(|(_, program)| {
                        program.name.to_lowercase().contains(&query.to_lowercase())
                    })
                    .map(|(index, _)| index)
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get the original text of a program by its index
    pub fn get_program_text_by_index(index: usize) -> Result<&'static str, TuringMachineError> {
        PROGRAM_TEXTS.get(index).copied().ok_or_else(|| {
            TuringMachineError::ValidationError(format!(
                "Program text index {} out of range",
                index
            ))
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub state_count: usize,
    pub instruction_count: usize,
}

/// Runs the normalized-measurement program on a bounded tape holding `input`.
///
/// The result is the number of `1` symbols before the first blank, in binary,
/// followed by `nm`.
pub fn measure(input: &str) -> Result<String, TuringMachineError> {
    let program = ProgramManager::get_program_by_name(MEASURE_PROGRAM)?;
    evaluate(&program, Tape::bounded(input, TAPE_LENGTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::encoder::encode;

    #[test]
    fn test_program_manager_initialization() {
        let result = ProgramManager::load();
        assert!(result.is_ok());

        assert_eq!(ProgramManager::get_program_count(), 3);
    }

    #[test]
    fn test_all_programs_are_valid() {
        let count = ProgramManager::get_program_count();
        for i in 0..count {
            let program = ProgramManager::get_program_by_index(i).unwrap();
            assert!(
                analyze(&program).is_ok(),
                "Program '{}' is invalid",
                program.name
            );
        }
    }

    #[test]
    fn test_program_names() {
        let names = ProgramManager::list_program_names();
        assert_eq!(
            names,
            vec![
                "Normalized measurement".to_string(),
                "Binary increment".to_string(),
                "Unary addition".to_string(),
            ]
        );
    }

    #[test]
    fn test_measure_document_matches_encoding() {
        let program = ProgramManager::get_program_by_name(MEASURE_PROGRAM).unwrap();
        assert_eq!(
            encode(&program),
            concat!(
                "0?*L1", "1 mL2", "2 nL3", "3 0R4", "4m*R5", "4?*R4", "51_L6", "5 *NH", "5?_R5",
                "6n*L7", "6?*L6", "710L7", "7?1R4",
            )
        );
    }

    #[test]
    fn test_measure() {
        assert_eq!(measure("").unwrap(), "0nm");
        assert_eq!(measure("01101110001110101110011").unwrap(), "1110nm");
        assert_eq!(measure("101012101232101210101").unwrap(), "1010nm");
        assert_eq!(measure("Th1s_1s_n1ce!!1111").unwrap(), "111nm");
        assert_eq!(measure("What_1s_the_w1dth_of_6_Si_atoms?!1").unwrap(), "11nm");
    }

    #[test]
    fn test_binary_increment() {
        let program = ProgramManager::get_program_by_name("Binary increment").unwrap();

        for (input, expected) in [("", "1"), ("0", "1"), ("1011", "1100"), ("111", "1000")] {
            assert_eq!(
                evaluate(&program, Tape::unbounded(input)).unwrap(),
                expected,
                "input {input}"
            );
        }
    }

    #[test]
    fn test_unary_addition() {
        let program = ProgramManager::get_program_by_name("Unary addition").unwrap();

        for (input, expected) in [("111+11", "11111"), ("1+", "1"), ("+", ""), ("11", "11")] {
            assert_eq!(
                evaluate(&program, Tape::bounded(input, TAPE_LENGTH)).unwrap(),
                expected,
                "input {input}"
            );
        }
    }

    #[test]
    fn test_program_manager_get_program_by_index() {
        assert!(ProgramManager::get_program_by_index(0).is_ok());
        assert!(ProgramManager::get_program_by_index(999).is_err());
    }

    #[test]
    fn test_program_manager_get_program_by_name() {
        assert!(ProgramManager::get_program_by_name("Nonexistent").is_err());
    }

    #[test]
    fn test_program_manager_get_program_info() {
        let info = ProgramManager::get_program_info(0).unwrap();
        assert_eq!(info.index, 0);
        assert_eq!(info.name, MEASURE_PROGRAM);
        assert_eq!(info.state_count, 8);
        assert_eq!(info.instruction_count, 13);

        assert!(ProgramManager::get_program_info(999).is_err());
    }

    #[test]
    fn test_program_manager_search_programs() {
        assert_eq!(ProgramManager::search_programs("BINARY"), vec![1]);
        assert_eq!(ProgramManager::search_programs("a").len(), 3);
        assert!(ProgramManager::search_programs("nonexistent").is_empty());
    }

    #[test]
    fn test_program_text_by_index() {
        let text = ProgramManager::get_program_text_by_index(2).unwrap();
        assert!(text.contains("Unary addition"));
        assert!(ProgramManager::get_program_text_by_index(3).is_err());
    }
}
