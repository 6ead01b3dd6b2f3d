//! This module provides the `ProgramLoader` struct, responsible for loading program
//! documents from files, directories and strings.

use crate::parser::parse_document;
use crate::types::{Program, TuringMachineError, MAX_PROGRAM_SIZE};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of program documents.
pub const PROGRAM_EXTENSION: &str = "tm";

/// `ProgramLoader` is a utility struct for loading programs.
/// It provides methods to load programs from individual files, from string content,
/// and to discover and load all `.tm` files within a specified directory.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single program document from the specified file path.
    ///
    /// Documents without a `name:` header are named after the file stem.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the file is successfully read and parsed.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read or is too large.
    /// * `Err(TuringMachineError::ParseError)` if the file content is not a valid program.
    pub fn load_program(path: &Path) -> Result<Program, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        if content.len() > MAX_PROGRAM_SIZE {
            return Err(TuringMachineError::FileError(format!(
                "File {} exceeds the maximum program size of {} bytes",
                path.display(),
                MAX_PROGRAM_SIZE
            )));
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        parse_document(&content, &stem)
    }

    /// Loads a single program document from the provided string content.
    ///
    /// This is useful for parsing programs that are not stored in files, e.g., from user input.
    pub fn load_program_from_string(
        name: &str,
        content: &str,
    ) -> Result<Program, TuringMachineError> {
        parse_document(content, name)
    }

    /// Loads all program documents (`.tm` extension) from a given directory.
    ///
    /// Directories and files with other extensions are skipped. The results are sorted
    /// by path so the order does not depend on the file system.
    pub fn load_programs(directory: &Path) -> Vec<Result<(PathBuf, Program), TuringMachineError>> {
        if !directory.exists() {
            return vec![Err(TuringMachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut paths = Vec::new();
        let mut results = Vec::new();

        for entry in entries {
            match entry {
                Ok(entry) => paths.push(entry.path()),
                Err(e) => results.push(Err(TuringMachineError::FileError(format!(
                    "Failed to read directory entry: {}",
                    e
                )))),
            }
        }

        paths.sort();

        for path in paths {
            // Skip directories and non-.tm files
            if path.is_dir() || path.extension().is_none_or(|ext| ext != PROGRAM_EXTENSION) {
                continue;
            }

            results.push(match Self::load_program(&path) {
                Ok(program) => Ok((path, program)),
                Err(e) => Err(TuringMachineError::FileError(format!(
                    "Failed to load program from {}: {}",
                    path.display(),
                    e
                ))),
            });
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &str) {
        let mut file = File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_valid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("increment.tm");
        write_file(&file_path, "# binary increment\n0 *L1\n0?*R0\n110L1\n1?1NH\n");

        let program = ProgramLoader::load_program(&file_path).unwrap();
        assert_eq!(program.name, "increment");
        assert_eq!(program.instructions().len(), 4);
    }

    #[test]
    fn test_load_program_with_header() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("file.tm");
        write_file(&file_path, "name: Named Program\n0?*RH\n");

        let program = ProgramLoader::load_program(&file_path).unwrap();
        assert_eq!(program.name, "Named Program");
    }

    #[test]
    fn test_load_invalid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.tm");
        write_file(&file_path, "This is not a valid program");

        let result = ProgramLoader::load_program(&file_path);
        assert!(matches!(result, Err(TuringMachineError::ParseError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = ProgramLoader::load_program(&dir.path().join("missing.tm"));
        assert!(matches!(result, Err(TuringMachineError::FileError(_))));
    }

    #[test]
    fn test_load_oversized_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("big.tm");
        let line = "0?*RH\n".repeat(MAX_PROGRAM_SIZE / 6 + 1);
        write_file(&file_path, &line);

        let result = ProgramLoader::load_program(&file_path);
        assert!(matches!(result, Err(TuringMachineError::FileError(_))));
    }

    #[test]
    fn test_load_program_from_string() {
        let program = ProgramLoader::load_program_from_string("inline", "0?*RH").unwrap();
        assert_eq!(program.name, "inline");
    }

    #[test]
    fn test_load_programs_from_directory() {
        let dir = tempdir().unwrap();

        write_file(&dir.path().join("valid.tm"), "0?*RH\n");
        write_file(&dir.path().join("invalid.tm"), "0?*R\n");
        write_file(&dir.path().join("ignored.txt"), "This file should be ignored");
        fs::create_dir(dir.path().join("nested.tm")).unwrap();

        let results = ProgramLoader::load_programs(dir.path());

        // Sorted by path: invalid.tm, valid.tm
        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        let (path, program) = results[1].as_ref().unwrap();
        assert!(path.ends_with("valid.tm"));
        assert_eq!(program.name, "valid");
    }

    #[test]
    fn test_load_programs_missing_directory() {
        let dir = tempdir().unwrap();
        let results = ProgramLoader::load_programs(&dir.path().join("nope"));

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(TuringMachineError::FileError(_))));
    }
}
