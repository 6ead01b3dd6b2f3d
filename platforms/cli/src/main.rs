use clap::Parser;
use quintape::programs::MEASURE_PROGRAM;
use quintape::{evaluate, measure, ProgramManager, Tape, TuringMachineError};
use std::io::{self, Write};

/// Inputs measured on the unbounded tape.
const UNBOUNDED_INPUTS: [&str; 4] = [
    "",
    "01101110001110101110011",
    "101012101232101210101",
    "Th1s_1s_n1ce!!1111",
];

/// Input measured on the bounded tape.
const BOUNDED_INPUT: &str = "What_1s_the_w1dth_of_6_Si_atoms?!1";

/// Runs the normalized-measurement Turing machine on a few inputs.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  quintape-cli
  quintape-cli 'IBM_d1d_it!1'")]
struct Cli {
    /// An extra input to measure on the bounded tape.
    input: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    if let Err(e) = run(&cli, &mut stdout) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<(), TuringMachineError> {
    let program = ProgramManager::get_program_by_name(MEASURE_PROGRAM)?;

    for input in UNBOUNDED_INPUTS {
        let result = evaluate(&program, Tape::unbounded(input))?;
        writeln!(out, "{}", result).map_err(output_error)?;
    }

    writeln!(out, "{}", measure(BOUNDED_INPUT)?).map_err(output_error)?;

    if let Some(input) = &cli.input {
        writeln!(out, "Your run: {}", measure(input)?).map_err(output_error)?;
    }

    Ok(())
}

fn output_error(e: io::Error) -> TuringMachineError {
    TuringMachineError::FileError(format!("Failed to write output: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output_of(cli: &Cli) -> (Result<(), TuringMachineError>, String) {
        let mut out = Vec::new();
        let result = run(cli, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_prints_measurements() {
        let (result, output) = output_of(&Cli { input: None });

        assert_eq!(result, Ok(()));
        assert_eq!(output, "0nm\n1110nm\n1010nm\n111nm\n11nm\n");
    }

    #[test]
    fn test_run_with_input() {
        let (result, output) = output_of(&Cli {
            input: Some("IBM_d1d_it!1".to_string()),
        });

        assert_eq!(result, Ok(()));
        assert_eq!(
            output.lines().collect::<Vec<_>>(),
            vec!["0nm", "1110nm", "1010nm", "111nm", "11nm", "Your run: 10nm"]
        );
    }

    #[test]
    fn test_run_reports_tape_boundary() {
        let (result, output) = output_of(&Cli {
            input: Some("x".repeat(200)),
        });

        assert_eq!(result, Err(TuringMachineError::TapeBoundary));
        assert_eq!(output.lines().count(), 5);
        assert!(!output.contains("Your run"));
    }
}
