use std::error::Error;
use std::io::Write;
use std::path::Path;
use tracing::info;

use super::{process_row, report};
use crate::{
    csv_utils::{read_csv, write_csv},
    dto::CommandRow,
    stores::AccountRegistry,
};

/// Runs the ledger on the given command file and writes outcomes to the provided writer.
///
/// # Arguments
/// * `input_path` - Path to the input CSV file containing commands
/// * `writer` - Where to write the outcome rows (e.g. stdout)
///
/// # Errors
/// Returns an error if:
/// * The input file cannot be read
/// * The CSV is malformed
/// * Writing to the output fails
pub fn run<P, W>(input_path: P, writer: W) -> Result<(), Box<dyn Error>>
where
    P: AsRef<Path>,
    W: Write,
{
    let registry = AccountRegistry::new();
    info!(input = %input_path.as_ref().display(), "processing commands");

    let mut outcomes = Vec::new();
    for row in read_csv::<CommandRow, _>(input_path)? {
        // CSV parsing errors are critical - propagate them
        outcomes.push(process_row(&registry, row?));
    }

    report(&registry, outcomes.len());
    write_csv(writer, outcomes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::EXAMPLE_OUTPUT;

    #[test]
    fn test_example_commands() -> Result<(), Box<dyn Error>> {
        let mut output = Vec::new();
        run("data/example_commands.csv", &mut output)?;
        assert_eq!(String::from_utf8(output)?, EXAMPLE_OUTPUT);
        Ok(())
    }

    #[test]
    fn test_malformed_row_is_fatal() {
        let mut output = Vec::new();
        assert!(run("data/bad_row.csv", &mut output).is_err());
        assert!(output.is_empty());
    }

    #[test]
    fn test_missing_file() {
        assert!(run("data/does_not_exist.csv", Vec::new()).is_err());
    }
}
