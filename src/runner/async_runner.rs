use std::error::Error;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::{csv_utils::write_csv, dto::CommandRow, dto::OutcomeRow, stores::AccountRegistry};

use super::{process_row, report};
use csv_async::{AsyncReaderBuilder, Error as CsvError, Trim};
use tokio::fs::File;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::info;

const BUFFER_SIZE: usize = 1024;

type Result<T, E = Box<dyn Error + Send + Sync>> = std::result::Result<T, E>;

/// Runs the ledger async on the given command file and writes outcomes to the provided writer.
/// Spawns two tasks:
/// * CSV reader - streams command rows from the input file, deserializes them and sends them to the processor via channel.
/// * Processor - receives rows from the channel and applies them to the registry until the channel is closed.
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
pub async fn run<P, W>(input_path: P, writer: W) -> Result<()>
where
    P: AsRef<Path>,
    W: Write,
{
    // Create channel for passing command rows from reader to processor
    let (tx, rx) = mpsc::channel(BUFFER_SIZE);
    let input_path = input_path.as_ref().to_owned();
    let registry = Arc::new(AccountRegistry::new());
    info!(input = %input_path.display(), "processing commands");

    let reader_handle = tokio::spawn(read_commands(input_path, tx));
    let processor_handle = tokio::spawn(process_commands(Arc::clone(&registry), rx));

    // Wait for reader to finish and propagate any errors
    reader_handle.await??;

    let outcomes = processor_handle.await?;
    report(&registry, outcomes.len());

    write_csv(writer, outcomes)?;
    Ok(())
}

/// Reads and deserializes command rows from a CSV file.
/// Returns them through the provided channel.
async fn read_commands(
    input_path: impl AsRef<Path> + Send,
    tx: mpsc::Sender<CommandRow>,
) -> Result<(), CsvError> {
    let file = File::open(input_path).await?;
    let mut csv_reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .create_deserializer(file);

    let mut records = csv_reader.deserialize::<CommandRow>();
    while let Some(result) = records.next().await {
        match result {
            Ok(row) => {
                if tx.send(row).await.is_err() {
                    // Receiver dropped, exit gracefully
                    break;
                }
            }
            // CSV parsing errors are critical - propagate them
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Applies command rows received through the channel in arrival order.
/// Returns the outcomes once the channel is closed by the reader.
async fn process_commands(
    registry: Arc<AccountRegistry>,
    mut rx: mpsc::Receiver<CommandRow>,
) -> Vec<OutcomeRow> {
    let mut outcomes = Vec::new();
    while let Some(row) = rx.recv().await {
        outcomes.push(process_row(&registry, row));
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::EXAMPLE_OUTPUT;

    #[tokio::test]
    async fn test_example_commands() -> Result<()> {
        let mut output = Vec::new();
        run("data/example_commands.csv", &mut output).await?;
        assert_eq!(String::from_utf8(output)?, EXAMPLE_OUTPUT);
        Ok(())
    }

    #[tokio::test]
    async fn test_matches_sync_runner() -> Result<()> {
        let mut async_output = Vec::new();
        run("data/example_commands.csv", &mut async_output).await?;

        let mut sync_output = Vec::new();
        crate::run("data/example_commands.csv", &mut sync_output)
            .map_err(|e| e.to_string())?;
        assert_eq!(async_output, sync_output);
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_row_is_fatal() {
        let mut output = Vec::new();
        assert!(run("data/bad_row.csv", &mut output).await.is_err());
        assert!(output.is_empty());
    }
}
