//! CSV serialization and deserialization utilities.
//!
//! Provides generic functions for reading command files and writing
//! outcome rows.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Creates an iterator that reads CSV records from a file.
/// Each record is deserialized into type T.
pub fn read_csv<T, P>(path: P) -> csv::Result<impl Iterator<Item = csv::Result<T>>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?
        .into_deserialize())
}

/// Writes records to a CSV writer, header first.
/// The header comes from the field names of T.
pub fn write_csv<T, W, I>(writer: W, records: I) -> csv::Result<()>
where
    T: Serialize,
    W: Write,
    I: IntoIterator<Item = T>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    records
        .into_iter()
        .try_for_each(|record| csv_writer.serialize(record))?;
    csv_writer.flush()?;
    Ok(())
}
