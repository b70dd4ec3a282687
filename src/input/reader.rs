//! Delimited entry parsing.
//!
//! This module reads entry tables from CSV/TSV files or any reader,
//! producing well-typed rows for the calculator. Numeric parsing lives
//! here, not in the calculation core: blank quantity and cost fields
//! coerce to 0, anything else non-numeric is a row error carrying the
//! offending line number.

use crate::models::{EntryRow, EntryTable};
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Number of fields an entry record must have.
const FIELD_COUNT: usize = 3;

/// Errors produced while reading entries.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited input")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {message}")]
    Row { line: usize, message: String },
}

/// Options controlling how entry input is parsed.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Field delimiter (e.g., `b','` or `b'\t'`).
    pub delimiter: u8,
    /// Whether the first record is a header row to skip.
    pub has_headers: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }
}

/// Read an entry table from a file.
pub fn read_entries_from_path(path: &Path, options: &ReadOptions) -> Result<EntryTable, InputError> {
    let file = std::fs::File::open(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    debug!("Reading entries from {}", path.display());
    read_entries(file, options)
}

/// Read an entry table from any reader (file contents, stdin, a string).
pub fn read_entries<R: Read>(reader: R, options: &ReadOptions) -> Result<EntryTable, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .from_reader(reader);

    let mut entries = EntryTable::new();

    for (index, result) in csv_reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map_or(index + 1, |p| p.line() as usize);

        entries.push(parse_record(&record, line)?);
    }

    debug!("Read {} entries", entries.len());
    Ok(entries)
}

/// Parse a single delimited line into an entry row.
///
/// Used by the interactive session, where each input line is one entry.
pub fn parse_entry_line(line: &str, delimiter: u8) -> Result<EntryRow, InputError> {
    let options = ReadOptions {
        delimiter,
        has_headers: false,
    };

    let mut entries = read_entries(line.as_bytes(), &options)?;

    match entries.len() {
        1 => Ok(entries.remove(0)),
        _ => Err(InputError::Row {
            line: 1,
            message: "expected a single entry".to_string(),
        }),
    }
}

/// Convert one CSV record into an entry row.
fn parse_record(record: &csv::StringRecord, line: usize) -> Result<EntryRow, InputError> {
    if record.len() != FIELD_COUNT {
        return Err(InputError::Row {
            line,
            message: format!(
                "expected {} fields (description, quantity, price), found {}",
                FIELD_COUNT,
                record.len()
            ),
        });
    }

    let description = record[0].to_string();
    let quantity = parse_number(record[1].trim(), "quantity", line)?;
    let cost = parse_number(record[2].trim(), "price", line)?;

    Ok(EntryRow {
        description,
        quantity,
        cost,
    })
}

/// Parse a numeric field. Blank fields coerce to 0, matching how an
/// untouched form field counts as zero.
fn parse_number(field: &str, name: &str, line: usize) -> Result<f64, InputError> {
    if field.is_empty() {
        return Ok(0.0);
    }

    field.parse::<f64>().map_err(|_| InputError::Row {
        line,
        message: format!("invalid {}: '{}'", name, field),
    })
}
