//! Row sources
//!
//! The validator never tokenizes raw text itself. A `RowSource` hands it a
//! fully materialized row sequence, either supplied directly or read from a
//! CSV file with the `csv` crate.

mod csv_file;
mod errors;

pub use csv_file::CsvFileSource;
pub use errors::{SourceError, SourceResult};

use crate::schema::Row;

/// Supplier of rows for one validation run. Row 0 is the header.
pub trait RowSource: Send + Sync {
    /// Name used in messages that refer to the dataset
    fn name(&self) -> String;

    /// Whether the underlying data is present
    fn exists(&self) -> bool;

    /// Reads every row, header first
    fn read_all(&self) -> SourceResult<Vec<Row>>;
}

/// Pre-tokenized rows held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<Row>,
}

impl MemorySource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Builds a source from string cells; empty strings stay empty strings.
    pub fn from_strings<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
                .collect(),
        }
    }
}

impl RowSource for MemorySource {
    fn name(&self) -> String {
        "csv".to_string()
    }

    fn exists(&self) -> bool {
        true
    }

    fn read_all(&self) -> SourceResult<Vec<Row>> {
        Ok(self.rows.clone())
    }
}
