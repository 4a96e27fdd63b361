//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::fs::File;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::application::RawTable;

/// Tabular input abstraction.
pub trait TableReader: Send + Sync {
    /// Read the header row and all data rows of a table.
    fn read_table(&self, path: &Path) -> io::Result<RawTable>;
}

/// CSV implementation backed by the `csv` crate.
///
/// Rows may have fewer or more cells than the header.
#[derive(Debug, Clone)]
pub struct CsvTableReader {
    delimiter: u8,
}

impl Default for CsvTableReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvTableReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Parse CSV from any reader.
    pub fn read_from<R: io::Read>(&self, input: R) -> io::Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(input);

        let headers = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(RawTable { headers, rows })
    }
}

impl TableReader for CsvTableReader {
    fn read_table(&self, path: &Path) -> io::Result<RawTable> {
        debug!("read_table: {}", path.display());
        let file = File::open(path)?;
        self.read_from(file)
    }
}
