//! CSV files as record sources.
//!
//! Each row becomes a flat record keyed by the lowercased column header, so
//! the default field chains (`title`, `year`, `journal`, ...) apply directly.

use std::path::PathBuf;

use csv::ReaderBuilder;
use serde_json::Value;

use super::{read_source, source_path};
use crate::{RawRecord, RecordSource, Result};

/// Reads the records of source `id` from `<root>/<id>.csv`.
///
/// # Examples
///
/// ```
/// use citelist::source::CsvDirSource;
///
/// let source = CsvDirSource::new("exports").with_delimiter(b';');
/// ```
#[derive(Debug, Clone)]
pub struct CsvDirSource {
    root: PathBuf,
    delimiter: u8,
}

impl CsvDirSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            delimiter: b',',
        }
    }

    /// Sets the delimiter character
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn parse(&self, input: &str) -> Result<Vec<RawRecord>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(input.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let record: RawRecord = headers
                .iter()
                .zip(row.iter())
                .filter(|(_, value)| !value.trim().is_empty())
                .map(|(header, value)| (header.clone(), Value::from(value)))
                .collect();
            records.push(record);
        }
        Ok(records)
    }
}

impl RecordSource for CsvDirSource {
    fn fetch(&self, id: &str) -> Result<Vec<RawRecord>> {
        let path = source_path(&self.root, id, "csv");
        let text = read_source(&path, id)?;
        self.parse(&text)
    }
}
