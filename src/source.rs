//! Record sources.
//!
//! A [`RecordSource`] yields the raw records of one source identifier, such
//! as an academic profile id. The pipeline calls it once per identifier and
//! treats failures as an empty contribution.
//!
//! Any closure `Fn(&str) -> Result<Vec<RawRecord>>` is a source, which keeps
//! ad-hoc and network-backed retrieval outside this crate:
//!
//! ```
//! use citelist::{RawRecord, RecordSource};
//!
//! let source = |id: &str| -> citelist::Result<Vec<RawRecord>> {
//!     let mut record = RawRecord::new();
//!     record.insert("title", format!("Paper from {id}"));
//!     Ok(vec![record])
//! };
//! assert_eq!(source.fetch("abc").unwrap().len(), 1);
//! ```

#[cfg(feature = "csv")]
mod csv_dir;
#[cfg(feature = "json")]
mod json_dir;

#[cfg(feature = "csv")]
pub use csv_dir::CsvDirSource;
#[cfg(feature = "json")]
pub use json_dir::JsonDirSource;

use std::path::{Path, PathBuf};

use crate::{CitationError, RawRecord, Result};

/// Trait for retrieving raw records by source identifier.
pub trait RecordSource {
    /// Fetches every record of one source.
    ///
    /// # Errors
    ///
    /// Returns `CitationError` when the source cannot be read or its payload
    /// is malformed.
    fn fetch(&self, id: &str) -> Result<Vec<RawRecord>>;
}

impl<F> RecordSource for F
where
    F: Fn(&str) -> Result<Vec<RawRecord>>,
{
    fn fetch(&self, id: &str) -> Result<Vec<RawRecord>> {
        self(id)
    }
}

/// Path of the file holding the records of `id` inside `root`.
fn source_path(root: &Path, id: &str, extension: &str) -> PathBuf {
    root.join(format!("{id}.{extension}"))
}

/// Reads a source file, reporting failures against the source id.
fn read_source(path: &Path, id: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| CitationError::Source {
        id: id.to_string(),
        message: format!("cannot read {}: {e}", path.display()),
    })
}
