//! JSON files as record sources.

use std::path::PathBuf;

use serde::Deserialize;

use super::{read_source, source_path};
use crate::{RawRecord, RecordSource, Result};

/// Accepted file layouts: a bare array of records, or a profile dump with a
/// `publications` array.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPayload {
    Records(Vec<RawRecord>),
    Profile { publications: Vec<RawRecord> },
}

/// Reads the records of source `id` from `<root>/<id>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl RecordSource for JsonDirSource {
    fn fetch(&self, id: &str) -> Result<Vec<RawRecord>> {
        let path = source_path(&self.root, id, "json");
        let text = read_source(&path, id)?;
        let records = match serde_json::from_str::<JsonPayload>(&text)? {
            JsonPayload::Records(records) => records,
            JsonPayload::Profile { publications } => publications,
        };
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CitationError;
    use crate::record::Candidate;

    #[test]
    fn test_fetch_record_array() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.json"),
            r#"[{"bib": {"title": "One"}}, {"title": "Two", "year": 2020}]"#,
        )
        .unwrap();

        let records = JsonDirSource::new(dir.path()).fetch("a").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text(&Candidate::bib("title")).as_deref(), Some("One"));
        assert_eq!(records[1].text(&Candidate::bib("year")).as_deref(), Some("2020"));
    }

    #[test]
    fn test_fetch_profile_dump() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("p.json"),
            r#"{"name": "Someone", "publications": [{"bib": {"title": "One"}}]}"#,
        )
        .unwrap();

        let records = JsonDirSource::new(dir.path()).fetch("p").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_fetch_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();

        let err = JsonDirSource::new(dir.path()).fetch("bad").unwrap_err();
        assert!(matches!(err, CitationError::InvalidFormat(_)));
    }

    #[test]
    fn test_fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonDirSource::new(dir.path()).fetch("nope").unwrap_err();
        assert!(matches!(err, CitationError::Source { .. }));
    }
}
