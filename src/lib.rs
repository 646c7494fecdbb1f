//! Turn loosely-structured publication records into an APA-style citation list.
//!
//! `citelist` takes raw records fetched from academic profile sources,
//! normalizes them, merges the sources, drops duplicates and old entries,
//! and renders a year-grouped Markdown document.
//!
//! # Pipeline
//!
//! 1. **Normalize**: [`normalize::Normalizer`] resolves every field through an
//!    ordered list of candidate keys and cleans markup out of the values.
//! 2. **Format authors**: [`authors::format_authors`] produces
//!    `"Smith, J. & Doe, J."`-style author lists.
//! 3. **Aggregate**: [`aggregate::Aggregator`] merges sources, deduplicates by
//!    title, keeps recent years and sorts newest first.
//! 4. **Render**: [`render::Renderer`] emits the document with `### <year>`
//!    sections.
//!
//! [`pipeline::Pipeline`] chains the stages together, isolating per-source
//! failures.
//!
//! # Basic Usage
//!
//! ```rust
//! use citelist::pipeline::Pipeline;
//! use citelist::RawRecord;
//! use serde_json::json;
//!
//! let source = |_id: &str| -> citelist::Result<Vec<RawRecord>> {
//!     Ok(vec![serde_json::from_value(json!({
//!         "bib": {
//!             "title": "Example Article",
//!             "pub_year": "2023",
//!             "author": "John Smith",
//!             "journal": "Nature",
//!         }
//!     }))?])
//! };
//!
//! let report = Pipeline::new(source).build(&["profile-a"]).unwrap();
//! assert!(report.document.contains("### 2023"));
//! assert!(report.document.contains("Smith, J. (2023). Example Article. *Nature*."));
//! ```
//!
//! # Error Handling
//!
//! The library uses a custom [`Result`] type that wraps [`CitationError`].
//! Missing or malformed fields never produce errors; they degrade to absent
//! values. The only hard failure is [`CitationError::NoPublications`], raised
//! when nothing survives filtering so that no output gets overwritten.
//!
//! ```rust
//! use citelist::{CitationError, pipeline::Pipeline, RawRecord};
//!
//! let empty = |_id: &str| -> citelist::Result<Vec<RawRecord>> { Ok(Vec::new()) };
//! match Pipeline::new(empty).build(&["profile-a"]) {
//!     Err(CitationError::NoPublications) => eprintln!("nothing to write"),
//!     Err(e) => eprintln!("error: {e}"),
//!     Ok(report) => println!("{}", report.document),
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod aggregate;
pub mod authors;
pub mod normalize;
pub mod pipeline;
pub mod record;
mod regex;
pub mod render;
pub mod sink;
pub mod source;
mod utils;

// Reexports
pub use aggregate::Aggregator;
pub use normalize::Normalizer;
pub use pipeline::Pipeline;
pub use record::RawRecord;
pub use render::Renderer;
pub use sink::DocumentSink;
pub use source::RecordSource;
pub use utils::clean_text;

/// Text rendered for a missing title.
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Text rendered for a missing year.
pub const UNKNOWN_YEAR: &str = "Unknown Year";
/// Text rendered for a missing venue.
pub const UNKNOWN_VENUE: &str = "Unknown Journal";
pub use authors::UNKNOWN_AUTHORS;

/// A specialized Result type for citation operations.
pub type Result<T> = std::result::Result<T, CitationError>;

/// Represents errors that can occur while building a citation list.
#[derive(Error, Debug)]
pub enum CitationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    InvalidFormat(String),

    #[error("Source '{id}' failed: {message}")]
    Source { id: String, message: String },

    #[error("No publications survived filtering")]
    NoPublications,

    #[error("Error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for CitationError {
    fn from(err: serde_json::Error) -> Self {
        CitationError::InvalidFormat(err.to_string())
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for CitationError {
    fn from(err: csv::Error) -> Self {
        CitationError::InvalidFormat(err.to_string())
    }
}

/// A normalized publication.
///
/// Absent data is `None`; every `Some` value is non-empty. Placeholder text
/// such as `"Unknown Title"` only appears through the `display_*` accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Title with markup removed
    pub title: Option<String>,
    /// Publication year as found in the record
    pub year: Option<String>,
    /// APA-formatted author list
    pub authors: Option<String>,
    /// Journal, conference or publisher
    pub venue: Option<String>,
    /// Volume number
    pub volume: Option<String>,
    /// Issue number
    pub issue: Option<String>,
    /// Page range
    pub pages: Option<String>,
    /// Digital Object Identifier
    pub identifier: Option<String>,
    /// External link to the work
    pub link: Option<String>,
}

impl Publication {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN_TITLE)
    }

    pub fn display_year(&self) -> &str {
        self.year.as_deref().unwrap_or(UNKNOWN_YEAR)
    }

    pub fn display_authors(&self) -> &str {
        self.authors.as_deref().unwrap_or(UNKNOWN_AUTHORS)
    }

    pub fn display_venue(&self) -> &str {
        self.venue.as_deref().unwrap_or(UNKNOWN_VENUE)
    }

    /// Key used to detect duplicates across sources.
    pub fn dedup_key(&self) -> String {
        self.display_title().to_lowercase()
    }

    /// Returns true when the record has neither a title nor a venue.
    pub fn is_blank(&self) -> bool {
        self.title.is_none() && self.venue.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_error_display() {
        let error = CitationError::InvalidFormat("Invalid line".to_string());
        assert_eq!(error.to_string(), "Parse error: Invalid line");

        let error = CitationError::Source {
            id: "abc".to_string(),
            message: "timed out".to_string(),
        };
        assert_eq!(error.to_string(), "Source 'abc' failed: timed out");
    }

    #[test]
    fn test_publication_placeholders() {
        let publication = Publication::default();
        assert_eq!(publication.display_title(), "Unknown Title");
        assert_eq!(publication.display_year(), "Unknown Year");
        assert_eq!(publication.display_authors(), "Unknown Authors");
        assert_eq!(publication.display_venue(), "Unknown Journal");
        assert_eq!(publication.dedup_key(), "unknown title");
        assert!(publication.is_blank());
    }

    #[test]
    fn test_dedup_key_is_case_insensitive() {
        let a = Publication {
            title: Some("Deep Learning".to_string()),
            ..Default::default()
        };
        let b = Publication {
            title: Some("DEEP learning".to_string()),
            venue: Some("Nature".to_string()),
            ..Default::default()
        };
        assert_eq!(a.dedup_key(), b.dedup_key());
        assert!(!a.is_blank());
        assert!(!b.is_blank());
    }
}
