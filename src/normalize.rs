//! Record normalization.
//!
//! Converts a [`RawRecord`] into a [`Publication`]. Every logical field is
//! resolved through an ordered list of [`Candidate`]s: the first candidate
//! whose cleaned value is non-empty wins. Nothing here fails; a record with no
//! usable fields becomes a publication with every field absent.
//!
//! # Example
//!
//! ```
//! use citelist::normalize::{Field, FieldMap, Normalizer};
//! use citelist::record::{Candidate, RawRecord};
//!
//! let mut raw = RawRecord::new();
//! raw.insert("Paper Title", "Example").insert("Published", 2021);
//!
//! let mut fields = FieldMap::new();
//! fields
//!     .set_candidates(Field::Title, vec![Candidate::bib("Paper Title")])
//!     .set_candidates(Field::Year, vec![Candidate::bib("Published")]);
//!
//! let publication = Normalizer::new().with_fields(fields).normalize(&raw);
//! assert_eq!(publication.title.as_deref(), Some("Example"));
//! assert_eq!(publication.year.as_deref(), Some("2021"));
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::Publication;
use crate::authors::format_authors;
use crate::record::{Candidate, RawRecord};
use crate::utils::{clean_text, doi_from_link};

/// Number of records per batch whose available keys are logged.
const LOGGED_SAMPLE_RECORDS: usize = 3;

/// Logical publication fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Year,
    Authors,
    Venue,
    Volume,
    Issue,
    Pages,
    Identifier,
    Link,
}

/// Default candidate chains, in priority order.
///
/// `true` marks a [`Candidate::Bib`] key, read from the nested `bib` object of
/// profile records (or the top level of flat records). Link fields only exist
/// at the top level.
const DEFAULT_FIELDS: &[(Field, &[(bool, &str)])] = &[
    (Field::Title, &[(true, "title")]),
    (Field::Year, &[(true, "pub_year"), (true, "year")]),
    (Field::Authors, &[(true, "author"), (true, "authors")]),
    (
        Field::Venue,
        &[
            (true, "venue"),
            (true, "journal"),
            (true, "booktitle"),
            (true, "conference"),
            (true, "publisher"),
        ],
    ),
    (Field::Volume, &[(true, "volume")]),
    (Field::Issue, &[(true, "number"), (true, "issue")]),
    (Field::Pages, &[(true, "pages")]),
    (Field::Identifier, &[(true, "doi"), (true, "DOI")]),
    (Field::Link, &[(false, "eprint_url"), (false, "pub_url")]),
];

/// Ordered candidate chains for each logical field.
///
/// # Examples
///
/// ```
/// use citelist::normalize::{Field, FieldMap};
/// use citelist::record::Candidate;
///
/// let mut fields = FieldMap::new();
/// fields.set_candidates(Field::Venue, vec![Candidate::bib("source")]);
/// assert_eq!(fields.candidates(Field::Venue), &[Candidate::bib("source")]);
/// ```
#[derive(Debug, Clone)]
pub struct FieldMap {
    candidates: HashMap<Field, Vec<Candidate>>,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMap {
    /// Creates a field map with the default candidate chains.
    #[must_use]
    pub fn new() -> Self {
        let mut map = Self {
            candidates: HashMap::new(),
        };
        map.set_default_candidates();
        map
    }

    fn set_default_candidates(&mut self) {
        for (field, keys) in DEFAULT_FIELDS {
            self.candidates.insert(
                *field,
                keys.iter()
                    .map(|&(bib, key)| {
                        if bib {
                            Candidate::bib(key)
                        } else {
                            Candidate::record(key)
                        }
                    })
                    .collect(),
            );
        }
    }

    /// Replaces the candidate chain of a field.
    pub fn set_candidates(&mut self, field: Field, candidates: Vec<Candidate>) -> &mut Self {
        self.candidates.insert(field, candidates);
        self
    }

    /// Returns the candidate chain of a field.
    pub fn candidates(&self, field: Field) -> &[Candidate] {
        self.candidates
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolves a field: the first candidate with non-empty cleaned text.
    pub fn resolve(&self, record: &RawRecord, field: Field) -> Option<String> {
        self.candidates(field)
            .iter()
            .filter_map(|candidate| record.text(candidate))
            .map(|value| clean_text(&value))
            .find(|value| !value.is_empty())
    }
}

/// Converts raw records into publications.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    fields: FieldMap,
}

impl Normalizer {
    /// Creates a normalizer using the default field chains.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses custom field chains.
    #[must_use]
    pub fn with_fields(mut self, fields: FieldMap) -> Self {
        self.fields = fields;
        self
    }

    /// Normalizes a single record.
    pub fn normalize(&self, record: &RawRecord) -> Publication {
        let resolve = |field| self.fields.resolve(record, field);

        let link = resolve(Field::Link);
        let identifier = resolve(Field::Identifier)
            .or_else(|| link.as_deref().and_then(doi_from_link));

        Publication {
            title: resolve(Field::Title),
            year: resolve(Field::Year),
            authors: resolve(Field::Authors).and_then(|a| format_authors(&a)),
            venue: resolve(Field::Venue),
            volume: resolve(Field::Volume),
            issue: resolve(Field::Issue),
            pages: resolve(Field::Pages),
            identifier,
            link,
        }
    }

    /// Normalizes a batch of records from one source.
    ///
    /// The keys of the first few records are logged at debug level to help
    /// diagnose sources that name their fields unexpectedly.
    pub fn normalize_all(&self, records: &[RawRecord]) -> Vec<Publication> {
        records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                if i < LOGGED_SAMPLE_RECORDS {
                    debug!(index = i + 1, keys = ?record.keys(), "record fields");
                }
                self.normalize(record)
            })
            .collect()
    }
}
