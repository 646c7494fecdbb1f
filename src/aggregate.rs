//! Merging, deduplication, filtering and ordering of publications.
//!
//! ## Usage
//!
//! ```rust
//! use citelist::{Aggregator, Publication};
//! use citelist::aggregate::AggregatorConfig;
//!
//! let paper = |title: &str, year: &str| Publication {
//!     title: Some(title.to_string()),
//!     year: Some(year.to_string()),
//!     ..Default::default()
//! };
//!
//! let first_source = vec![paper("Alpha", "2020"), paper("Old", "2015")];
//! let second_source = vec![paper("ALPHA", "2021"), paper("Beta", "2022")];
//!
//! let aggregator = Aggregator::new().with_config(AggregatorConfig { min_year: 2019 });
//! let (publications, stats) = aggregator.aggregate(vec![first_source, second_source]);
//!
//! let titles: Vec<_> = publications.iter().map(|p| p.display_title()).collect();
//! assert_eq!(titles, ["Beta", "Alpha"]);
//! assert_eq!(stats.fetched, 4);
//! assert_eq!(stats.unique, 3);
//! assert_eq!(stats.kept, 2);
//! ```
//!
//! ## Ordering
//!
//! Publications are ordered newest year first. Within a year, titles are
//! compared in *descending* order, so `"Zebra"` comes before `"Apple"`. The
//! sort is stable, so exact ties keep their merge order.

use std::cmp::Ordering;

use itertools::Itertools;
use tracing::{debug, info};

use crate::Publication;
use crate::utils::parse_year;

/// Earliest year kept by default.
pub const DEFAULT_MIN_YEAR: i64 = 2019;

/// Configuration for the aggregation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Publications older than this year are dropped.
    pub min_year: i64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
        }
    }
}

/// Counts reported by [`Aggregator::aggregate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    /// Publications across all sources before deduplication
    pub fetched: usize,
    /// Publications left after deduplication
    pub unique: usize,
    /// Publications left after year filtering
    pub kept: usize,
}

/// Combines per-source publication lists into one ordered list.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    /// Creates an aggregator keeping publications from 2019 onwards.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a custom configuration.
    #[must_use]
    pub fn with_config(mut self, config: AggregatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Runs merge, dedupe, filter and sort over the per-source lists.
    pub fn aggregate(&self, sources: Vec<Vec<Publication>>) -> (Vec<Publication>, AggregateStats) {
        let merged = merge(sources);
        let fetched = merged.len();
        info!(count = fetched, "total publications fetched");

        let unique = dedupe(merged);
        info!(count = unique.len(), "unique publications after deduplication");

        let unique_count = unique.len();
        let filtered = filter_by_year(unique, self.config.min_year);
        info!(
            count = filtered.len(),
            min_year = self.config.min_year,
            "publications after year filtering"
        );

        let stats = AggregateStats {
            fetched,
            unique: unique_count,
            kept: filtered.len(),
        };
        (sort(filtered), stats)
    }
}

/// Concatenates source lists in source order.
pub fn merge(sources: Vec<Vec<Publication>>) -> Vec<Publication> {
    sources.into_iter().flatten().collect()
}

/// Keeps the first publication seen for each lowercased title.
pub fn dedupe(publications: Vec<Publication>) -> Vec<Publication> {
    publications
        .into_iter()
        .unique_by(Publication::dedup_key)
        .collect()
}

/// Keeps publications whose year parses as an integer `>= min_year`.
///
/// Publications with a missing or non-numeric year are dropped.
pub fn filter_by_year(publications: Vec<Publication>, min_year: i64) -> Vec<Publication> {
    publications
        .into_iter()
        .filter(|p| {
            p.year
                .as_deref()
                .and_then(parse_year)
                .is_some_and(|year| year >= min_year)
        })
        .collect()
}

/// Orders publications by year descending, then title descending.
///
/// Years that are not plain digit strings sort as `0`. If a digit string
/// cannot be represented as an integer the whole list is ordered by title
/// ascending instead.
pub fn sort(publications: Vec<Publication>) -> Vec<Publication> {
    let keys: Option<Vec<i64>> = publications.iter().map(sort_year).collect();
    let mut keyed: Vec<_> = publications.into_iter().enumerate().collect();

    match keys {
        Some(keys) => {
            keyed.sort_by(|(a_idx, a), (b_idx, b)| {
                keys[*b_idx]
                    .cmp(&keys[*a_idx])
                    .then_with(|| b.display_title().cmp(a.display_title()))
            });
        }
        None => {
            debug!("unrepresentable year found, ordering by title only");
            keyed.sort_by(|(_, a), (_, b)| a.display_title().cmp(b.display_title()));
        }
    }

    keyed.into_iter().map(|(_, p)| p).collect()
}

/// Numeric sort year: `Some(0)` for non-digit years, `None` on overflow.
fn sort_year(publication: &Publication) -> Option<i64> {
    let year = publication.display_year();
    if !year.is_empty() && year.bytes().all(|b| b.is_ascii_digit()) {
        year.parse().ok()
    } else {
        Some(0)
    }
}

/// Returns true when `first` may precede `second` in sorted output.
pub fn is_ordered(first: &Publication, second: &Publication) -> bool {
    let (Some(a), Some(b)) = (sort_year(first), sort_year(second)) else {
        return true;
    };
    match a.cmp(&b) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => first.display_title() >= second.display_title(),
    }
}
