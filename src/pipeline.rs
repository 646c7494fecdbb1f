//! End-to-end pipeline: sources → normalize → aggregate → render → sink.
//!
//! ```rust
//! use citelist::{CitationError, Pipeline, RawRecord};
//!
//! let source = |id: &str| -> citelist::Result<Vec<RawRecord>> {
//!     match id {
//!         "broken" => Err(CitationError::Other("rate limited".to_string())),
//!         _ => {
//!             let mut record = RawRecord::new();
//!             record.insert_bib("title", "A").insert_bib("pub_year", "2024");
//!             Ok(vec![record])
//!         }
//!     }
//! };
//!
//! // A failing source does not stop the others.
//! let mut output = String::new();
//! let report = Pipeline::new(source)
//!     .publish(&["broken", "working"], &mut output)
//!     .unwrap();
//! assert_eq!(report.stats.kept, 1);
//! assert!(output.contains("### 2024"));
//! ```

use tracing::{info, warn};

use crate::aggregate::AggregateStats;
use crate::{
    Aggregator, CitationError, DocumentSink, Normalizer, Publication, RecordSource, Renderer,
    Result,
};

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct Report {
    /// The rendered document
    pub document: String,
    /// Publications in output order
    pub publications: Vec<Publication>,
    /// Stage counts
    pub stats: AggregateStats,
}

/// Drives a [`RecordSource`] through every stage.
#[derive(Debug, Clone)]
pub struct Pipeline<S> {
    source: S,
    normalizer: Normalizer,
    aggregator: Aggregator,
    renderer: Renderer,
}

impl<S: RecordSource> Pipeline<S> {
    /// Creates a pipeline with default stages.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            normalizer: Normalizer::new(),
            aggregator: Aggregator::new(),
            renderer: Renderer::new(),
        }
    }

    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    #[must_use]
    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Fetches and normalizes every source, in order.
    ///
    /// A source that fails is logged and contributes nothing.
    pub fn collect<I: AsRef<str>>(&self, ids: &[I]) -> Vec<Vec<Publication>> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                info!(source = id, "fetching publications");
                match self.source.fetch(id) {
                    Ok(records) => {
                        info!(source = id, count = records.len(), "publications found");
                        self.normalizer.normalize_all(&records)
                    }
                    Err(e) => {
                        warn!(source = id, error = %e, "failed to fetch publications");
                        Vec::new()
                    }
                }
            })
            .collect()
    }

    /// Runs every stage and renders the document.
    ///
    /// # Errors
    ///
    /// Returns [`CitationError::NoPublications`] when nothing survives
    /// filtering.
    pub fn build<I: AsRef<str>>(&self, ids: &[I]) -> Result<Report> {
        let (publications, stats) = self.aggregator.aggregate(self.collect(ids));
        if publications.is_empty() {
            return Err(CitationError::NoPublications);
        }
        let document = self.renderer.render(&publications);
        Ok(Report {
            document,
            publications,
            stats,
        })
    }

    /// Builds the document and hands it to `sink`.
    ///
    /// The sink is left untouched when nothing survives filtering, so a
    /// previous document is never overwritten with an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`CitationError::NoPublications`] on an empty result, or the
    /// sink's error.
    pub fn publish<I: AsRef<str>, K: DocumentSink + ?Sized>(
        &self,
        ids: &[I],
        sink: &mut K,
    ) -> Result<Report> {
        let report = self.build(ids)?;
        sink.write(&report.document)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{AggregatorConfig, is_ordered};
    use crate::RawRecord;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn records(values: Vec<Value>) -> Vec<RawRecord> {
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect()
    }

    fn profile_source(id: &str) -> Result<Vec<RawRecord>> {
        match id {
            "first" => Ok(records(vec![
                json!({
                    "bib": {
                        "title": "X",
                        "pub_year": "2020",
                        "author": "John Smith",
                        "journal": "Nature",
                        "volume": "10",
                        "number": "2",
                        "pages": "1-5",
                        "doi": "10.1/xyz",
                    }
                }),
                json!({"bib": {"title": "Old Work", "pub_year": "2012", "venue": "Old"}}),
                json!({"bib": {"title": "Undated", "venue": "Somewhere"}}),
            ])),
            "second" => Ok(records(vec![
                json!({
                    "bib": {"title": "x", "pub_year": "2023", "author": "Someone Else"},
                }),
                json!({
                    "bib": {
                        "title": "Zeta <b>study</b>",
                        "pub_year": 2020,
                        "author": "A B, C D, E F, G H",
                        "conference": "NeurIPS",
                    },
                    "eprint_url": "https://arxiv.org/pdf/1.pdf",
                }),
                json!({"bib": {"pub_year": "2021"}}),
                json!({
                    "bib": {"title": "Linked", "pub_year": "2021", "publisher": "ACM"},
                    "pub_url": "https://doi.org/10.5/linked",
                }),
            ])),
            "broken" => Err(CitationError::Other("rate limited".to_string())),
            _ => Ok(Vec::new()),
        }
    }

    const EXPECTED: &str = "---\ntitle: \"Publications\"\n---\n\n\
This page was auto-generated using data from Google Scholar.\n\n\
### 2021\n\n\
Unknown Authors (2021). Linked. *ACM*. [DOI](https://doi.org/10.5/linked)\n\n\
\n### 2020\n\n\
B, A., D, C., F, E. et al. (2020). Zeta study. *NeurIPS*. [OA](https://arxiv.org/pdf/1.pdf)\n\n\
Smith, J. (2020). X. *Nature*, **10**(2), 1-5. [DOI](https://doi.org/10.1/xyz)\n\n";

    #[test]
    fn test_build_document() {
        let report = Pipeline::new(profile_source)
            .build(&["first", "broken", "second", "empty"])
            .unwrap();

        assert_eq!(report.document, EXPECTED);
        assert_eq!(
            report.stats,
            AggregateStats {
                fetched: 7,
                unique: 6,
                kept: 4
            }
        );
        // the untitled 2021 record is kept by the aggregator but not rendered
        assert_eq!(report.publications.len(), 4);
        assert!(
            report
                .publications
                .windows(2)
                .all(|w| is_ordered(&w[0], &w[1]))
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let pipeline = Pipeline::new(profile_source);
        let first = pipeline.build(&["first", "second"]).unwrap();
        let second = pipeline.build(&["first", "second"]).unwrap();
        assert_eq!(first.document, second.document);
    }

    #[test]
    fn test_collect_isolates_failing_sources() {
        let collected = Pipeline::new(profile_source).collect(&["broken", "first"]);
        assert_eq!(collected.len(), 2);
        assert!(collected[0].is_empty());
        assert_eq!(collected[1].len(), 3);
    }

    #[test]
    fn test_empty_result_leaves_sink_untouched() {
        let mut sink = String::from("previous document");
        let err = Pipeline::new(profile_source)
            .publish(&["broken", "empty"], &mut sink)
            .unwrap_err();
        assert!(matches!(err, CitationError::NoPublications));
        assert_eq!(sink, "previous document");
    }

    #[test]
    fn test_everything_filtered_is_no_publications() {
        let pipeline = Pipeline::new(profile_source)
            .with_aggregator(Aggregator::new().with_config(AggregatorConfig { min_year: 2030 }));
        assert!(matches!(
            pipeline.build(&["first", "second"]),
            Err(CitationError::NoPublications)
        ));
    }

    #[test]
    fn test_publish_writes_document() {
        let mut sink = String::new();
        let report = Pipeline::new(profile_source)
            .publish(&["first", "second"], &mut sink)
            .unwrap();
        assert_eq!(sink, report.document);
    }
}
