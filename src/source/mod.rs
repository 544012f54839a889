//! Review sources and loading helpers.
//!
//! - `ReviewSource` is the pipeline-facing interface that yields validated records.
//! - `JsonlReviewSource` reads the line-delimited review corpus.
//! - `InMemorySource` serves pre-built records (tests, embedding callers).
//! - `product_texts` reads the sampled `{asin: [text, ...]}` corpus format.

use crate::data::ReviewRecord;
use crate::errors::InsightsError;

/// Source implementation modules.
pub mod sources;
/// Utility helpers used by source consumers.
pub mod utilities;

pub use sources::jsonl_source::{JsonlReviewSource, load_reviews};
pub use sources::product_texts::{ProductTexts, load_product_texts};

/// Line accounting for one load. Informational only; skips are never errors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines read from the input, blank lines included.
    pub lines: usize,
    /// Lines that decoded as JSON.
    pub decoded: usize,
    /// Records that passed validation.
    pub retained: usize,
}

impl LoadStats {
    /// Lines that were dropped for any reason.
    pub fn skipped(&self) -> usize {
        self.lines.saturating_sub(self.retained)
    }
}

/// Records produced by a source, in input order.
#[derive(Clone, Debug, Default)]
pub struct LoadedReviews {
    /// Validated records.
    pub records: Vec<ReviewRecord>,
    /// Line accounting for the load.
    pub stats: LoadStats,
}

/// Pipeline-facing review source.
///
/// For a fixed input, `load` must return the same records in the same order.
pub trait ReviewSource: Send + Sync {
    /// Stable identifier used in log lines.
    fn id(&self) -> &str;
    /// Materialize every validated record.
    fn load(&self) -> Result<LoadedReviews, InsightsError>;
}

/// Source that serves a fixed list of records.
#[derive(Clone, Debug)]
pub struct InMemorySource {
    id: String,
    records: Vec<ReviewRecord>,
}

impl InMemorySource {
    /// Create a source named `id` over `records`.
    pub fn new(id: impl Into<String>, records: Vec<ReviewRecord>) -> Self {
        Self {
            id: id.into(),
            records,
        }
    }
}

impl ReviewSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self) -> Result<LoadedReviews, InsightsError> {
        let count = self.records.len();
        Ok(LoadedReviews {
            records: self.records.clone(),
            stats: LoadStats {
                lines: count,
                decoded: count,
                retained: count,
            },
        })
    }
}
