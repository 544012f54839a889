//! Sentiment scoring capability.
//!
//! The aggregation core only depends on the `SentimentScorer` contract:
//! blank text is an error, and every score stays inside
//! `polarity in [-1, 1]`, `subjectivity in [0, 1]`. Any implementation
//! (lexicon, model-backed, or a test stub) can be injected.

use std::sync::Arc;

use crate::config::SentenceConfig;
use crate::data::SentimentScore;
use crate::errors::InsightsError;

mod lexicon;
mod sentences;

pub use lexicon::LexiconScorer;
pub use sentences::SentenceScorer;

/// Text-to-sentiment capability consumed by the aggregators.
pub trait SentimentScorer: Send + Sync {
    /// Score `text`. Must return `InsightsError::EmptyInput` for blank text.
    fn score(&self, text: &str) -> Result<SentimentScore, InsightsError>;
}

impl<T: SentimentScorer + ?Sized> SentimentScorer for &T {
    fn score(&self, text: &str) -> Result<SentimentScore, InsightsError> {
        (**self).score(text)
    }
}

impl<T: SentimentScorer + ?Sized> SentimentScorer for Box<T> {
    fn score(&self, text: &str) -> Result<SentimentScore, InsightsError> {
        (**self).score(text)
    }
}

impl<T: SentimentScorer + ?Sized> SentimentScorer for Arc<T> {
    fn score(&self, text: &str) -> Result<SentimentScore, InsightsError> {
        (**self).score(text)
    }
}

/// Sentence-averaging lexicon scorer used by the aggregation pipeline.
pub fn default_scorer(config: SentenceConfig) -> SentenceScorer<LexiconScorer> {
    SentenceScorer::with_config(LexiconScorer::new(), config)
}
