use tracing::{debug, trace};

use crate::config::SentenceConfig;
use crate::constants::sentiment::SUMMARY_DECIMALS;
use crate::data::{SentenceAnalysis, SentenceSentiment, SentimentScore};
use crate::errors::InsightsError;
use crate::sentiment::SentimentScorer;
use crate::utils::{round_to, sentences, word_count};

/// Scores text sentence by sentence and averages the results.
///
/// Sentences shorter than `min_sentence_words` are left out. When no
/// sentence qualifies, the whole-text score is `0.0, 0.0`.
#[derive(Clone, Debug, Default)]
pub struct SentenceScorer<S> {
    inner: S,
    config: SentenceConfig,
}

impl<S: SentimentScorer> SentenceScorer<S> {
    /// Wrap `inner` with the default sentence threshold.
    pub fn new(inner: S) -> Self {
        Self::with_config(inner, SentenceConfig::default())
    }

    /// Wrap `inner` with an explicit sentence configuration.
    pub fn with_config(inner: S, config: SentenceConfig) -> Self {
        Self { inner, config }
    }

    /// Active sentence configuration.
    pub fn config(&self) -> SentenceConfig {
        self.config
    }

    /// Per-sentence scores plus their 4-decimal average.
    pub fn analyze(&self, text: &str) -> Result<SentenceAnalysis, InsightsError> {
        if text.trim().is_empty() {
            return Err(InsightsError::EmptyInput);
        }

        let mut results = Vec::new();
        let mut total_polarity = 0.0;
        let mut total_subjectivity = 0.0;

        for sentence in sentences(text.trim()) {
            let words = word_count(&sentence);
            if words < self.config.min_sentence_words {
                trace!("[reviews:sentences] skipping {words}-word sentence");
                continue;
            }
            let score = self.inner.score(&sentence)?;
            total_polarity += score.polarity;
            total_subjectivity += score.subjectivity;
            results.push(SentenceSentiment {
                sentence,
                polarity: score.polarity,
                subjectivity: score.subjectivity,
                word_count: words,
            });
        }

        debug!("[reviews:sentences] analyzed {} sentences", results.len());

        let summary = if results.is_empty() {
            SentimentScore::default()
        } else {
            let count = results.len() as f64;
            SentimentScore {
                polarity: round_to(total_polarity / count, SUMMARY_DECIMALS),
                subjectivity: round_to(total_subjectivity / count, SUMMARY_DECIMALS),
            }
        };
        Ok(SentenceAnalysis {
            sentences: results,
            summary,
        })
    }
}

impl<S: SentimentScorer> SentimentScorer for SentenceScorer<S> {
    fn score(&self, text: &str) -> Result<SentimentScore, InsightsError> {
        self.analyze(text).map(|analysis| analysis.summary)
    }
}
