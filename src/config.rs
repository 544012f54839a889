use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analytics::Granularity;
use crate::constants::analytics::{DEFAULT_DIVERGENCE_THRESHOLD, DEFAULT_TOP_WORDS};
use crate::constants::fields;
use crate::constants::sentiment::DEFAULT_MIN_SENTENCE_WORDS;
use crate::errors::InsightsError;
use crate::transport::fs::temp_path_for;

/// Record field used to group reviews before aggregation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// Group by product identifier (`asin`).
    #[default]
    Product,
    /// Group by reviewer identifier (`reviewerID`).
    Reviewer,
}

impl GroupBy {
    /// Source field name, also used as the key field in serialized summaries.
    pub const fn field_name(self) -> &'static str {
        match self {
            GroupBy::Product => fields::PRODUCT_ID,
            GroupBy::Reviewer => fields::REVIEWER_ID,
        }
    }
}

/// Controls how whole-text scores are derived from sentences.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SentenceConfig {
    /// Sentences with fewer whitespace-separated words are left out of the average.
    pub min_sentence_words: usize,
}

impl Default for SentenceConfig {
    fn default() -> Self {
        Self {
            min_sentence_words: DEFAULT_MIN_SENTENCE_WORDS,
        }
    }
}

/// Explicit configuration for one aggregation run.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Line-delimited JSON review file.
    pub input_path: PathBuf,
    /// Where the summary array is written; `None` keeps results in memory only.
    pub output_path: Option<PathBuf>,
    /// Grouping key for the batch aggregation.
    pub group_by: GroupBy,
    /// Sentence-level scoring behavior.
    pub sentences: SentenceConfig,
    /// Score groups on the rayon pool instead of the calling thread.
    pub parallel: bool,
}

impl PipelineConfig {
    /// Create a config reading from `input_path` with default settings.
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: None,
            group_by: GroupBy::default(),
            sentences: SentenceConfig::default(),
            parallel: false,
        }
    }

    /// Write the summaries to `output_path` when the run succeeds.
    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(output_path.into());
        self
    }

    /// Override the grouping key.
    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    /// Override the sentence word-count threshold.
    pub fn with_min_sentence_words(mut self, min_sentence_words: usize) -> Self {
        self.sentences.min_sentence_words = min_sentence_words;
        self
    }

    /// Enable or disable parallel group scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reject configurations that cannot produce a run.
    pub fn validate(&self) -> Result<(), InsightsError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(InsightsError::Configuration(
                "input_path must not be empty".to_string(),
            ));
        }
        if let Some(output) = &self.output_path {
            check_output_path(&self.input_path, output)?;
        }
        Ok(())
    }
}

/// Settings for the rating analytics run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalyticsConfig {
    /// Reviewers whose mean rating deviation exceeds this are divergent.
    pub divergence_threshold: f64,
    /// Words reported per star-rating bucket.
    pub top_words: usize,
    /// Calendar granularity of the corpus-wide temporal buckets.
    pub granularity: Granularity,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            divergence_threshold: DEFAULT_DIVERGENCE_THRESHOLD,
            top_words: DEFAULT_TOP_WORDS,
            granularity: Granularity::YearMonth,
        }
    }
}

impl AnalyticsConfig {
    /// Override the divergence threshold.
    pub fn with_divergence_threshold(mut self, divergence_threshold: f64) -> Self {
        self.divergence_threshold = divergence_threshold;
        self
    }

    /// Override the number of words per rating bucket.
    pub fn with_top_words(mut self, top_words: usize) -> Self {
        self.top_words = top_words;
        self
    }

    /// Override the temporal bucket granularity.
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }
}

/// Reject an output path whose write would clobber `input`, either directly
/// or through the temp file staged next to it.
pub fn check_output_path(input: &Path, output: &Path) -> Result<(), InsightsError> {
    if output.as_os_str().is_empty() {
        return Err(InsightsError::Configuration(
            "output_path must not be empty when set".to_string(),
        ));
    }
    if output == input {
        return Err(InsightsError::Configuration(format!(
            "output_path {} would overwrite the input",
            output.display()
        )));
    }
    let staging = temp_path_for(output);
    if staging == input {
        return Err(InsightsError::Configuration(format!(
            "output_path {} stages through {}, which is the input",
            output.display(),
            staging.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = PipelineConfig::new("reviews.json")
            .with_output_path("summaries.json")
            .with_group_by(GroupBy::Reviewer)
            .with_min_sentence_words(5)
            .with_parallel(true);
        assert_eq!(config.group_by, GroupBy::Reviewer);
        assert_eq!(config.sentences.min_sentence_words, 5);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_and_clobbering_paths() {
        assert!(matches!(
            PipelineConfig::new("").validate(),
            Err(InsightsError::Configuration(_))
        ));
        assert!(matches!(
            PipelineConfig::new("reviews.json")
                .with_output_path("reviews.json")
                .validate(),
            Err(InsightsError::Configuration(_))
        ));
    }

    #[test]
    fn validate_rejects_output_staging_over_the_input() {
        let config =
            PipelineConfig::new("data/reviews.json.tmp").with_output_path("data/reviews.json");
        assert!(matches!(
            config.validate(),
            Err(InsightsError::Configuration(_))
        ));
        assert!(
            PipelineConfig::new("data/reviews.tmp")
                .with_output_path("data/reviews.json")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn analytics_defaults_and_overrides() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.divergence_threshold, 1.0);
        assert_eq!(config.top_words, 20);
        assert_eq!(config.granularity, Granularity::YearMonth);

        let config = config
            .with_divergence_threshold(0.5)
            .with_top_words(3)
            .with_granularity(Granularity::Year);
        assert_eq!(config.divergence_threshold, 0.5);
        assert_eq!(config.top_words, 3);
        assert_eq!(config.granularity, Granularity::Year);
    }

    #[test]
    fn group_by_field_names_match_source_fields() {
        assert_eq!(GroupBy::Product.field_name(), "asin");
        assert_eq!(GroupBy::Reviewer.field_name(), "reviewerID");
    }
}
