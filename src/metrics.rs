use serde::Serialize;

use crate::constants::metrics::{
    DISTRIBUTION_DECIMALS, NEGATIVE_SENTENCE_THRESHOLD, POSITIVE_SENTENCE_THRESHOLD,
};
use crate::data::SentenceSentiment;
use crate::utils::round_to;

/// Polarity breakdown of the sentences in one analysis.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SentenceDistribution {
    /// Sentences considered.
    pub total_sentences: usize,
    /// Mean sentence polarity.
    pub avg_polarity: f64,
    /// Mean sentence subjectivity.
    pub avg_subjectivity: f64,
    /// Sentences with polarity above 0.1.
    pub positive_sentences: usize,
    /// Sentences with polarity below -0.1.
    pub negative_sentences: usize,
    /// Everything else.
    pub neutral_sentences: usize,
}

/// Count positive (> 0.1), negative (< -0.1), and neutral sentences.
/// Averages are rounded to 3 decimals; an empty slice yields all zeros.
pub fn sentence_distribution(sentences: &[SentenceSentiment]) -> SentenceDistribution {
    if sentences.is_empty() {
        return SentenceDistribution::default();
    }
    let total = sentences.len();
    let positive = sentences
        .iter()
        .filter(|entry| entry.polarity > POSITIVE_SENTENCE_THRESHOLD)
        .count();
    let negative = sentences
        .iter()
        .filter(|entry| entry.polarity < NEGATIVE_SENTENCE_THRESHOLD)
        .count();
    let polarity_sum: f64 = sentences.iter().map(|entry| entry.polarity).sum();
    let subjectivity_sum: f64 = sentences.iter().map(|entry| entry.subjectivity).sum();
    SentenceDistribution {
        total_sentences: total,
        avg_polarity: round_to(polarity_sum / total as f64, DISTRIBUTION_DECIMALS),
        avg_subjectivity: round_to(subjectivity_sum / total as f64, DISTRIBUTION_DECIMALS),
        positive_sentences: positive,
        negative_sentences: negative,
        neutral_sentences: total - positive - negative,
    }
}
