//! Lexicon-based whole-text sentiment scorer.
//!
//! Each known word carries a `(polarity, subjectivity)` pair. Intensifiers
//! scale the next sentiment word, negations flip and damp its polarity, and
//! the text score is the mean over every sentiment-bearing word.

use crate::constants::sentiment::{NEGATION_FACTOR, SCORE_DECIMALS};
use crate::data::SentimentScore;
use crate::errors::InsightsError;
use crate::sentiment::SentimentScorer;
use crate::utils::round_to;

/// Sorted `(word, polarity, subjectivity)` entries.
const LEXICON: &[(&str, f64, f64)] = &[
    ("allergic", -0.2, 0.6),
    ("amazing", 0.6, 0.9),
    ("annoying", -0.8, 0.9),
    ("awesome", 1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.667),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("boring", -1.0, 1.0),
    ("broke", -0.4, 0.6),
    ("broken", -0.4, 0.4),
    ("cheap", 0.4, 0.7),
    ("clean", 0.367, 0.683),
    ("comfortable", 0.4, 0.7),
    ("dirty", -0.6, 0.8),
    ("disappointed", -0.75, 0.75),
    ("disappointing", -0.6, 0.7),
    ("disgusting", -1.0, 1.0),
    ("easy", 0.433, 0.833),
    ("effective", 0.6, 0.8),
    ("excellent", 1.0, 1.0),
    ("expensive", -0.5, 0.7),
    ("fabulous", 0.4, 0.9),
    ("fake", -0.5, 1.0),
    ("fantastic", 0.4, 0.9),
    ("favorite", 0.5, 1.0),
    ("fine", 0.417, 0.5),
    ("fresh", 0.3, 0.5),
    ("gentle", 0.3, 0.6),
    ("glad", 0.5, 1.0),
    ("good", 0.7, 0.6),
    ("gorgeous", 0.7, 1.0),
    ("great", 0.8, 0.75),
    ("greasy", -0.5, 0.7),
    ("happy", 0.8, 1.0),
    ("harsh", -0.2, 0.6),
    ("hate", -0.8, 0.9),
    ("horrible", -1.0, 1.0),
    ("ideal", 0.9, 0.9),
    ("impressed", 1.0, 1.0),
    ("incredible", 0.9, 0.9),
    ("irritated", -0.5, 0.8),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("lovely", 0.5, 0.75),
    ("luxurious", 0.5, 0.8),
    ("mediocre", -0.2, 0.5),
    ("nice", 0.6, 1.0),
    ("ok", 0.5, 0.5),
    ("okay", 0.5, 0.5),
    ("perfect", 1.0, 1.0),
    ("pleasant", 0.733, 0.967),
    ("poor", -0.4, 0.6),
    ("pretty", 0.25, 1.0),
    ("recommend", 0.3, 0.4),
    ("refreshing", 0.5, 0.7),
    ("rich", 0.375, 0.625),
    ("sad", -0.5, 1.0),
    ("smooth", 0.4, 0.7),
    ("soft", 0.1, 0.4),
    ("sticky", -0.3, 0.6),
    ("strong", 0.433, 0.733),
    ("stupid", -0.8, 1.0),
    ("superb", 1.0, 1.0),
    ("sure", 0.5, 0.889),
    ("terrible", -1.0, 1.0),
    ("ugly", -0.7, 1.0),
    ("unhappy", -0.6, 0.9),
    ("useless", -0.5, 0.2),
    ("waste", -0.5, 0.5),
    ("weak", -0.375, 0.625),
    ("wonderful", 1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("worthless", -0.8, 0.9),
    ("wrong", -0.5, 0.9),
];

/// Sorted `(word, multiplier)` entries applied to the next sentiment word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.4),
    ("completely", 1.3),
    ("especially", 1.2),
    ("extremely", 1.5),
    ("highly", 1.4),
    ("incredibly", 1.4),
    ("quite", 1.1),
    ("really", 1.3),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("super", 1.4),
    ("totally", 1.3),
    ("truly", 1.2),
    ("very", 1.3),
];

/// Sorted negation words; contractions ending in `n't` are handled separately.
const NEGATIONS: &[&str] = &["cannot", "never", "no", "nor", "not", "without"];

/// Neutral words a modifier may skip before it lapses.
const MODIFIER_REACH: usize = 2;

/// Whole-text scorer over a built-in English lexicon.
///
/// Scores are clamped to their ranges and rounded to 3 decimals. Text with
/// no sentiment-bearing words scores `0.0, 0.0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    /// Create the scorer.
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<SentimentScore, InsightsError> {
        if text.trim().is_empty() {
            return Err(InsightsError::EmptyInput);
        }

        let mut hits: Vec<(f64, f64)> = Vec::new();
        let mut intensity = 1.0;
        let mut negated = false;
        let mut neutral_run = 0usize;

        for token in tokens(text) {
            if is_negation(&token) {
                negated = true;
                neutral_run = 0;
                continue;
            }
            if let Some(multiplier) = intensifier(&token) {
                intensity *= multiplier;
                neutral_run = 0;
                continue;
            }
            match lookup(&token) {
                Some((polarity, subjectivity)) => {
                    let mut polarity = polarity * intensity;
                    if negated {
                        polarity *= NEGATION_FACTOR;
                    }
                    hits.push((
                        polarity.clamp(-1.0, 1.0),
                        (subjectivity * intensity).clamp(0.0, 1.0),
                    ));
                    intensity = 1.0;
                    negated = false;
                    neutral_run = 0;
                }
                None => {
                    neutral_run += 1;
                    if neutral_run > MODIFIER_REACH {
                        intensity = 1.0;
                        negated = false;
                    }
                }
            }
        }

        if hits.is_empty() {
            return Ok(SentimentScore::default());
        }
        let count = hits.len() as f64;
        let polarity = hits.iter().map(|(p, _)| p).sum::<f64>() / count;
        let subjectivity = hits.iter().map(|(_, s)| s).sum::<f64>() / count;
        Ok(SentimentScore {
            polarity: round_to(polarity.clamp(-1.0, 1.0), SCORE_DECIMALS),
            subjectivity: round_to(subjectivity.clamp(0.0, 1.0), SCORE_DECIMALS),
        })
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|ch: char| !is_token_char(ch))
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .replace('\u{2019}', "'")
                .trim_matches('\'')
                .to_lowercase()
        })
        .filter(|token| !token.is_empty())
}

fn is_token_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '\'' || ch == '\u{2019}'
}

fn is_negation(token: &str) -> bool {
    token.ends_with("n't") || NEGATIONS.binary_search(&token).is_ok()
}

fn intensifier(token: &str) -> Option<f64> {
    INTENSIFIERS
        .binary_search_by(|(word, _)| word.cmp(&token))
        .ok()
        .map(|idx| INTENSIFIERS[idx].1)
}

fn lookup(token: &str) -> Option<(f64, f64)> {
    LEXICON
        .binary_search_by(|(word, _, _)| word.cmp(&token))
        .ok()
        .map(|idx| (LEXICON[idx].1, LEXICON[idx].2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_sorted<T: Ord + Clone>(items: Vec<T>) -> bool {
        let mut sorted = items.clone();
        sorted.sort();
        sorted == items
    }

    #[test]
    fn tables_are_sorted_for_binary_search() {
        let words: Vec<&str> = LEXICON.iter().map(|entry| entry.0).collect();
        assert!(is_sorted(words));
        let intensifiers: Vec<&str> = INTENSIFIERS.iter().map(|entry| entry.0).collect();
        assert!(is_sorted(intensifiers));
        assert!(is_sorted(NEGATIONS.to_vec()));
    }

    #[test]
    fn lexicon_values_are_in_range() {
        for (word, polarity, subjectivity) in LEXICON {
            assert!((-1.0..=1.0).contains(polarity), "{word}");
            assert!((0.0..=1.0).contains(subjectivity), "{word}");
        }
    }

    #[test]
    fn blank_text_is_rejected() {
        let scorer = LexiconScorer::new();
        assert!(matches!(scorer.score(""), Err(InsightsError::EmptyInput)));
        assert!(matches!(
            scorer.score(" \n\t"),
            Err(InsightsError::EmptyInput)
        ));
    }

    #[test]
    fn text_without_sentiment_words_is_neutral() {
        let scorer = LexiconScorer::new();
        let score = scorer.score("The bottle arrived on Tuesday.").unwrap();
        assert_eq!(score, SentimentScore::default());
    }

    #[test]
    fn positive_and_negative_reviews_have_opposite_polarity() {
        let scorer = LexiconScorer::new();
        let positive = scorer.score("Great product, truly great.").unwrap();
        let negative = scorer.score("Terrible, awful, broke.").unwrap();
        assert_eq!(positive.polarity, 0.88);
        assert_eq!(positive.subjectivity, 0.825);
        assert_eq!(negative.polarity, -0.8);
        assert_eq!(negative.subjectivity, 0.867);
    }

    #[test]
    fn negation_flips_and_damps_polarity() {
        let scorer = LexiconScorer::new();
        let plain = scorer.score("This is good.").unwrap();
        let negated = scorer.score("This isn't good.").unwrap();
        assert_eq!(plain.polarity, 0.7);
        assert_eq!(negated.polarity, -0.35);
        assert_eq!(
            scorer.score("This isn\u{2019}t good.").unwrap().polarity,
            -0.35
        );
    }

    #[test]
    fn modifiers_lapse_after_neutral_words() {
        let scorer = LexiconScorer::new();
        let score = scorer
            .score("Not what the box said but the cream is good.")
            .unwrap();
        assert_eq!(score.polarity, 0.7);
    }

    #[test]
    fn intensified_scores_stay_clamped() {
        let score = LexiconScorer::new()
            .score("Absolutely extremely perfect!")
            .unwrap();
        assert_eq!(score.polarity, 1.0);
        assert_eq!(score.subjectivity, 1.0);
    }
}
