use chrono::{DateTime, NaiveDate};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::config::GroupBy;
use crate::constants::fields;
use crate::errors::ValidationError;

pub use crate::types::{EntityKey, Keyword, ProductId, ReviewerId, Sentence};

/// A validated review, one per retained input line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Product identifier (`asin`), never empty.
    pub product_id: ProductId,
    /// Reviewer identifier (`reviewerID`); may be empty.
    pub reviewer_id: ReviewerId,
    /// Short review title, never empty.
    pub summary: String,
    /// Full review body, never empty after loading.
    pub text: String,
    /// Star rating (`overall`), nonzero and finite.
    pub rating: f64,
    /// Verified-purchase flag, when the line carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Review date, from `unixReviewTime` or `reviewTime`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<NaiveDate>,
}

impl ReviewRecord {
    /// Extract and validate a review from one decoded JSON line.
    ///
    /// String fields are trimmed. `asin`, `summary` and `reviewText` must be
    /// non-empty, and `overall` must be a finite nonzero number; a zero
    /// rating counts as missing.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

        let text = trimmed_field(object, fields::TEXT);
        let summary = trimmed_field(object, fields::SUMMARY);
        let product_id = trimmed_field(object, fields::PRODUCT_ID);
        let reviewer_id = trimmed_field(object, fields::REVIEWER_ID);

        if text.is_empty() {
            return Err(ValidationError::MissingField(fields::TEXT));
        }
        if summary.is_empty() {
            return Err(ValidationError::MissingField(fields::SUMMARY));
        }
        let rating = object
            .get(fields::RATING)
            .and_then(Value::as_f64)
            .ok_or(ValidationError::MissingField(fields::RATING))?;
        if rating == 0.0 || !rating.is_finite() {
            return Err(ValidationError::UnusableRating(rating));
        }
        if product_id.is_empty() {
            return Err(ValidationError::MissingField(fields::PRODUCT_ID));
        }

        Ok(Self {
            product_id,
            reviewer_id,
            summary,
            text,
            rating,
            verified: object.get(fields::VERIFIED).and_then(Value::as_bool),
            reviewed_at: review_date(object),
        })
    }

    /// Grouping key for `group_by`.
    pub fn key(&self, group_by: GroupBy) -> &str {
        match group_by {
            GroupBy::Product => &self.product_id,
            GroupBy::Reviewer => &self.reviewer_id,
        }
    }
}

fn trimmed_field(object: &Map<String, Value>, name: &str) -> String {
    object
        .get(name)
        .and_then(Value::as_str)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn review_date(object: &Map<String, Value>) -> Option<NaiveDate> {
    let unix_seconds = object.get(fields::UNIX_REVIEW_TIME).and_then(Value::as_i64);
    if let Some(stamp) = unix_seconds.and_then(|seconds| DateTime::from_timestamp(seconds, 0)) {
        return Some(stamp.date_naive());
    }
    let raw = object.get(fields::REVIEW_TIME).and_then(Value::as_str)?;
    NaiveDate::parse_from_str(raw.trim(), fields::REVIEW_TIME_FORMAT).ok()
}

/// Polarity/subjectivity pair produced by a sentiment scorer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Valence, -1.0 (negative) to 1.0 (positive).
    pub polarity: f64,
    /// Opinion vs. fact, 0.0 (objective) to 1.0 (subjective).
    pub subjectivity: f64,
}

/// Score for one sentence that met the word-count threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SentenceSentiment {
    /// Sentence text as split from the review.
    pub sentence: Sentence,
    /// Sentence polarity.
    pub polarity: f64,
    /// Sentence subjectivity.
    pub subjectivity: f64,
    /// Whitespace-separated word count.
    pub word_count: usize,
}

/// Per-sentence results plus their averaged whole-text score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SentenceAnalysis {
    /// Qualifying sentences in text order.
    pub sentences: Vec<SentenceSentiment>,
    /// Mean over `sentences`, or zero when none qualified.
    pub summary: SentimentScore,
}

/// Averages and contributing count for one group of reviews.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SentimentAggregate {
    /// Mean polarity over contributing records.
    pub average_polarity: f64,
    /// Mean subjectivity over contributing records.
    pub average_subjectivity: f64,
    /// Records with non-empty text.
    pub review_count: usize,
}

/// Aggregate sentiment for one product or reviewer.
///
/// Serializes as `{"asin" | "reviewerID": key, "avg_polarity", "avg_subjectivity",
/// "review_count"}`.
#[derive(Clone, Debug, PartialEq)]
pub struct EntitySentimentSummary {
    /// Group identifier.
    pub key: EntityKey,
    /// Which record field `key` was taken from.
    pub group_by: GroupBy,
    /// Mean polarity, rounded to 4 decimals; 0 when `review_count == 0`.
    pub average_polarity: f64,
    /// Mean subjectivity, rounded to 4 decimals; 0 when `review_count == 0`.
    pub average_subjectivity: f64,
    /// Records that contributed a score.
    pub review_count: usize,
}

impl EntitySentimentSummary {
    /// Attach a group key to a computed aggregate.
    pub fn new(
        key: impl Into<EntityKey>,
        group_by: GroupBy,
        aggregate: SentimentAggregate,
    ) -> Self {
        Self {
            key: key.into(),
            group_by,
            average_polarity: aggregate.average_polarity,
            average_subjectivity: aggregate.average_subjectivity,
            review_count: aggregate.review_count,
        }
    }
}

impl Serialize for EntitySentimentSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(self.group_by.field_name(), &self.key)?;
        map.serialize_entry("avg_polarity", &self.average_polarity)?;
        map.serialize_entry("avg_subjectivity", &self.average_subjectivity)?;
        map.serialize_entry("review_count", &self.review_count)?;
        map.end()
    }
}

/// Insight report for one product's review texts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductInsight {
    /// Product identifier.
    pub asin: ProductId,
    /// Verdict sentence naming the leading keywords.
    pub summary_sentence: String,
    /// Score on a 0-10 style scale derived from the averages.
    pub ai_score: f64,
    /// Most frequent content words, most common first.
    pub top_keywords: Vec<Keyword>,
}

/// Collection-level averages with the most positive and most negative review.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SentimentOverview {
    /// Mean polarity over all records, rounded to 3 decimals.
    pub average_polarity: f64,
    /// Mean subjectivity over all records, rounded to 3 decimals.
    pub average_subjectivity: f64,
    /// First record with the highest polarity.
    pub most_positive: ReviewRecord,
    /// First record with the lowest polarity.
    pub most_negative: ReviewRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line() -> Value {
        json!({
            "asin": " A1 ",
            "reviewerID": "U1",
            "summary": "ok",
            "reviewText": "  Great product, truly great.  ",
            "overall": 5.0,
            "verified": true,
            "reviewTime": "07 14, 2015"
        })
    }

    #[test]
    fn from_json_trims_and_keeps_optional_fields() {
        let record = ReviewRecord::from_json(&line()).unwrap();
        assert_eq!(record.product_id, "A1");
        assert_eq!(record.text, "Great product, truly great.");
        assert_eq!(record.rating, 5.0);
        assert_eq!(record.verified, Some(true));
        assert_eq!(record.reviewed_at, NaiveDate::from_ymd_opt(2015, 7, 14));
    }

    #[test]
    fn from_json_prefers_unix_review_time() {
        let mut value = line();
        value["unixReviewTime"] = json!(1_420_070_400);
        let record = ReviewRecord::from_json(&value).unwrap();
        assert_eq!(record.reviewed_at, NaiveDate::from_ymd_opt(2015, 1, 1));
    }

    #[test]
    fn from_json_rejects_missing_required_fields() {
        for field in ["reviewText", "summary", "asin"] {
            let mut value = line();
            value[field] = json!("   ");
            assert_eq!(
                ReviewRecord::from_json(&value),
                Err(ValidationError::MissingField(match field {
                    "reviewText" => fields::TEXT,
                    "summary" => fields::SUMMARY,
                    _ => fields::PRODUCT_ID,
                }))
            );
        }
        let mut value = line();
        value.as_object_mut().unwrap().remove("overall");
        assert_eq!(
            ReviewRecord::from_json(&value),
            Err(ValidationError::MissingField(fields::RATING))
        );
    }

    #[test]
    fn from_json_treats_zero_rating_as_absent() {
        let mut value = line();
        value["overall"] = json!(0);
        assert_eq!(
            ReviewRecord::from_json(&value),
            Err(ValidationError::UnusableRating(0.0))
        );
    }

    #[test]
    fn from_json_allows_missing_reviewer() {
        let mut value = line();
        value.as_object_mut().unwrap().remove("reviewerID");
        let record = ReviewRecord::from_json(&value).unwrap();
        assert!(record.reviewer_id.is_empty());
    }

    #[test]
    fn from_json_rejects_non_objects() {
        assert_eq!(
            ReviewRecord::from_json(&json!([1, 2])),
            Err(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn summary_serializes_with_mode_specific_key() {
        let aggregate = SentimentAggregate {
            average_polarity: 0.25,
            average_subjectivity: 0.5,
            review_count: 2,
        };
        let by_product = EntitySentimentSummary::new("A1", GroupBy::Product, aggregate);
        let by_reviewer = EntitySentimentSummary::new("U1", GroupBy::Reviewer, aggregate);
        assert_eq!(
            serde_json::to_value(&by_product).unwrap(),
            json!({"asin": "A1", "avg_polarity": 0.25, "avg_subjectivity": 0.5, "review_count": 2})
        );
        assert_eq!(
            serde_json::to_value(&by_reviewer).unwrap()["reviewerID"],
            json!("U1")
        );
    }
}
