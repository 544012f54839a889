//! Rating-based review analytics: reviewer segmentation, temporal grouping,
//! and top words by star rating.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::constants::analytics::{FIVE_STAR, ONE_STAR};
use crate::data::ReviewRecord;
use crate::source::utilities::grouping::{count_first_seen, group_first_seen, most_common};
use crate::types::{BucketKey, Keyword, ProductId, ReviewerId};
use crate::utils::{keyword_tokens, word_count};

/// How a reviewer's ratings compare with each product's mean rating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewerClass {
    /// Mean deviation within the threshold.
    Aligned,
    /// Mean deviation beyond the threshold.
    Divergent,
}

/// Mean rating deviation for one reviewer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewerSegment {
    /// Reviewer identifier.
    pub reviewer_id: ReviewerId,
    /// Mean of `rating - product_mean` over the reviewer's reviews.
    pub avg_rating_diff: f64,
    /// Aligned or divergent.
    pub classification: ReviewerClass,
}

/// Classify reviewers by how far their ratings sit from product means.
///
/// A reviewer is `Divergent` when the absolute mean of
/// `rating - product_mean` exceeds `threshold`. Reviewers come back in
/// first-seen order; records with an empty reviewer id are ignored.
pub fn reviewer_segmentation(records: &[ReviewRecord], threshold: f64) -> Vec<ReviewerSegment> {
    let mut product_totals: HashMap<&str, (f64, usize)> = HashMap::new();
    for record in records {
        let entry = product_totals
            .entry(record.product_id.as_str())
            .or_insert((0.0, 0));
        entry.0 += record.rating;
        entry.1 += 1;
    }

    let reviewers = group_first_seen(records, |record| {
        let reviewer = record.reviewer_id.as_str();
        (!reviewer.is_empty()).then_some(reviewer)
    });

    reviewers
        .into_iter()
        .map(|(reviewer_id, reviews)| {
            let diff_sum: f64 = reviews
                .iter()
                .map(|record| {
                    let (sum, count) = product_totals[record.product_id.as_str()];
                    record.rating - sum / count as f64
                })
                .sum();
            let avg_rating_diff = diff_sum / reviews.len() as f64;
            let classification = if avg_rating_diff.abs() > threshold {
                ReviewerClass::Divergent
            } else {
                ReviewerClass::Aligned
            };
            ReviewerSegment {
                reviewer_id: reviewer_id.to_string(),
                avg_rating_diff,
                classification,
            }
        })
        .collect()
}

/// Calendar granularity for temporal buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Granularity {
    /// `2015`
    Year,
    /// `7` (month of year, any year)
    Month,
    /// `2015-07`
    YearMonth,
}

impl Granularity {
    fn bucket(self, date: NaiveDate) -> (i32, u32) {
        match self {
            Granularity::Year => (date.year(), 0),
            Granularity::Month => (0, date.month()),
            Granularity::YearMonth => (date.year(), date.month()),
        }
    }

    fn label(self, (year, month): (i32, u32)) -> BucketKey {
        match self {
            Granularity::Year => year.to_string(),
            Granularity::Month => month.to_string(),
            Granularity::YearMonth => format!("{year:04}-{month:02}"),
        }
    }
}

/// Review volume and averages for one time bucket.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemporalBucket {
    /// Bucket label.
    pub bucket: BucketKey,
    /// Dated records in the bucket.
    pub review_count: usize,
    /// Mean star rating.
    pub avg_rating: f64,
    /// Share of records flagged verified, over records that carry the flag.
    pub verified_share: Option<f64>,
    /// Mean whitespace word count of the review text.
    pub avg_length: f64,
}

/// Year-month bucket for a single product.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductTemporalBucket {
    /// Product identifier.
    pub asin: ProductId,
    /// Bucket statistics for this product.
    #[serde(flatten)]
    pub stats: TemporalBucket,
}

#[derive(Default)]
struct BucketTotals {
    count: usize,
    rating: f64,
    length: usize,
    verified: usize,
    flagged: usize,
}

impl BucketTotals {
    fn add(&mut self, record: &ReviewRecord) {
        self.count += 1;
        self.rating += record.rating;
        self.length += word_count(&record.text);
        if let Some(verified) = record.verified {
            self.flagged += 1;
            if verified {
                self.verified += 1;
            }
        }
    }

    fn finish(self, bucket: BucketKey) -> TemporalBucket {
        let count = self.count as f64;
        TemporalBucket {
            bucket,
            review_count: self.count,
            avg_rating: self.rating / count,
            verified_share: (self.flagged > 0).then(|| self.verified as f64 / self.flagged as f64),
            avg_length: self.length as f64 / count,
        }
    }
}

/// Group dated records into calendar buckets, ascending by bucket.
/// Records without a review date are left out.
pub fn temporal_buckets(records: &[ReviewRecord], granularity: Granularity) -> Vec<TemporalBucket> {
    let mut buckets: BTreeMap<(i32, u32), BucketTotals> = BTreeMap::new();
    for record in records {
        if let Some(date) = record.reviewed_at {
            buckets
                .entry(granularity.bucket(date))
                .or_default()
                .add(record);
        }
    }
    buckets
        .into_iter()
        .map(|(key, totals)| totals.finish(granularity.label(key)))
        .collect()
}

/// Year-month buckets per product, ordered by product id then bucket.
pub fn temporal_buckets_per_product(records: &[ReviewRecord]) -> Vec<ProductTemporalBucket> {
    let mut buckets: BTreeMap<(&str, (i32, u32)), BucketTotals> = BTreeMap::new();
    for record in records {
        if let Some(date) = record.reviewed_at {
            buckets
                .entry((
                    record.product_id.as_str(),
                    Granularity::YearMonth.bucket(date),
                ))
                .or_default()
                .add(record);
        }
    }
    buckets
        .into_iter()
        .map(|((asin, key), totals)| ProductTemporalBucket {
            asin: asin.to_string(),
            stats: totals.finish(Granularity::YearMonth.label(key)),
        })
        .collect()
}

/// Most frequent words in one-star and five-star reviews.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TopWordsByRating {
    /// `(word, count)` pairs from one-star reviews.
    pub one_star: Vec<(Keyword, usize)>,
    /// `(word, count)` pairs from five-star reviews.
    pub five_star: Vec<(Keyword, usize)>,
}

/// Top `n` keyword tokens among one-star and among five-star reviews.
pub fn top_words_by_rating(records: &[ReviewRecord], n: usize) -> TopWordsByRating {
    let top_for = |rating: f64| {
        let counts = count_first_seen(
            records
                .iter()
                .filter(|record| record.rating == rating)
                .flat_map(|record| keyword_tokens(&record.text)),
        );
        most_common(&counts, n)
    };
    TopWordsByRating {
        one_star: top_for(ONE_STAR),
        five_star: top_for(FIVE_STAR),
    }
}

/// Every rating analytic over one corpus.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewAnalytics {
    /// Reviewer divergence segments, first-seen order.
    pub reviewer_segments: Vec<ReviewerSegment>,
    /// Corpus-wide buckets at the configured granularity.
    pub temporal: Vec<TemporalBucket>,
    /// Year-month buckets per product.
    pub temporal_by_product: Vec<ProductTemporalBucket>,
    /// Top words among one-star and five-star reviews.
    pub top_words: TopWordsByRating,
}

/// Run every analytic in this module with the settings in `config`.
pub fn review_analytics(records: &[ReviewRecord], config: &AnalyticsConfig) -> ReviewAnalytics {
    let analytics = ReviewAnalytics {
        reviewer_segments: reviewer_segmentation(records, config.divergence_threshold),
        temporal: temporal_buckets(records, config.granularity),
        temporal_by_product: temporal_buckets_per_product(records),
        top_words: top_words_by_rating(records, config.top_words),
    };
    debug!(
        "[reviews:analytics] {} reviewers, {} buckets from {} records",
        analytics.reviewer_segments.len(),
        analytics.temporal.len(),
        records.len()
    );
    analytics
}
