#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Per-entity sentiment folds and the batch orchestrator.
pub mod aggregate;
/// Reviewer segmentation, temporal grouping, and rating word counts.
pub mod analytics;
/// Pipeline configuration types.
pub mod config;
/// Centralized constants: field names, precisions, thresholds.
pub mod constants;
/// Review record and summary types.
pub mod data;
/// Product insight reports and collection overviews.
pub mod insights;
/// Sentence distribution metrics.
pub mod metrics;
/// Configured end-to-end entry points.
pub mod pipeline;
/// Sentiment scorer capability and built-in scorers.
pub mod sentiment;
/// Review sources and loading helpers.
pub mod source;
/// Input/output transports (local filesystem).
pub mod transport;
/// Shared type aliases.
pub mod types;
/// Text normalization helpers.
pub mod utils;

mod errors;

pub use aggregate::{
    aggregate_by, aggregate_by_parallel, aggregate_by_product, aggregate_by_reviewer,
    aggregate_entity,
};
pub use analytics::{ReviewAnalytics, review_analytics};
pub use config::{AnalyticsConfig, GroupBy, PipelineConfig, SentenceConfig};
pub use data::{
    EntitySentimentSummary, ProductInsight, ReviewRecord, SentenceAnalysis, SentenceSentiment,
    SentimentAggregate, SentimentOverview, SentimentScore,
};
pub use errors::{InsightsError, ValidationError};
pub use pipeline::{
    AggregationReport, run_aggregation, run_aggregation_from, run_product_insights,
    run_review_analytics,
};
pub use sentiment::{LexiconScorer, SentenceScorer, SentimentScorer, default_scorer};
pub use source::{
    InMemorySource, JsonlReviewSource, LoadStats, LoadedReviews, ReviewSource, load_product_texts,
    load_reviews,
};
pub use types::{BucketKey, EntityKey, Keyword, ProductId, ReviewerId, Sentence};
