//! Configured entry points that chain loading, aggregation, and output.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::aggregate::{aggregate_by, aggregate_by_parallel};
use crate::analytics::{ReviewAnalytics, review_analytics};
use crate::config::{AnalyticsConfig, PipelineConfig, check_output_path};
use crate::data::{EntitySentimentSummary, ProductInsight};
use crate::errors::InsightsError;
use crate::insights::product_insights;
use crate::sentiment::SentimentScorer;
use crate::source::{JsonlReviewSource, LoadStats, ReviewSource, load_product_texts};
use crate::transport::fs::write_json_atomic;

/// Outcome of one aggregation run.
#[derive(Clone, Debug)]
pub struct AggregationReport {
    /// Line accounting from the loader.
    pub stats: LoadStats,
    /// One summary per distinct key, in first-seen order.
    pub summaries: Vec<EntitySentimentSummary>,
}

/// Load the configured input, aggregate it, and write the summaries.
///
/// Any fatal error returns before the output file is touched, so a failed
/// run never leaves partial output behind.
pub fn run_aggregation<S>(
    config: &PipelineConfig,
    scorer: &S,
) -> Result<AggregationReport, InsightsError>
where
    S: SentimentScorer + ?Sized,
{
    config.validate()?;
    let source = JsonlReviewSource::new(&config.input_path);
    run_aggregation_from(&source, config, scorer)
}

/// Same as [`run_aggregation`] with an explicit review source.
pub fn run_aggregation_from<R, S>(
    source: &R,
    config: &PipelineConfig,
    scorer: &S,
) -> Result<AggregationReport, InsightsError>
where
    R: ReviewSource + ?Sized,
    S: SentimentScorer + ?Sized,
{
    let started = Instant::now();
    let loaded = source.load()?;

    let summaries = if config.parallel {
        aggregate_by_parallel(&loaded.records, config.group_by, scorer)?
    } else {
        aggregate_by(&loaded.records, config.group_by, scorer)?
    };

    if let Some(output) = &config.output_path {
        write_json_atomic(output, &summaries)?;
        info!(
            "[reviews:pipeline] wrote {} summaries to {}",
            summaries.len(),
            output.display()
        );
    }
    info!(
        "[reviews:pipeline] source '{}' aggregated in {:.2}s",
        source.id(),
        started.elapsed().as_secs_f64()
    );

    Ok(AggregationReport {
        stats: loaded.stats,
        summaries,
    })
}

/// Build product insight reports from a sampled `{asin: [text, ...]}` file.
///
/// When `output` is given the reports are written there as a JSON array.
pub fn run_product_insights<S>(
    input: &Path,
    output: Option<&Path>,
    scorer: &S,
) -> Result<Vec<ProductInsight>, InsightsError>
where
    S: SentimentScorer + ?Sized,
{
    if let Some(output) = output {
        check_output_path(input, output)?;
    }
    let products = load_product_texts(input)?;
    let insights = product_insights(&products, scorer)?;
    if let Some(output) = output {
        write_json_atomic(output, &insights)?;
        info!(
            "[reviews:pipeline] wrote {} product insights to {}",
            insights.len(),
            output.display()
        );
    }
    Ok(insights)
}

/// Load a review corpus and run reviewer segmentation, temporal grouping,
/// and top words by rating over it.
///
/// When `output` is given the combined report is written there as JSON.
pub fn run_review_analytics(
    input: &Path,
    output: Option<&Path>,
    config: &AnalyticsConfig,
) -> Result<ReviewAnalytics, InsightsError> {
    if let Some(output) = output {
        check_output_path(input, output)?;
    }
    let loaded = JsonlReviewSource::new(input).load()?;
    let analytics = review_analytics(&loaded.records, config);
    if let Some(output) = output {
        write_json_atomic(output, &analytics)?;
        info!(
            "[reviews:pipeline] wrote review analytics for {} records to {}",
            loaded.stats.retained,
            output.display()
        );
    }
    Ok(analytics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroupBy;
    use crate::data::ReviewRecord;
    use crate::sentiment::{LexiconScorer, default_scorer};
    use crate::source::InMemorySource;

    fn record(product: &str, text: &str) -> ReviewRecord {
        ReviewRecord {
            product_id: product.to_string(),
            reviewer_id: "U1".to_string(),
            summary: "title".to_string(),
            text: text.to_string(),
            rating: 4.0,
            verified: None,
            reviewed_at: None,
        }
    }

    #[test]
    fn run_aggregation_from_memory_source() {
        let source = InMemorySource::new(
            "fixture",
            vec![
                record("A1", "This cream is really good for dry skin."),
                record("A2", "The pump broke on the first day."),
            ],
        );
        let config = PipelineConfig::new("unused.json").with_group_by(GroupBy::Product);
        let scorer = default_scorer(config.sentences);
        let report = run_aggregation_from(&source, &config, &scorer).unwrap();
        assert_eq!(report.stats.retained, 2);
        assert_eq!(report.summaries.len(), 2);
        assert!(report.summaries[0].average_polarity > 0.0);
        assert!(report.summaries[1].average_polarity < 0.0);
    }

    #[test]
    fn run_aggregation_rejects_invalid_config() {
        let config = PipelineConfig::new("");
        let err = run_aggregation(&config, &LexiconScorer::new()).unwrap_err();
        assert!(matches!(err, InsightsError::Configuration(_)));
    }

    #[test]
    fn output_helpers_refuse_to_stage_over_the_input() {
        let input = Path::new("data/summaries.json.tmp");
        let output = Some(Path::new("data/summaries.json"));
        let err = run_product_insights(input, output, &LexiconScorer::new()).unwrap_err();
        assert!(matches!(err, InsightsError::Configuration(_)));
        let err = run_review_analytics(input, output, &AnalyticsConfig::default()).unwrap_err();
        assert!(matches!(err, InsightsError::Configuration(_)));
    }
}
