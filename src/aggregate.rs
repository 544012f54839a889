//! Per-entity sentiment folds and the batch orchestrator.

use rayon::prelude::*;
use tracing::info;

use crate::config::GroupBy;
use crate::constants::sentiment::SUMMARY_DECIMALS;
use crate::data::{EntitySentimentSummary, ReviewRecord, SentimentAggregate};
use crate::errors::InsightsError;
use crate::sentiment::SentimentScorer;
use crate::source::utilities::grouping::group_first_seen;
use crate::utils::round_to;

/// Fold one group's records into average polarity, subjectivity, and count.
///
/// Records with empty text are skipped and not counted. A scorer error
/// aborts the group and is returned as-is.
pub fn aggregate_entity<'a, I, S>(
    records: I,
    scorer: &S,
) -> Result<SentimentAggregate, InsightsError>
where
    I: IntoIterator<Item = &'a ReviewRecord>,
    S: SentimentScorer + ?Sized,
{
    let mut total_polarity = 0.0;
    let mut total_subjectivity = 0.0;
    let mut review_count = 0usize;

    for record in records {
        if record.text.is_empty() {
            continue;
        }
        let score = scorer.score(&record.text)?;
        total_polarity += score.polarity;
        total_subjectivity += score.subjectivity;
        review_count += 1;
    }

    if review_count == 0 {
        return Ok(SentimentAggregate::default());
    }
    let count = review_count as f64;
    Ok(SentimentAggregate {
        average_polarity: round_to(total_polarity / count, SUMMARY_DECIMALS),
        average_subjectivity: round_to(total_subjectivity / count, SUMMARY_DECIMALS),
        review_count,
    })
}

/// Group `records` by `group_by` and aggregate each group.
///
/// Summaries come back in first-seen key order. Records without a product
/// id are not grouped by product; an empty reviewer id is its own group.
/// Empty input yields an empty result.
pub fn aggregate_by<S>(
    records: &[ReviewRecord],
    group_by: GroupBy,
    scorer: &S,
) -> Result<Vec<EntitySentimentSummary>, InsightsError>
where
    S: SentimentScorer + ?Sized,
{
    let groups = group_records(records, group_by);
    let summaries = groups
        .into_iter()
        .map(|(key, members)| {
            aggregate_entity(members, scorer)
                .map(|aggregate| EntitySentimentSummary::new(key, group_by, aggregate))
        })
        .collect::<Result<Vec<_>, _>>()?;
    log_summary(group_by, records.len(), &summaries);
    Ok(summaries)
}

/// Same result as [`aggregate_by`], with groups scored on the rayon pool.
pub fn aggregate_by_parallel<S>(
    records: &[ReviewRecord],
    group_by: GroupBy,
    scorer: &S,
) -> Result<Vec<EntitySentimentSummary>, InsightsError>
where
    S: SentimentScorer + ?Sized,
{
    let groups: Vec<(&str, Vec<&ReviewRecord>)> =
        group_records(records, group_by).into_iter().collect();
    let summaries = groups
        .into_par_iter()
        .map(|(key, members)| {
            aggregate_entity(members, scorer)
                .map(|aggregate| EntitySentimentSummary::new(key, group_by, aggregate))
        })
        .collect::<Result<Vec<_>, _>>()?;
    log_summary(group_by, records.len(), &summaries);
    Ok(summaries)
}

/// Aggregate by product identifier.
pub fn aggregate_by_product<S>(
    records: &[ReviewRecord],
    scorer: &S,
) -> Result<Vec<EntitySentimentSummary>, InsightsError>
where
    S: SentimentScorer + ?Sized,
{
    aggregate_by(records, GroupBy::Product, scorer)
}

/// Aggregate by reviewer identifier.
pub fn aggregate_by_reviewer<S>(
    records: &[ReviewRecord],
    scorer: &S,
) -> Result<Vec<EntitySentimentSummary>, InsightsError>
where
    S: SentimentScorer + ?Sized,
{
    aggregate_by(records, GroupBy::Reviewer, scorer)
}

fn group_records(
    records: &[ReviewRecord],
    group_by: GroupBy,
) -> indexmap::IndexMap<&str, Vec<&ReviewRecord>> {
    group_first_seen(records, |record| {
        let key = record.key(group_by);
        match group_by {
            GroupBy::Product => (!key.is_empty()).then_some(key),
            GroupBy::Reviewer => Some(key),
        }
    })
}

fn log_summary(group_by: GroupBy, records: usize, summaries: &[EntitySentimentSummary]) {
    info!(
        "[reviews:aggregate] {} records -> {} {} groups",
        records,
        summaries.len(),
        group_by.field_name()
    );
}
