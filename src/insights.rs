//! Product insight reports and collection overviews.

use tracing::info;

use crate::constants::insights::{
    MIXED_THRESHOLD, POSITIVE_THRESHOLD, SCORE_BASELINE, SCORE_DECIMALS, SCORE_POLARITY_WEIGHT,
    SCORE_SUBJECTIVITY_WEIGHT, SUMMARY_KEYWORDS, TOP_KEYWORDS,
};
use crate::constants::metrics::DISTRIBUTION_DECIMALS;
use crate::data::{ProductInsight, ReviewRecord, SentimentOverview};
use crate::errors::InsightsError;
use crate::sentiment::SentimentScorer;
use crate::source::ProductTexts;
use crate::source::utilities::grouping::{count_first_seen, most_common};
use crate::types::Keyword;
use crate::utils::{keyword_tokens, round_to};

/// Build the insight report for one product's review texts.
///
/// Blank texts are ignored. With no usable text both averages are 0, which
/// gives a score of 5.0 and a "mixed" summary.
pub fn product_insight<S>(
    asin: &str,
    texts: &[String],
    scorer: &S,
) -> Result<ProductInsight, InsightsError>
where
    S: SentimentScorer + ?Sized,
{
    let mut total_polarity = 0.0;
    let mut total_subjectivity = 0.0;
    let mut scored = 0usize;

    for text in texts.iter().filter(|text| !text.trim().is_empty()) {
        let score = scorer.score(text)?;
        total_polarity += score.polarity;
        total_subjectivity += score.subjectivity;
        scored += 1;
    }

    let (avg_polarity, avg_subjectivity) = if scored == 0 {
        (0.0, 0.0)
    } else {
        let count = scored as f64;
        (total_polarity / count, total_subjectivity / count)
    };

    let top_keywords = top_keywords(texts, TOP_KEYWORDS);

    Ok(ProductInsight {
        asin: asin.to_string(),
        summary_sentence: summary_sentence(avg_polarity, &top_keywords),
        ai_score: insight_score(avg_polarity, avg_subjectivity),
        top_keywords,
    })
}

/// Insight reports for every product in a sampled corpus, in key order.
pub fn product_insights<S>(
    products: &ProductTexts,
    scorer: &S,
) -> Result<Vec<ProductInsight>, InsightsError>
where
    S: SentimentScorer + ?Sized,
{
    let insights = products
        .iter()
        .map(|(asin, texts)| product_insight(asin, texts, scorer))
        .collect::<Result<Vec<_>, _>>()?;
    info!("[reviews:insights] built {} insights", insights.len());
    Ok(insights)
}

/// `5 + 4 * polarity - 2 * subjectivity`, rounded to 2 decimals.
pub fn insight_score(avg_polarity: f64, avg_subjectivity: f64) -> f64 {
    round_to(
        SCORE_BASELINE + avg_polarity * SCORE_POLARITY_WEIGHT
            - avg_subjectivity * SCORE_SUBJECTIVITY_WEIGHT,
        SCORE_DECIMALS,
    )
}

/// One-line verdict from the average polarity, naming the leading keywords.
pub fn summary_sentence(avg_polarity: f64, keywords: &[Keyword]) -> String {
    let mut sentence = if avg_polarity > POSITIVE_THRESHOLD {
        "Reviews are mostly positive.".to_string()
    } else if avg_polarity > MIXED_THRESHOLD {
        "Reviews are mixed.".to_string()
    } else {
        "Reviews are mostly negative.".to_string()
    };
    if !keywords.is_empty() {
        let mentioned: Vec<&str> = keywords
            .iter()
            .take(SUMMARY_KEYWORDS)
            .map(String::as_str)
            .collect();
        sentence.push_str(&format!(" Users often mention {}.", mentioned.join(", ")));
    }
    sentence
}

/// Most frequent keyword tokens across `texts`; ties keep first-seen order.
pub fn top_keywords(texts: &[String], n: usize) -> Vec<Keyword> {
    let counts = count_first_seen(texts.iter().flat_map(|text| keyword_tokens(text)));
    most_common(&counts, n)
        .into_iter()
        .map(|(keyword, _)| keyword)
        .collect()
}

/// Averages over a review list plus its most positive and most negative entry.
///
/// Returns `None` for an empty list. Ties resolve to the earliest record.
pub fn summarize_sentiments<S>(
    records: &[ReviewRecord],
    scorer: &S,
) -> Result<Option<SentimentOverview>, InsightsError>
where
    S: SentimentScorer + ?Sized,
{
    if records.is_empty() {
        return Ok(None);
    }
    let scores = records
        .iter()
        .map(|record| scorer.score(&record.text))
        .collect::<Result<Vec<_>, _>>()?;

    let mut most_positive = 0;
    let mut most_negative = 0;
    for (idx, score) in scores.iter().enumerate() {
        if score.polarity > scores[most_positive].polarity {
            most_positive = idx;
        }
        if score.polarity < scores[most_negative].polarity {
            most_negative = idx;
        }
    }

    let count = scores.len() as f64;
    let polarity: f64 = scores.iter().map(|score| score.polarity).sum();
    let subjectivity: f64 = scores.iter().map(|score| score.subjectivity).sum();
    Ok(Some(SentimentOverview {
        average_polarity: round_to(polarity / count, DISTRIBUTION_DECIMALS),
        average_subjectivity: round_to(subjectivity / count, DISTRIBUTION_DECIMALS),
        most_positive: records[most_positive].clone(),
        most_negative: records[most_negative].clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::LexiconScorer;
    use indexmap::IndexMap;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn record(reviewer: &str, text: &str) -> ReviewRecord {
        ReviewRecord {
            product_id: "B001".to_string(),
            reviewer_id: reviewer.to_string(),
            summary: "title".to_string(),
            text: text.to_string(),
            rating: 3.0,
            verified: None,
            reviewed_at: None,
        }
    }

    #[test]
    fn summary_sentence_follows_polarity_bands() {
        assert_eq!(summary_sentence(0.21, &[]), "Reviews are mostly positive.");
        assert_eq!(summary_sentence(0.2, &[]), "Reviews are mixed.");
        assert_eq!(summary_sentence(-0.2, &[]), "Reviews are mostly negative.");
        assert_eq!(
            summary_sentence(0.5, &texts(&["scent", "bottle", "price"])),
            "Reviews are mostly positive. Users often mention scent, bottle."
        );
    }

    #[test]
    fn insight_score_weights_polarity_and_subjectivity() {
        assert_eq!(insight_score(0.0, 0.0), 5.0);
        assert_eq!(insight_score(0.5, 0.5), 6.0);
        assert_eq!(insight_score(-1.0, 1.0), -1.0);
    }

    #[test]
    fn top_keywords_rank_by_frequency_then_first_seen() {
        let reviews = texts(&[
            "The scent is lovely and the bottle is pretty.",
            "Lovely scent, but the bottle leaked.",
            "Scent fades fast.",
        ]);
        let top = top_keywords(&reviews, 3);
        assert_eq!(top, vec!["scent", "lovely", "bottle"]);
    }

    #[test]
    fn product_insight_reports_positive_product() {
        let reviews = texts(&[
            "Great cream, truly great.",
            "   ",
            "Lovely cream and a lovely scent.",
        ]);
        let insight = product_insight("B001", &reviews, &LexiconScorer::new()).unwrap();
        assert_eq!(insight.asin, "B001");
        assert_eq!(
            insight.top_keywords,
            vec!["great", "cream", "lovely", "truly", "scent"]
        );
        assert_eq!(
            insight.summary_sentence,
            "Reviews are mostly positive. Users often mention great, cream."
        );
        assert!(insight.ai_score > 5.0);
    }

    #[test]
    fn product_insight_without_text_is_neutral() {
        let insight = product_insight("B002", &[], &LexiconScorer::new()).unwrap();
        assert_eq!(insight.ai_score, 5.0);
        assert_eq!(insight.summary_sentence, "Reviews are mixed.");
        assert!(insight.top_keywords.is_empty());
    }

    #[test]
    fn product_insights_keep_mapping_order() {
        let mut products: ProductTexts = IndexMap::new();
        products.insert("Z9".to_string(), texts(&["Awful smell."]));
        products.insert("A1".to_string(), texts(&["Nice!"]));
        let insights = product_insights(&products, &LexiconScorer::new()).unwrap();
        let keys: Vec<&str> = insights.iter().map(|i| i.asin.as_str()).collect();
        assert_eq!(keys, vec!["Z9", "A1"]);
        let verdict = &insights[0].summary_sentence;
        assert!(verdict.starts_with("Reviews are mostly negative."));
    }

    #[test]
    fn summarize_sentiments_picks_extremes() {
        let records = vec![
            record("U1", "It is okay I guess."),
            record("U2", "Absolutely wonderful."),
            record("U3", "Terrible smell."),
            record("U4", "Wonderful."),
        ];
        let overview = summarize_sentiments(&records, &LexiconScorer::new())
            .unwrap()
            .unwrap();
        assert_eq!(overview.most_positive.reviewer_id, "U2");
        assert_eq!(overview.most_negative.reviewer_id, "U3");
        assert_eq!(overview.average_polarity, 0.375);
    }

    #[test]
    fn summarize_sentiments_on_empty_is_none() {
        assert!(summarize_sentiments(&[], &LexiconScorer::new())
            .unwrap()
            .is_none());
    }
}
