/// Source field names recognized in review JSON lines.
pub mod fields {
    /// Product identifier field.
    pub const PRODUCT_ID: &str = "asin";
    /// Reviewer identifier field.
    pub const REVIEWER_ID: &str = "reviewerID";
    /// Short review title field.
    pub const SUMMARY: &str = "summary";
    /// Full review body field.
    pub const TEXT: &str = "reviewText";
    /// Star rating field.
    pub const RATING: &str = "overall";
    /// Verified-purchase flag field.
    pub const VERIFIED: &str = "verified";
    /// Review timestamp in unix seconds.
    pub const UNIX_REVIEW_TIME: &str = "unixReviewTime";
    /// Review date in `MM DD, YYYY` form.
    pub const REVIEW_TIME: &str = "reviewTime";
    /// `chrono` format string for `REVIEW_TIME`.
    pub const REVIEW_TIME_FORMAT: &str = "%m %d, %Y";
}

/// Constants used by sentiment scoring and aggregation.
pub mod sentiment {
    /// Decimal places kept on a single scorer result.
    pub const SCORE_DECIMALS: u32 = 3;
    /// Decimal places kept on averaged summaries.
    pub const SUMMARY_DECIMALS: u32 = 4;
    /// Sentences with fewer words are excluded from whole-text averages.
    pub const DEFAULT_MIN_SENTENCE_WORDS: usize = 3;
    /// Polarity multiplier applied to a negated sentiment word.
    pub const NEGATION_FACTOR: f64 = -0.5;
}

/// Constants used by sentence distribution metrics and overviews.
pub mod metrics {
    /// Decimal places kept on distribution and overview averages.
    pub const DISTRIBUTION_DECIMALS: u32 = 3;
    /// Sentences above this polarity count as positive.
    pub const POSITIVE_SENTENCE_THRESHOLD: f64 = 0.1;
    /// Sentences below this polarity count as negative.
    pub const NEGATIVE_SENTENCE_THRESHOLD: f64 = -0.1;
}

/// Constants used by product insight reports.
pub mod insights {
    /// Number of keywords kept per product.
    pub const TOP_KEYWORDS: usize = 5;
    /// Number of keywords quoted in the summary sentence.
    pub const SUMMARY_KEYWORDS: usize = 2;
    /// Average polarity above which reviews are "mostly positive".
    pub const POSITIVE_THRESHOLD: f64 = 0.2;
    /// Average polarity above which reviews are "mixed".
    pub const MIXED_THRESHOLD: f64 = -0.2;
    /// Baseline of the insight score.
    pub const SCORE_BASELINE: f64 = 5.0;
    /// Weight of average polarity in the insight score.
    pub const SCORE_POLARITY_WEIGHT: f64 = 4.0;
    /// Weight of average subjectivity in the insight score.
    pub const SCORE_SUBJECTIVITY_WEIGHT: f64 = 2.0;
    /// Decimal places kept on the insight score.
    pub const SCORE_DECIMALS: u32 = 2;
}

/// Constants used by review analytics.
pub mod analytics {
    /// Reviewers whose mean rating deviation exceeds this are divergent.
    pub const DEFAULT_DIVERGENCE_THRESHOLD: f64 = 1.0;
    /// Default number of words reported per rating bucket.
    pub const DEFAULT_TOP_WORDS: usize = 20;
    /// Rating treated as a one-star review.
    pub const ONE_STAR: f64 = 1.0;
    /// Rating treated as a five-star review.
    pub const FIVE_STAR: f64 = 5.0;
}

/// Constants used by output persistence.
pub mod output {
    /// Suffix appended to the output file name for the file written before the final rename.
    pub const TEMP_EXTENSION: &str = "tmp";
}
