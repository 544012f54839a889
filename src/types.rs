/// Product identifier (source field `asin`).
/// Example: `B00004U9V2`
pub type ProductId = String;
/// Reviewer identifier (source field `reviewerID`).
/// Example: `A1Q6MUU0B2ZDQG`
pub type ReviewerId = String;
/// Identifier of an aggregation group; a product or reviewer id depending on mode.
/// Examples: `B00004U9V2`, `A1Q6MUU0B2ZDQG`
pub type EntityKey = String;
/// Sentence text extracted from a review body.
/// Example: `But the cream worked incredibly well.`
pub type Sentence = String;
/// Normalized keyword token.
/// Examples: `cream`, `scent`, `packaging`
pub type Keyword = String;
/// Bucket label for temporal grouping.
/// Examples: `2015`, `7`, `2015-07`
pub type BucketKey = String;
