/// Deterministic first-seen grouping and counting helpers.
pub mod grouping;
