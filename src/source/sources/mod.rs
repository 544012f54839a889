/// Line-delimited JSON review corpus source.
pub mod jsonl_source;
/// Sampled per-product review text mapping.
pub mod product_texts;
