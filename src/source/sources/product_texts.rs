use std::path::Path;

use indexmap::IndexMap;
use tracing::info;

use crate::errors::InsightsError;
use crate::transport::fs::read_json;
use crate::types::ProductId;

/// Sampled corpus: review texts per product, in document key order.
pub type ProductTexts = IndexMap<ProductId, Vec<String>>;

/// Load a `{asin: [reviewText, ...]}` JSON document.
///
/// Unlike the line-delimited loader this format is a single document, so a
/// decode failure is fatal rather than skipped.
pub fn load_product_texts(path: impl AsRef<Path>) -> Result<ProductTexts, InsightsError> {
    let path = path.as_ref();
    let texts: ProductTexts = read_json(path)?;
    info!(
        "[reviews:product_texts] loaded {} products ({} texts) from {}",
        texts.len(),
        texts.values().map(Vec::len).sum::<usize>(),
        path.display()
    );
    Ok(texts)
}
