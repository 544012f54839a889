use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::data::ReviewRecord;
use crate::errors::InsightsError;
use crate::source::{LoadStats, LoadedReviews, ReviewSource};
use crate::transport::fs::LineFile;

/// Review source backed by a newline-delimited JSON file.
#[derive(Clone, Debug)]
pub struct JsonlReviewSource {
    id: String,
    path: PathBuf,
}

impl JsonlReviewSource {
    /// Create a source reading `path`; the file name doubles as the source id.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "reviews".to_string());
        Self { id, path }
    }

    /// Override the source id used in log lines.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Input file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReviewSource for JsonlReviewSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self) -> Result<LoadedReviews, InsightsError> {
        let mut stats = LoadStats::default();
        let mut records = Vec::new();
        let id = &self.id;

        for (idx, line) in LineFile::open(&self.path)?.enumerate() {
            let line = line?;
            let line_no = idx + 1;
            stats.lines += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let value = match serde_json::from_str::<Value>(trimmed) {
                Ok(value) => value,
                Err(err) => {
                    debug!("[reviews:{id}] skipping undecodable line {line_no}: {err}");
                    continue;
                }
            };
            stats.decoded += 1;
            match ReviewRecord::from_json(&value) {
                Ok(record) => records.push(record),
                Err(err) => {
                    debug!("[reviews:{id}] skipping line {line_no}: {err}");
                }
            }
        }

        stats.retained = records.len();
        info!(
            "[reviews:{}] loaded {} of {} lines from {} ({} skipped)",
            self.id,
            stats.retained,
            stats.lines,
            self.path.display(),
            stats.skipped()
        );
        Ok(LoadedReviews { records, stats })
    }
}

/// Load every valid review from a line-delimited JSON file, in file order.
pub fn load_reviews(path: impl AsRef<Path>) -> Result<Vec<ReviewRecord>, InsightsError> {
    JsonlReviewSource::new(path.as_ref())
        .load()
        .map(|loaded| loaded.records)
}
