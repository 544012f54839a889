use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for input loading, scoring, configuration, and output failures.
#[derive(Debug, Error)]
pub enum InsightsError {
    #[error("sentiment scorer received empty or whitespace-only text")]
    EmptyInput,
    #[error("review input '{}' is unavailable: {reason}", path.display())]
    InputUnavailable { path: PathBuf, reason: String },
    #[error("review input '{}' is malformed: {details}", path.display())]
    InputInconsistent { path: PathBuf, details: String },
    #[error("failed writing output '{}': {reason}", path.display())]
    OutputFailed { path: PathBuf, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Reason a decoded JSON line was rejected as a review record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("review line is not a JSON object")]
    NotAnObject,
    #[error("required field '{0}' is missing or empty")]
    MissingField(&'static str),
    #[error("rating {0} is not a usable rating")]
    UnusableRating(f64),
}
