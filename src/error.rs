// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the analysis pipeline. Every one of them ends the run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: {reason}")]
    MalformedRow { row: u64, reason: String },

    #[error("need at least {required} samples, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    #[error("length mismatch: {left} voltage values vs {right} time values")]
    LengthMismatch { left: usize, right: usize },

    #[error("invalid smoothing window: {0} (must be odd and non-zero)")]
    InvalidWindowSize(usize),

    #[error("invalid smoothing order: {order} (must be less than window size {window})")]
    InvalidPolynomialOrder { order: usize, window: usize },

    #[error("polynomial fit of degree {degree} failed: {reason}")]
    FitFailed { degree: usize, reason: String },

    #[error("invalid configuration '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("fit archive record error: {0}")]
    Archive(#[from] serde_json::Error),
}

impl AnalysisError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

// src/error.rs
