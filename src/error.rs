//! Error types for the marks analysis pipeline.

use thiserror::Error;

/// Every way an analysis can fail. None of these are retried; the caller
/// receives the error and no partial report.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input could not be opened or parsed as a table.
    #[error("unreadable file {path}: {reason}")]
    UnreadableFile { path: String, reason: String },

    /// The table has a header but no data rows.
    #[error("dataset has no rows")]
    EmptyDataset,

    /// No subject-score column survived classification and fallback.
    #[error("no subject columns with marks found")]
    InsufficientData,

    /// The chart backend failed to draw or encode an image.
    #[error("chart rendering failed: {0}")]
    ChartRender(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    pub(crate) fn unreadable(path: &str, reason: impl ToString) -> Self {
        AnalysisError::UnreadableFile {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AnalysisError>;
