use std::path::PathBuf;

use thiserror::Error;

/// Failures of the aggregate computations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// An aggregate was requested over zero records.
    #[error("cannot aggregate an empty record set")]
    EmptyInput,

    /// Paired sequences of different length.
    #[error("sequence lengths differ ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    /// Correlation with a zero-variance input (or fewer than two values).
    #[error("correlation is undefined for constant input")]
    UndefinedCorrelation,

    /// An intermediate sum overflowed to infinity or NaN.
    #[error("values too large to aggregate")]
    NonFinite,
}

/// Failures while reading the student data file.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("duplicate student_id {0}")]
    DuplicateId(u64),

    #[error("file contains no student records")]
    Empty,

    #[error("loader thread terminated without a result")]
    Disconnected,
}
