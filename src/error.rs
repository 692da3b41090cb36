use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the fitpro core and its document stores.
#[derive(Error, Debug)]
pub enum FitError {
    /// A session was requested with a non-positive duration.
    #[error("Invalid duration: {0} seconds (must be positive)")]
    InvalidDuration(i64),

    /// A session duration that does not fit the countdown's range.
    #[error("Invalid duration: {0} seconds (at most 4294967295 allowed)")]
    DurationTooLong(i64),

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document on disk is not valid JSON for its expected shape.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Program not found: {0}")]
    ProgramNotFound(String),

    /// The named document failed to load earlier, so it cannot be changed.
    #[error("The {0} could not be loaded")]
    Unavailable(&'static str),

    /// A user-entered value could not be accepted.
    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FitError>;
