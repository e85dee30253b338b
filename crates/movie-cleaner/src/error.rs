//! Error types for the cleaning pipeline and batch runner.
//!
//! Per-cell and per-column problems never surface here: they are recovered
//! inside the stage that hit them. What remains are file-level and
//! invocation-level failures.
//!
//! Errors serialize as `{ code, message }` so a batch summary can be emitted
//! as JSON.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the cleaner.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// The folder holding uncleaned files does not exist.
    #[error("Input folder not found: {}", .0.display())]
    InputFolderNotFound(PathBuf),

    /// A path expected to be a directory is something else.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An input file could not be read or parsed as CSV.
    #[error("Failed to read '{}': {reason}", path.display())]
    FileRead { path: PathBuf, reason: String },

    /// A cleaned file could not be written.
    #[error("Failed to write '{}': {reason}", path.display())]
    FileWrite { path: PathBuf, reason: String },

    /// Diagnostics could not be computed or written.
    #[error("Failed to produce diagnostics: {0}")]
    Diagnostics(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InputFolderNotFound(_) => "INPUT_FOLDER_NOT_FOUND",
            Self::NotADirectory(_) => "NOT_A_DIRECTORY",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::FileRead { .. } => "FILE_READ_FAILED",
            Self::FileWrite { .. } => "FILE_WRITE_FAILED",
            Self::Diagnostics(_) => "DIAGNOSTICS_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether the batch loop may skip the current file and keep going.
    ///
    /// Invocation-level problems (bad config, missing input folder) end the run.
    pub fn is_file_level(&self) -> bool {
        match self {
            Self::FileRead { .. }
            | Self::FileWrite { .. }
            | Self::Diagnostics(_)
            | Self::Io(_)
            | Self::Polars(_)
            | Self::Json(_)
            | Self::ColumnNotFound(_) => true,
            Self::InputFolderNotFound(_) | Self::NotADirectory(_) | Self::InvalidConfig(_) => {
                false
            }
            Self::WithContext { source, .. } => source.is_file_level(),
        }
    }
}

impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            CleaningError::InputFolderNotFound(PathBuf::from("x")).error_code(),
            "INPUT_FOLDER_NOT_FOUND"
        );
        assert_eq!(
            CleaningError::ColumnNotFound("GENRE".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_is_file_level() {
        let read = CleaningError::FileRead {
            path: PathBuf::from("movies.csv"),
            reason: "bad".to_string(),
        };
        assert!(read.is_file_level());
        assert!(!CleaningError::InputFolderNotFound(PathBuf::from("in")).is_file_level());
        assert!(!CleaningError::InvalidConfig("x".to_string()).is_file_level());
    }

    #[test]
    fn test_error_serialization() {
        let error = CleaningError::ColumnNotFound("RunTime".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("RunTime"));
    }

    #[test]
    fn test_with_context_preserves_code() {
        let error = CleaningError::FileWrite {
            path: PathBuf::from("out.csv"),
            reason: "denied".to_string(),
        }
        .with_context("While saving movies.csv");
        assert!(error.to_string().contains("While saving movies.csv"));
        assert_eq!(error.error_code(), "FILE_WRITE_FAILED");
        assert!(error.is_file_level());
    }
}
