//! Error types for spamsift.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SpamSiftError`] enum.
//!
//! # Examples
//!
//! ```
//! use spamsift::error::{Result, SpamSiftError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpamSiftError::invalid_argument("test_size must be in (0, 1)"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for spamsift operations.
#[derive(Error, Debug)]
pub enum SpamSiftError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV reading or writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Dataset content that cannot be interpreted as labeled messages
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model fitting or prediction errors
    #[error("Model error: {0}")]
    Model(String),

    /// One or more persisted artifacts could not be found
    #[error(
        "Missing model/vectorizer files: {}. Train the model first: `spamsift train`",
        format_paths(.paths)
    )]
    MissingArtifacts { paths: Vec<PathBuf> },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with SpamSiftError.
pub type Result<T> = std::result::Result<T, SpamSiftError>;

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl SpamSiftError {
    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        SpamSiftError::Dataset(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SpamSiftError::Analysis(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        SpamSiftError::Model(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        SpamSiftError::SerializationError(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SpamSiftError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SpamSiftError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Whether this error means the trained artifacts are absent.
    pub fn is_missing_artifacts(&self) -> bool {
        matches!(self, SpamSiftError::MissingArtifacts { .. })
    }
}

impl From<bincode::Error> for SpamSiftError {
    fn from(err: bincode::Error) -> Self {
        SpamSiftError::SerializationError(err.to_string())
    }
}
