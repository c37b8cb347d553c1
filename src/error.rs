//! Error types for the newsrank library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`RankError`] enum. Failures of the external query expansion service have
//! their own [`ExpansionError`](crate::expansion::ExpansionError) type, which
//! converts into `RankError` so the pipeline can propagate it with `?`.
//!
//! # Examples
//!
//! ```
//! use newsrank::error::{RankError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(RankError::invalid_argument("top_k must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::expansion::ExpansionError;

/// The main error type for newsrank operations.
#[derive(Error, Debug)]
pub enum RankError {
    /// I/O errors (file operations, stdin, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON value does not have the shape of a document
    #[error("Parse error: {0}")]
    Parse(String),

    /// A dataset line could not be turned into a document
    #[error("Dataset error at line {line}: {message}")]
    Dataset { line: usize, message: String },

    /// The query expansion service failed
    #[error("Query expansion failed: {0}")]
    Expansion(#[from] ExpansionError),

    /// Chart rendering errors
    #[error("Chart error: {0}")]
    Chart(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with RankError.
pub type Result<T> = std::result::Result<T, RankError>;

impl RankError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        RankError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        RankError::Config(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        RankError::Parse(msg.into())
    }

    /// Create a new dataset error for the given 1-based line number.
    pub fn dataset<S: Into<String>>(line: usize, msg: S) -> Self {
        RankError::Dataset {
            line,
            message: msg.into(),
        }
    }

    /// Create a new chart error.
    pub fn chart<S: Into<String>>(msg: S) -> Self {
        RankError::Chart(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        RankError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        RankError::Other(msg.into())
    }
}
