//! Error types for the Lexis library.
//!
//! All errors are represented by the [`LexisError`] enum. The taxonomy
//! follows the pipeline's failure model: configuration errors and fatal
//! remote errors abort a run, while retryable remote rejections and
//! per-record fix failures are carried as values (see [`crate::lookup`] and
//! [`crate::analysis`]) rather than raised through this type.
//!
//! # Examples
//!
//! ```
//! use lexis::error::{LexisError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LexisError::config("unsupported language"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Lexis operations.
#[derive(Error, Debug)]
pub enum LexisError {
    /// I/O errors (file operations, snapshot reads, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid language / encoding-mode argument combinations. Always fatal.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Structural errors in BetaCode or Unicode Greek input.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A feature was requested that is absent from an analysis record.
    #[error("Feature error: {0}")]
    Feature(String),

    /// Cache-related errors (snapshot corruption, key collisions on import).
    #[error("Cache error: {0}")]
    Cache(String),

    /// Fatal transport failure contacting the lexical service. Aborts the
    /// current batch; never cached.
    #[error("Remote error: {0}")]
    Remote(String),

    /// Malformed analysis documents.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// SQLite cache backing errors.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot serialization errors.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LexisError.
pub type Result<T> = std::result::Result<T, LexisError>;

impl LexisError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        LexisError::Config(msg.into())
    }

    /// Create a new encoding error.
    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        LexisError::Encoding(msg.into())
    }

    /// Create a new feature error.
    pub fn feature<S: Into<String>>(msg: S) -> Self {
        LexisError::Feature(msg.into())
    }

    /// Create a new cache error.
    pub fn cache<S: Into<String>>(msg: S) -> Self {
        LexisError::Cache(msg.into())
    }

    /// Create a new fatal remote error.
    pub fn remote<S: Into<String>>(msg: S) -> Self {
        LexisError::Remote(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        LexisError::SerializationError(msg.into())
    }
}

impl From<bincode::Error> for LexisError {
    fn from(err: bincode::Error) -> Self {
        LexisError::SerializationError(err.to_string())
    }
}
