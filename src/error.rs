//! Error types for hilite

use thiserror::Error;

/// Result type alias for hilite operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Crate-level error types
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode syntax file {source_name}: {message}")]
    Decode { source_name: String, message: String },

    #[error("Syntax '{filetype}': {source}")]
    Grammar {
        filetype: String,
        #[source]
        source: GrammarError,
    },

    #[error("Unknown filetype: {0}")]
    UnknownFiletype(String),

    #[error("Unsupported syntax file format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Message(String),
}

/// Errors raised while compiling a grammar description
///
/// Any of these aborts the build of that one grammar.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("invalid regex for '{key}': {source}")]
    Regex {
        key: String,
        #[source]
        source: regex::Error,
    },

    #[error("region '{key}' is missing required '{field}'")]
    MissingField { key: String, field: &'static str },
}

impl GrammarError {
    /// The description key that caused the failure
    pub fn key(&self) -> &str {
        match self {
            GrammarError::Regex { key, .. } => key,
            GrammarError::MissingField { key, .. } => key,
        }
    }
}
