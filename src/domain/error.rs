//! Domain-level error types for chat-link-extractor.
//!
//! All errors are typed with `thiserror`. Per-row and per-URL problems are
//! not errors at all: they fall back to defined values (dropped rows, the
//! `"Unknown"` domain) and never reach this type.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Input could not be tokenized as delimited tabular text.
    #[error("{}", parse_message(message, *line))]
    Parse { message: String, line: Option<u64> },

    /// Upload rejected because it is not a `.csv` file.
    #[error("Unsupported file (only .csv is accepted): {path}")]
    UnsupportedFile { path: PathBuf },

    /// Upload rejected because it exceeds the size limit.
    #[error("File too large: {path} is {size} bytes (limit {limit} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    /// JSON parsing or serialization failed.
    #[error("JSON parse error: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

fn parse_message(message: &str, line: Option<u64>) -> String {
    match line {
        Some(line) => format!("CSV parse error at line {line}: {message}"),
        None => format!("CSV parse error: {message}"),
    }
}

impl AppError {
    /// Create a parse error without position information.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            line: None,
        }
    }

    /// Create a parse error from a `csv` tokenizer error.
    pub fn csv(err: &csv::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
            line: err.position().map(csv::Position::line),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Whether this is the tabular `ParseError` kind.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
