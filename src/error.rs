use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting an input stream into block files
#[derive(Debug, Error)]
pub enum ConverterError {
    /// Missing or contradictory configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed numeric configuration value
    #[error("Invalid value for '{field}': '{value}'")]
    InvalidInput { field: String, value: String },

    /// Input stream could not be opened
    #[error("Failed to open input '{path}': {source}")]
    InputOpen { path: PathBuf, source: io::Error },

    /// Input stream ended before the requested blocks were filled
    #[error("Input exhausted at block {block}, row {row}, column {column}")]
    InputExhausted { block: i64, row: usize, column: usize },

    /// A token in the input stream did not parse as a float
    #[error("Invalid float '{token}' at block {block}, row {row}, column {column}")]
    InvalidToken {
        token: String,
        block: i64,
        row: usize,
        column: usize,
    },

    /// Block file or plot script could not be created or written
    #[error("Failed to write '{path}': {source}")]
    OutputWrite { path: PathBuf, source: io::Error },

    /// Other I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Type alias for Results using ConverterError
pub type Result<T> = std::result::Result<T, ConverterError>;
