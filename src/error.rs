//! Error types for the mojebanka converter library.

use std::io;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a statement export.
///
/// Blocks that do not look like a transaction and malformed dates are not
/// errors: the parser skips the former and maps the latter to "no date".
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred during read or write operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error writing the tab-separated table.
    #[error("CSV writing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Statement pattern failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Input bytes are not valid in the source code page.
    #[error("Cannot decode input as {encoding}: {message}")]
    Encoding { encoding: String, message: String },

    /// Encoding label not known to the decoder.
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// Invalid output format specified.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Invalid amount format.
    #[error("Invalid amount format: {0}")]
    InvalidAmount(String),
}
