//! Error types for bwpack operations.
//!
//! A single error enum covers every failure the codecs can surface: stream
//! exhaustion, structurally invalid headers, and rejected arguments. All
//! failures are terminal for the block being processed; no component retries
//! or degrades.

use std::io;
use thiserror::Error;

/// The main error type for bwpack operations.
#[derive(Debug, Error)]
pub enum BwpackError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A read was attempted past the end of available data.
    #[error("Unexpected end of stream: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// A serialized header is structurally invalid.
    #[error("Corrupt header: {message}")]
    CorruptHeader {
        /// Description of the structural problem.
        message: String,
    },

    /// An argument outside the operation's domain was supplied.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },
}

/// Result type alias for bwpack operations.
pub type Result<T> = std::result::Result<T, BwpackError>;

impl BwpackError {
    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create a corrupt header error.
    pub fn corrupt_header(message: impl Into<String>) -> Self {
        Self::CorruptHeader {
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
