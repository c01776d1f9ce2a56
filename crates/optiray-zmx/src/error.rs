//! Error types for ZMX prescription operations.

use thiserror::Error;

/// Errors that can occur while reading or writing a ZMX prescription.
#[derive(Error, Debug)]
pub enum ZmxError {
    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed directive: a token that should be numeric is not, or a
    /// directive has fewer arguments than required. Aborts the parse.
    #[error("Parse error at line {line}: {message}")]
    Line {
        /// Line number (1-indexed).
        line: usize,
        /// Error message.
        message: String,
    },

    /// No surface boundaries in the input — no system can be produced.
    #[error("No surfaces found in ZMX prescription")]
    NoSurfaces,
}

impl ZmxError {
    /// Create a parse error for the given line.
    pub fn line(line: usize, message: impl Into<String>) -> Self {
        Self::Line {
            line,
            message: message.into(),
        }
    }
}
