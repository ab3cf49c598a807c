//! Error handling for addrsplit
//!
//! This module defines the error type shared by the validator, parser,
//! stores and migrator. It separates per-record problems (a malformed
//! address, which the migrator records and moves past) from batch-level
//! failures (an unreadable source or a rejected write, which abort).
//!
//! The module uses thiserror to minimize boilerplate code.

use thiserror::Error;

/// AddrError represents all possible errors that can occur in addrsplit
#[derive(Error, Debug)]
pub enum AddrError {
    /// The address string does not have the expected four-segment shape
    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    /// The student collection could not be read
    #[error("Failed to read student records: {0}")]
    SourceReadError(String),

    /// The address store rejected a write for a student
    #[error("Failed to write address for student '{student_id}': {reason}")]
    SinkWriteError { student_id: String, reason: String },

    /// The delimiter collides with a character allowed inside a segment
    #[error("Invalid delimiter '{0}': must not be alphanumeric, '.' or whitespace")]
    InvalidDelimiter(char),

    /// Error during file system operations (reading/writing files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while parsing or writing CSV data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error compiling the validation pattern
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl AddrError {
    /// Whether the error concerns a single record rather than the whole batch
    pub fn is_per_record(&self) -> bool {
        matches!(self, AddrError::MalformedAddress(_))
    }
}

/// Result type alias for operations that can produce an AddrError
pub type AddrResult<T> = std::result::Result<T, AddrError>;
