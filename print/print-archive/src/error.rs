//! Error types for archive reading and metadata normalization.

use std::path::PathBuf;

use print_estimate::GeometryError;
use thiserror::Error;

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Result type for metadata parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur while turning an archive into a summary.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The bytes are not a ZIP container.
    #[error("unreadable archive: {message}")]
    Unreadable {
        /// What the container reader reported.
        message: String,
    },

    /// The container holds nothing usable, or an entry cannot be decompressed.
    #[error("empty or corrupt archive: {message}")]
    EmptyOrCorrupt {
        /// Description of the problem.
        message: String,
    },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Vendor metadata could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The geometry fallback failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl ArchiveError {
    /// Create an `Unreadable` error with the given message.
    #[must_use]
    pub fn unreadable(message: impl Into<String>) -> Self {
        Self::Unreadable {
            message: message.into(),
        }
    }

    /// Create an `EmptyOrCorrupt` error with the given message.
    #[must_use]
    pub fn empty_or_corrupt(message: impl Into<String>) -> Self {
        Self::EmptyOrCorrupt {
            message: message.into(),
        }
    }
}

/// Errors raised while extracting plates from vendor metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No plate could be extracted from the archive.
    #[error("no plates found in archive")]
    NoPlatesFound,

    /// A numeric field holds something that is not a finite number.
    #[error("invalid number in '{field}': {value:?}")]
    InvalidNumber {
        /// Field name.
        field: String,
        /// Raw value.
        value: String,
    },

    /// A duration field is not in `1d 2h 3m 4s` form or plain seconds.
    #[error("invalid duration in '{field}': {value:?}")]
    InvalidDuration {
        /// Field name.
        field: String,
        /// Raw value.
        value: String,
    },

    /// An XML entry is malformed.
    #[error("invalid XML in {entry}: {message}")]
    InvalidXml {
        /// Archive entry path.
        entry: String,
        /// Parser message.
        message: String,
    },

    /// A JSON entry is malformed.
    #[error("invalid JSON in {entry}: {message}")]
    InvalidJson {
        /// Archive entry path.
        entry: String,
        /// Parser message.
        message: String,
    },

    /// A 3MF model part is structurally invalid.
    #[error("invalid model in {entry}: {message}")]
    InvalidModel {
        /// Archive entry path.
        entry: String,
        /// Description of the problem.
        message: String,
    },
}

impl ParseError {
    /// Create an `InvalidNumber` error.
    #[must_use]
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an `InvalidDuration` error.
    #[must_use]
    pub fn invalid_duration(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidDuration {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an `InvalidXml` error.
    #[must_use]
    pub fn invalid_xml(entry: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidXml {
            entry: entry.into(),
            message: message.to_string(),
        }
    }

    /// Create an `InvalidJson` error.
    #[must_use]
    pub fn invalid_json(entry: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidJson {
            entry: entry.into(),
            message: message.to_string(),
        }
    }

    /// Create an `InvalidModel` error.
    #[must_use]
    pub fn invalid_model(entry: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidModel {
            entry: entry.into(),
            message: message.into(),
        }
    }
}
