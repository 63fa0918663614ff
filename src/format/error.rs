//! Error types for annotation format operations.

use thiserror::Error;

/// Errors that can occur during annotation format operations.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Normalized coordinates need a surface with a positive size
    #[error("Surface needs a positive size for normalized coordinates, got {width}x{height}")]
    MissingDimensions {
        /// Surface width in pixels
        width: f64,
        /// Surface height in pixels
        height: f64,
    },
}

/// Why a single label line was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    /// Wrong number of whitespace-separated fields
    #[error("expected 5 fields, found {found}")]
    FieldCount {
        /// Number of fields on the line
        found: usize,
    },

    /// Class id is not a non-negative integer
    #[error("invalid class id '{0}'")]
    InvalidClassId(String),

    /// A geometry field is not a finite number
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}
