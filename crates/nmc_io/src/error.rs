//! Adapter layer errors.

use thiserror::Error;

/// Errors raised by the tabular adapters.
#[derive(Debug, Error)]
pub enum IoError {
    /// Underlying file or stream error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Delimited-text parsing or writing error.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A cell that should hold a number does not.
    #[error("malformed number '{value}' at row {row}, column '{column}'")]
    MalformedNumber {
        /// Zero-based data row index.
        row: usize,
        /// Column header.
        column: String,
        /// Offending cell content.
        value: String,
    },

    /// A profile's length disagrees with the time grid.
    #[error("profile for {kind} has {actual} points, expected {expected}")]
    ProfileLengthMismatch {
        /// XVA kind token.
        kind: String,
        /// Expected number of time points.
        expected: usize,
        /// Actual profile length.
        actual: usize,
    },
}
