//! Error types for cutting optimization and project I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the optimizer.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("No positive stock length configured")]
    NoStockLengths,

    #[error("Splice overlap {overlap} m for diameter {diameter} mm is not shorter than the longest stock bar ({max_length} m)")]
    InvalidSpliceOverlap {
        diameter: u32,
        overlap: f64,
        max_length: f64,
    },

    #[error("Piece {piece_id} ({length} m) is longer than every stock length (max {max_length} m)")]
    PieceTooLong {
        piece_id: String,
        length: f64,
        max_length: f64,
    },

    #[error("Duplicate element id: {id}")]
    DuplicateElement { id: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OptimizeError {
    /// Whether this error comes from the optimizer settings rather than input data.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            OptimizeError::NoStockLengths | OptimizeError::InvalidSpliceOverlap { .. }
        )
    }
}

/// Result type alias for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimizeError>;
