//! Error types for winvar-stats
//!
//! Every error aborts the computation that raised it; no partial results
//! are returned.

use thiserror::Error;

/// Errors that can occur while building integral images or scanning windows
#[derive(Debug, Error)]
pub enum StatsError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] winvar_core::Error),

    /// An accumulated integral-image cell wrapped to a negative value
    #[error("overflow detected at ({row}, {col}) while accumulating power {exponent}")]
    OverflowDetected { row: u32, col: u32, exponent: u32 },

    /// No window of this size fits in the grid
    #[error("window {window}x{window} does not fit in {rows}x{cols} grid")]
    WindowTooLarge { window: u32, rows: u32, cols: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for variance operations
pub type StatsResult<T> = Result<T, StatsError>;
