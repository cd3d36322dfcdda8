//! Error types for winvar-core
//!
//! Provides a unified error type for all operations on [`Grid`](crate::Grid).
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// winvar core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Grid with a zero-sized dimension
    #[error("invalid grid dimensions: {rows}x{cols}")]
    InvalidDimension { rows: u32, cols: u32 },

    /// Access outside the grid extent
    #[error("index out of bounds: ({row}, {col}) outside {rows}x{cols}")]
    IndexOutOfBounds {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },

    /// Samples must be non-negative
    #[error("negative sample {value} at ({row}, {col})")]
    NegativeSample { row: u32, col: u32, value: i64 },

    /// Two grids that must agree in size do not
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
