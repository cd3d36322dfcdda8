//! winvar-core - Basic data structures for windowed variance estimation
//!
//! This crate provides the [`Grid`] container shared by the rest of the
//! workspace: a dense rectangle of non-negative `i64` samples. Source images,
//! summed-area tables and cropped windows are all represented as grids.

pub mod error;
pub mod grid;

pub use error::{Error, Result};
pub use grid::Grid;
