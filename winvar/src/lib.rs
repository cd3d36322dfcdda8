//! winvar - Noise estimation by minimum-variance window search
//!
//! Finds the flattest `t × t` region of a grayscale image, whose variance is
//! a simple estimate of the image noise. The work is split across crates:
//!
//! - [`winvar_core`]: the [`Grid`] sample container
//! - [`io`]: PGM reading and writing
//! - [`stats`]: integral images and the three variance scans
//!
//! This crate adds the run configuration, a timing harness and report
//! formatting used by the `winvar` binary.
//!
//! # Example
//!
//! ```
//! use winvar::stats::VarianceMethod;
//! use winvar::{Grid, bench};
//!
//! let grid = Grid::from_rows(&[vec![4, 4, 9], vec![4, 4, 1]]).unwrap();
//! let timed = bench::run_timed(VarianceMethod::IntegralImage, &grid, 2).unwrap();
//! assert_eq!((timed.result.row, timed.result.col), (0, 0));
//! assert_eq!(timed.result.variance, 0.0);
//! ```

pub mod bench;
pub mod config;
pub mod report;
pub mod telemetry;

pub use config::{ConfigError, RunConfig, WindowSpec};

// Re-export core types (primary data structures used everywhere)
pub use winvar_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use winvar_io as io;
pub use winvar_stats as stats;
