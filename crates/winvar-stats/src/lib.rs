//! winvar-stats - Minimum-variance window search
//!
//! This crate finds the `t × t` window of a grayscale grid with the lowest
//! population variance, a cheap estimate of the image's noise floor:
//!
//! - Integral images (summed area tables) and O(1) rectangle sums
//! - Windowed variance search over a pair of integral images
//! - Direct two-pass and one-pass scans used as baselines
//! - [`VarianceMethod`] to pick between the three
//!
//! # Example
//!
//! ```
//! use winvar_core::Grid;
//! use winvar_stats::variance_by_integral_image;
//!
//! let grid = Grid::from_rows(&[vec![9, 1, 5], vec![2, 5, 5], vec![8, 5, 5]]).unwrap();
//! let best = variance_by_integral_image(&grid, 2).unwrap();
//! assert_eq!((best.row, best.col), (1, 1));
//! assert_eq!(best.variance, 0.0);
//! ```

mod error;
pub mod integral;
pub mod method;
pub mod scan;
pub mod variance;

pub use error::{StatsError, StatsResult};
pub use integral::{IntegralPair, Power, build_integral, range_sum};
pub use method::VarianceMethod;
pub use scan::{variance_by_one_pass, variance_by_two_pass};
pub use variance::{
    VarianceResult, find_min_variance_in_pair, find_min_variance_window,
    variance_by_integral_image,
};
