//! Minimum-variance window search over integral images
//!
//! Scans every `t × t` window of a grid in row-major order and reports the
//! one with the lowest population variance. With a sum and a sum-of-squares
//! integral image each window costs eight lookups, independent of `t`.
//!
//! For a window of `n = t²` samples with sum `S` and sum of squares `Q`:
//!
//! ```text
//! mean     = S / n
//! variance = (Q - n * mean²) / n
//! ```

use crate::integral::{IntegralPair, range_sum_unchecked};
use crate::{StatsError, StatsResult};
use tracing::debug;
use winvar_core::{Error, Grid};

/// Best window found by a variance scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceResult {
    /// Top row of the window
    pub row: u32,
    /// Left column of the window
    pub col: u32,
    /// Population variance of the window
    pub variance: f64,
    /// Mean of the window
    pub mean: f64,
    /// Window side length
    pub window: u32,
}

/// Validate a window size against a `rows × cols` grid.
pub(crate) fn check_window(rows: u32, cols: u32, t: u32) -> StatsResult<()> {
    if t == 0 {
        return Err(StatsError::InvalidParameters(
            "window size must be at least 1".into(),
        ));
    }
    if t > rows || t > cols {
        return Err(StatsError::WindowTooLarge {
            window: t,
            rows,
            cols,
        });
    }
    Ok(())
}

/// Mean and variance of a window from its exact integer sums.
#[inline]
pub(crate) fn variance_from_sums(sum: i64, sum_sq: i64, t: u32) -> (f64, f64) {
    let n = t as f64 * t as f64;
    let mean = sum as f64 / n;
    let variance = (sum_sq as f64 - n * (mean * mean)) / n;
    (mean, variance)
}

/// Running minimum over a row-major scan.
///
/// Only a strictly lower variance replaces the current best, so among equal
/// minima the first window scanned wins.
pub(crate) struct MinTracker {
    window: u32,
    best: VarianceResult,
}

impl MinTracker {
    pub(crate) fn new(window: u32) -> Self {
        Self {
            window,
            best: VarianceResult {
                row: 0,
                col: 0,
                variance: f64::INFINITY,
                mean: 0.0,
                window,
            },
        }
    }

    #[inline]
    pub(crate) fn offer(&mut self, row: u32, col: u32, mean: f64, variance: f64) {
        if variance < self.best.variance {
            self.best = VarianceResult {
                row,
                col,
                variance,
                mean,
                window: self.window,
            };
        }
    }

    pub(crate) fn finish(self) -> VarianceResult {
        self.best
    }
}

/// Find the `t × t` window with the lowest variance, given the sum and
/// sum-of-squares integral images of the source.
///
/// # Errors
///
/// - `StatsError::Core(DimensionMismatch)` if the two images differ in size
/// - `StatsError::InvalidParameters` if `t` is 0
/// - `StatsError::WindowTooLarge` if `t` exceeds either dimension
pub fn find_min_variance_window(
    sum_image: &Grid,
    sum_sq_image: &Grid,
    t: u32,
) -> StatsResult<VarianceResult> {
    if sum_image.dimensions() != sum_sq_image.dimensions() {
        return Err(Error::DimensionMismatch {
            expected: sum_image.dimensions(),
            actual: sum_sq_image.dimensions(),
        }
        .into());
    }
    let (rows, cols) = sum_image.dimensions();
    check_window(rows, cols, t)?;

    let mut tracker = MinTracker::new(t);
    for i in 0..=rows - t {
        for j in 0..=cols - t {
            let sum = range_sum_unchecked(sum_image, i, j, t);
            let sum_sq = range_sum_unchecked(sum_sq_image, i, j, t);
            let (mean, variance) = variance_from_sums(sum, sum_sq, t);
            tracker.offer(i, j, mean, variance);
        }
    }

    let result = tracker.finish();
    debug!(
        window = t,
        row = result.row,
        col = result.col,
        variance = result.variance,
        mean = result.mean,
        "minimum-variance window"
    );
    Ok(result)
}

/// Same as [`find_min_variance_window`], for an already paired set of images.
pub fn find_min_variance_in_pair(pair: &IntegralPair, t: u32) -> StatsResult<VarianceResult> {
    find_min_variance_window(pair.sum(), pair.sum_sq(), t)
}

/// Build both integral images of `grid` and find its minimum-variance
/// `t × t` window.
///
/// The window size is checked before the integral images are allocated.
pub fn variance_by_integral_image(grid: &Grid, t: u32) -> StatsResult<VarianceResult> {
    check_window(grid.rows(), grid.cols(), t)?;
    let pair = IntegralPair::build(grid)?;
    find_min_variance_in_pair(&pair, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integral::{Power, build_integral};

    fn integrals(grid: &Grid) -> (Grid, Grid) {
        (
            build_integral(grid, Power::Linear).unwrap(),
            build_integral(grid, Power::Square).unwrap(),
        )
    }

    #[test]
    fn test_single_pixel_window_has_zero_variance() {
        let grid = Grid::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
        let (sum, sum_sq) = integrals(&grid);
        let result = find_min_variance_window(&sum, &sum_sq, 1).unwrap();
        assert_eq!((result.row, result.col), (0, 0));
        assert_eq!(result.variance, 0.0);
        assert_eq!(result.mean, 1.0);
        assert_eq!(result.window, 1);
    }

    #[test]
    fn test_whole_grid_window() {
        let grid = Grid::from_rows(&[vec![1, 1], vec![1, 1]]).unwrap();
        let result = variance_by_integral_image(&grid, 2).unwrap();
        assert_eq!((result.row, result.col), (0, 0));
        assert_eq!(result.mean, 1.0);
        assert_eq!(result.variance, 0.0);
    }

    #[test]
    fn test_population_variance() {
        // 1, 2, 3, 4: mean 2.5, population variance 1.25 (not 5/3)
        let grid = Grid::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
        let result = variance_by_integral_image(&grid, 2).unwrap();
        assert_eq!(result.mean, 2.5);
        assert!((result.variance - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_finds_flat_region() {
        let grid = Grid::from_rows(&[
            vec![10, 200, 30, 90],
            vec![150, 60, 60, 60],
            vec![5, 60, 60, 60],
            vec![70, 60, 60, 60],
        ])
        .unwrap();
        let result = variance_by_integral_image(&grid, 3).unwrap();
        assert_eq!((result.row, result.col), (1, 1));
        assert_eq!(result.variance, 0.0);
        assert_eq!(result.mean, 60.0);
    }

    #[test]
    fn test_tie_keeps_first_window() {
        // (0,0) and (0,2) are both flat; the earlier one wins
        let grid = Grid::from_rows(&[vec![4, 4, 1, 1], vec![4, 4, 1, 1], vec![9, 0, 9, 0]]).unwrap();
        let result = variance_by_integral_image(&grid, 2).unwrap();
        assert_eq!((result.row, result.col), (0, 0));
        assert_eq!(result.mean, 4.0);
    }

    #[test]
    fn test_tie_on_later_row() {
        // (0,2) and (1,2) are both flat; row-major order picks (0,2)
        let grid = Grid::from_rows(&[vec![9, 0, 3, 3], vec![0, 9, 3, 3], vec![5, 5, 3, 3]]).unwrap();
        let result = variance_by_integral_image(&grid, 2).unwrap();
        assert_eq!((result.row, result.col), (0, 2));
        assert_eq!(result.variance, 0.0);
    }

    #[test]
    fn test_window_too_large() {
        let grid = Grid::new(3, 5).unwrap();
        assert!(matches!(
            variance_by_integral_image(&grid, 4),
            Err(StatsError::WindowTooLarge {
                window: 4,
                rows: 3,
                cols: 5
            })
        ));
        assert!(variance_by_integral_image(&grid, 6).is_err());
        assert!(variance_by_integral_image(&grid, 3).is_ok());
    }

    #[test]
    fn test_zero_window_rejected() {
        let grid = Grid::new(3, 3).unwrap();
        assert!(matches!(
            variance_by_integral_image(&grid, 0),
            Err(StatsError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_mismatched_integral_images() {
        let a = Grid::new(3, 3).unwrap();
        let b = Grid::new(4, 3).unwrap();
        assert!(matches!(
            find_min_variance_window(&a, &b, 2),
            Err(StatsError::Core(_))
        ));
    }

    #[test]
    fn test_overflow_propagates() {
        let near_max = 3_037_000_499;
        let grid = Grid::new_with_value(2, 2, near_max).unwrap();
        assert!(matches!(
            variance_by_integral_image(&grid, 2),
            Err(StatsError::OverflowDetected { .. })
        ));
    }

    #[test]
    fn test_variance_from_sums() {
        // 2, 4, 4, 4, 5, 5, 7, 9 is the textbook example with variance 4;
        // pad to a 3x3 window with the mean (5) to keep the sums simple.
        let values = [2i64, 4, 4, 4, 5, 5, 7, 9, 5];
        let sum: i64 = values.iter().sum();
        let sum_sq: i64 = values.iter().map(|v| v * v).sum();
        let (mean, variance) = variance_from_sums(sum, sum_sq, 3);
        assert_eq!(mean, 5.0);
        assert!((variance - 32.0 / 9.0).abs() < 1e-12);
    }
}
