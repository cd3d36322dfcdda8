//! Direct variance scans over the raw grid
//!
//! These visit all `t²` samples of every window, so they cost O(t²) per
//! window. They share the scan order, window-size checks and tie-break rule
//! of the integral-image search and serve as its baselines.

use crate::{StatsError, StatsResult};
use crate::variance::{MinTracker, VarianceResult, check_window, variance_from_sums};
use winvar_core::Grid;

/// Minimum-variance window by visiting each window twice: once for the
/// mean, once for the squared deviations from it.
pub fn variance_by_two_pass(grid: &Grid, t: u32) -> StatsResult<VarianceResult> {
    let (rows, cols) = grid.dimensions();
    check_window(rows, cols, t)?;

    let n = t as f64 * t as f64;
    let mut tracker = MinTracker::new(t);

    for i in 0..=rows - t {
        for j in 0..=cols - t {
            let mut window_sum = 0.0;
            for wi in i..i + t {
                for &v in &grid.row(wi)[j as usize..(j + t) as usize] {
                    window_sum += v as f64;
                }
            }
            let mean = window_sum / n;

            let mut deviations = 0.0;
            for wi in i..i + t {
                for &v in &grid.row(wi)[j as usize..(j + t) as usize] {
                    let d = v as f64 - mean;
                    deviations += d * d;
                }
            }

            tracker.offer(i, j, mean, deviations / n);
        }
    }

    Ok(tracker.finish())
}

/// Minimum-variance window by accumulating the sum and the sum of squares
/// in a single visit of each window.
///
/// # Errors
///
/// Besides the window-size errors, returns `StatsError::OverflowDetected` at
/// the first sample whose contribution does not fit in an `i64` sum
/// (`exponent` 1 for the plain sum, 2 for the sum of squares).
pub fn variance_by_one_pass(grid: &Grid, t: u32) -> StatsResult<VarianceResult> {
    let (rows, cols) = grid.dimensions();
    check_window(rows, cols, t)?;

    let mut tracker = MinTracker::new(t);

    for i in 0..=rows - t {
        for j in 0..=cols - t {
            let mut sum = 0i64;
            let mut sum_sq = 0i64;
            for wi in i..i + t {
                for (wj, &v) in (j..j + t).zip(&grid.row(wi)[j as usize..(j + t) as usize]) {
                    let overflow = |exponent| StatsError::OverflowDetected {
                        row: wi,
                        col: wj,
                        exponent,
                    };
                    sum = sum.checked_add(v).ok_or_else(|| overflow(1))?;
                    sum_sq = v
                        .checked_mul(v)
                        .and_then(|sq| sum_sq.checked_add(sq))
                        .ok_or_else(|| overflow(2))?;
                }
            }
            let (mean, variance) = variance_from_sums(sum, sum_sq, t);
            tracker.offer(i, j, mean, variance);
        }
    }

    Ok(tracker.finish())
}
