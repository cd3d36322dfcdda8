//! Integral images (summed area tables)
//!
//! An integral image holds, at each cell, the sum of `source^p` over every
//! cell above and to the left of it (inclusive). After one O(n²) pass the sum
//! over any axis-aligned rectangle is available from four lookups, which is
//! what makes the windowed variance query O(1) per window.
//!
//! The recursion is
//! `a(i,j) = v(i,j)^p - a(i-1,j-1) + a(i,j-1) + a(i-1,j)`, where any cell with
//! a row or column index of -1 reads as 0. Each cell depends only on cells
//! above it and to its left, so the table is filled in a single row-major pass.

use crate::{StatsError, StatsResult};
use tracing::debug;
use winvar_core::{Error, Grid};

/// Power applied to each sample before accumulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    /// Plain sums (exponent 1)
    Linear,
    /// Sums of squares (exponent 2)
    Square,
}

impl Power {
    /// Numeric exponent
    pub fn exponent(self) -> u32 {
        match self {
            Power::Linear => 1,
            Power::Square => 2,
        }
    }

    /// `value^exponent`, wrapping on overflow.
    #[inline]
    fn apply(self, value: i64) -> i64 {
        match self {
            Power::Linear => value,
            Power::Square => value.wrapping_mul(value),
        }
    }
}

/// Build an integral image of `source^power`.
///
/// The output has the same dimensions as `source`; `source` is not modified.
///
/// Accumulation wraps on overflow and every cell is checked for a sign flip.
/// This catches the usual overflow, where a running sum crosses `i64::MAX`,
/// but not a wrap that lands back in the non-negative range: a sample of
/// `2^32` squares to exactly `0` and passes unnoticed.
///
/// # Errors
///
/// Returns `StatsError::OverflowDetected` at the first cell whose accumulated
/// value is negative.
pub fn build_integral(source: &Grid, power: Power) -> StatsResult<Grid> {
    let (rows, cols) = source.dimensions();
    let mut acc = Grid::new(rows, cols)?;

    for i in 0..rows {
        for j in 0..cols {
            let original = power.apply(source.get_unchecked(i, j));
            let left = if j == 0 { 0 } else { acc.get_unchecked(i, j - 1) };
            let upper = if i == 0 { 0 } else { acc.get_unchecked(i - 1, j) };
            let intersected = if i == 0 || j == 0 {
                0
            } else {
                acc.get_unchecked(i - 1, j - 1)
            };

            let val = original
                .wrapping_sub(intersected)
                .wrapping_add(left)
                .wrapping_add(upper);
            if val < 0 {
                return Err(StatsError::OverflowDetected {
                    row: i,
                    col: j,
                    exponent: power.exponent(),
                });
            }
            acc.set_unchecked(i, j, val);
        }
    }

    debug!(
        rows,
        cols,
        exponent = power.exponent(),
        total = acc.get_unchecked(rows - 1, cols - 1),
        "built integral image"
    );
    Ok(acc)
}

/// Sum of the source over the `t × t` window with top-left `(row, col)`,
/// read from an integral image with four lookups.
///
/// `g[i+t-1][j+t-1] - g[i-1][j+t-1] - g[i+t-1][j-1] + g[i-1][j-1]`, where a
/// row or column of -1 contributes 0.
///
/// # Errors
///
/// Returns `StatsError::InvalidParameters` if `t` is 0 and
/// `StatsError::WindowTooLarge` if the window leaves the grid.
pub fn range_sum(integral: &Grid, row: u32, col: u32, t: u32) -> StatsResult<i64> {
    if t == 0 {
        return Err(StatsError::InvalidParameters(
            "window size must be at least 1".into(),
        ));
    }
    let (rows, cols) = integral.dimensions();
    let fits = |start: u32, extent: u32| start.checked_add(t).is_some_and(|end| end <= extent);
    if !fits(row, rows) || !fits(col, cols) {
        return Err(StatsError::WindowTooLarge {
            window: t,
            rows: rows.saturating_sub(row),
            cols: cols.saturating_sub(col),
        });
    }
    Ok(range_sum_unchecked(integral, row, col, t))
}

/// [`range_sum`] without validation; the window must lie inside the grid.
///
/// Wraps like [`build_integral`], so the result is the window sum modulo
/// `2^64` even when the table itself wrapped without changing sign.
#[inline]
pub(crate) fn range_sum_unchecked(integral: &Grid, row: u32, col: u32, t: u32) -> i64 {
    let bottom = row + t - 1;
    let right = col + t - 1;

    let mut val = integral.get_unchecked(bottom, right);
    if row > 0 {
        val = val.wrapping_sub(integral.get_unchecked(row - 1, right));
    }
    if col > 0 {
        val = val.wrapping_sub(integral.get_unchecked(bottom, col - 1));
    }
    if row > 0 && col > 0 {
        val = val.wrapping_add(integral.get_unchecked(row - 1, col - 1));
    }
    val
}

/// The two integral images needed for windowed variance
///
/// `sum` accumulates plain samples and `sum_sq` accumulates squared samples.
/// Both always have the same dimensions.
#[derive(Debug, Clone)]
pub struct IntegralPair {
    sum: Grid,
    sum_sq: Grid,
}

impl IntegralPair {
    /// Build both integral images of `source`.
    pub fn build(source: &Grid) -> StatsResult<Self> {
        let sum = build_integral(source, Power::Linear)?;
        let sum_sq = build_integral(source, Power::Square)?;
        Ok(Self { sum, sum_sq })
    }

    /// Pair two integral images built elsewhere.
    ///
    /// # Errors
    ///
    /// Returns a core `DimensionMismatch` if the images differ in size.
    pub fn from_parts(sum: Grid, sum_sq: Grid) -> StatsResult<Self> {
        if sum.dimensions() != sum_sq.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: sum.dimensions(),
                actual: sum_sq.dimensions(),
            }
            .into());
        }
        Ok(Self { sum, sum_sq })
    }

    /// Integral image of plain samples
    pub fn sum(&self) -> &Grid {
        &self.sum
    }

    /// Integral image of squared samples
    pub fn sum_sq(&self) -> &Grid {
        &self.sum_sq
    }

    /// `(rows, cols)` shared by both images
    pub fn dimensions(&self) -> (u32, u32) {
        self.sum.dimensions()
    }

    /// Release both images.
    pub fn into_parts(self) -> (Grid, Grid) {
        (self.sum, self.sum_sq)
    }
}
