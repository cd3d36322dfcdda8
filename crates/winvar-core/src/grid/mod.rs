//! Grid - Dense 2D array of integer samples
//!
//! `Grid` stores one `i64` per cell in row-major order. It is used both for
//! grayscale source images and for the summed-area tables derived from them,
//! so the sample type is wide enough to hold `maxval² × rows × cols` for
//! typical 8-bit and 16-bit images.
//!
//! Coordinates are `(row, col)`: `row` selects the scanline, `col` the sample
//! within it.
//!
//! See [`region`] for sub-rectangle extraction.
//!
//! # Examples
//!
//! ```
//! use winvar_core::Grid;
//!
//! let mut grid = Grid::new(4, 6).unwrap();
//! grid.set(1, 2, 17).unwrap();
//! assert_eq!(grid.get(1, 2).unwrap(), 17);
//! assert_eq!(grid.dimensions(), (4, 6));
//! ```

pub mod region;

use crate::error::{Error, Result};
use std::fmt;

/// Dense grid of non-negative integer samples
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The cell at
/// `(row, col)` is at index `row * cols + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows (height)
    rows: u32,
    /// Number of columns (width)
    cols: u32,
    /// Sample data (row-major, no padding)
    data: Vec<i64>,
}

impl Grid {
    /// Create a new grid with all cells set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `rows` or `cols` is 0.
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        Self::new_with_value(rows, cols, 0)
    }

    /// Create a new grid with every cell set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `rows` or `cols` is 0, and
    /// `Error::NegativeSample` if `value` is negative.
    pub fn new_with_value(rows: u32, cols: u32, value: i64) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimension { rows, cols });
        }
        if value < 0 {
            return Err(Error::NegativeSample { row: 0, col: 0, value });
        }

        let size = (rows as usize) * (cols as usize);
        Ok(Grid {
            rows,
            cols,
            data: vec![value; size],
        })
    }

    /// Create a grid from raw row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero, if `data.len()` is not
    /// `rows * cols`, or if any sample is negative.
    pub fn from_data(rows: u32, cols: u32, data: Vec<i64>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimension { rows, cols });
        }

        let expected_size = (rows as usize) * (cols as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                rows,
                cols,
                expected_size
            )));
        }

        if let Some(idx) = data.iter().position(|&v| v < 0) {
            return Err(Error::NegativeSample {
                row: (idx / cols as usize) as u32,
                col: (idx % cols as usize) as u32,
                value: data[idx],
            });
        }

        Ok(Grid { rows, cols, data })
    }

    /// Create a grid from a list of equal-length rows
    ///
    /// ```
    /// use winvar_core::Grid;
    ///
    /// let grid = Grid::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(grid.get(1, 0).unwrap(), 3);
    /// ```
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self> {
        let (nrows, ncols) = extent(rows.len(), rows.first().map_or(0, |r| r.len()))?;

        let mut data = Vec::with_capacity((nrows as usize) * (ncols as usize));
        for (i, row) in rows.iter().enumerate() {
            if row.len() != ncols as usize {
                return Err(Error::InvalidParameter(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    ncols
                )));
            }
            data.extend_from_slice(row);
        }

        Self::from_data(nrows, ncols, data)
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Dimensions as `(rows, cols)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn check_bounds(&self, row: u32, col: u32) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok((row as usize) * (self.cols as usize) + (col as usize))
    }

    /// Get the sample at `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if the coordinate is outside the grid.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> Result<i64> {
        let idx = self.check_bounds(row, col)?;
        Ok(self.data[idx])
    }

    /// Set the sample at `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if the coordinate is outside the grid
    /// and `Error::NegativeSample` if `value` is negative.
    #[inline]
    pub fn set(&mut self, row: u32, col: u32, value: i64) -> Result<()> {
        let idx = self.check_bounds(row, col)?;
        if value < 0 {
            return Err(Error::NegativeSample { row, col, value });
        }
        self.data[idx] = value;
        Ok(())
    }

    /// Get the sample at `(row, col)` without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows` or `col >= cols`.
    #[inline]
    pub fn get_unchecked(&self, row: u32, col: u32) -> i64 {
        self.data[(row as usize) * (self.cols as usize) + (col as usize)]
    }

    /// Set the sample at `(row, col)` without bounds or sign checking
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows` or `col >= cols`.
    #[inline]
    pub fn set_unchecked(&mut self, row: u32, col: u32, value: i64) {
        let idx = (row as usize) * (self.cols as usize) + (col as usize);
        self.data[idx] = value;
    }

    /// Raw sample data in row-major order
    #[inline]
    pub fn data(&self) -> &[i64] {
        &self.data
    }

    /// One row of samples
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    #[inline]
    pub fn row(&self, row: u32) -> &[i64] {
        let start = (row as usize) * (self.cols as usize);
        &self.data[start..start + self.cols as usize]
    }

    /// Largest sample in the grid
    pub fn max_value(&self) -> i64 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}

/// Prints `Size: R x C` followed by one tab-separated line per row.
/// Convert `usize` lengths to grid dimensions.
///
/// Zero or more than `u32::MAX` in either direction is an
/// `InvalidDimension`; lengths that do not fit are reported as `u32::MAX`.
fn extent(rows: usize, cols: usize) -> Result<(u32, u32)> {
    match (u32::try_from(rows), u32::try_from(cols)) {
        (Ok(r), Ok(c)) if r > 0 && c > 0 => Ok((r, c)),
        (r, c) => Err(Error::InvalidDimension {
            rows: r.unwrap_or(u32::MAX),
            cols: c.unwrap_or(u32::MAX),
        }),
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size: {} x {}", self.rows, self.cols)?;
        for i in 0..self.rows {
            write!(f, "{}: [", i)?;
            for v in self.row(i) {
                write!(f, "{}\t", v)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
