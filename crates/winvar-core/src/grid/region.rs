//! Rectangle extraction for grids
//!
//! Used to pull the winning window out of a source image for inspection.

use super::Grid;
use crate::error::{Error, Result};

impl Grid {
    /// Copy the `height × width` rectangle whose top-left cell is
    /// `(top, left)` into a new grid.
    ///
    /// Unlike image clipping, the rectangle is not shrunk to fit: a window
    /// that leaves the grid is an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `height` or `width` is 0, and
    /// `Error::IndexOutOfBounds` if the far corner lies outside the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use winvar_core::Grid;
    ///
    /// let grid = Grid::from_rows(&[vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap();
    /// let window = grid.crop(1, 1, 2, 2).unwrap();
    /// assert_eq!(window.data(), &[5, 6, 8, 9]);
    /// ```
    pub fn crop(&self, top: u32, left: u32, height: u32, width: u32) -> Result<Grid> {
        if height == 0 || width == 0 {
            return Err(Error::InvalidDimension {
                rows: height,
                cols: width,
            });
        }

        let bottom = top.checked_add(height - 1);
        let right = left.checked_add(width - 1);
        let (bottom, right) = match (bottom, right) {
            (Some(b), Some(r)) if b < self.rows && r < self.cols => (b, r),
            _ => {
                return Err(Error::IndexOutOfBounds {
                    row: bottom.unwrap_or(u32::MAX),
                    col: right.unwrap_or(u32::MAX),
                    rows: self.rows,
                    cols: self.cols,
                });
            }
        };

        let mut data = Vec::with_capacity((height as usize) * (width as usize));
        for i in top..=bottom {
            let row = self.row(i);
            data.extend_from_slice(&row[left as usize..=right as usize]);
        }

        Ok(Grid {
            rows: height,
            cols: width,
            data,
        })
    }
}
