//! The three ways of finding the minimum-variance window

use crate::StatsResult;
use crate::scan::{variance_by_one_pass, variance_by_two_pass};
use crate::variance::{VarianceResult, variance_by_integral_image};
use std::fmt;
use winvar_core::Grid;

/// Variance algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarianceMethod {
    /// Mean first, then squared deviations; O(t²) per window
    TwoPass,
    /// Sum and sum of squares together; O(t²) per window
    OnePass,
    /// Summed-area tables; O(1) per window
    IntegralImage,
}

impl VarianceMethod {
    /// All methods, in benchmark order
    pub const ALL: [VarianceMethod; 3] = [
        VarianceMethod::TwoPass,
        VarianceMethod::OnePass,
        VarianceMethod::IntegralImage,
    ];

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            VarianceMethod::TwoPass => "two passes",
            VarianceMethod::OnePass => "one pass",
            VarianceMethod::IntegralImage => "integral images",
        }
    }

    /// Run this method on `grid` with window size `t`.
    pub fn compute(self, grid: &Grid, t: u32) -> StatsResult<VarianceResult> {
        match self {
            VarianceMethod::TwoPass => variance_by_two_pass(grid, t),
            VarianceMethod::OnePass => variance_by_one_pass(grid, t),
            VarianceMethod::IntegralImage => variance_by_integral_image(grid, t),
        }
    }
}

impl fmt::Display for VarianceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_methods_agree_on_small_grid() {
        let grid = Grid::from_rows(&[
            vec![3, 9, 4, 4],
            vec![8, 1, 4, 4],
            vec![2, 7, 6, 5],
        ])
        .unwrap();
        for method in VarianceMethod::ALL {
            let result = method.compute(&grid, 2).unwrap();
            assert_eq!((result.row, result.col), (0, 2), "{}", method);
            assert_eq!(result.variance, 0.0, "{}", method);
            assert_eq!(result.mean, 4.0, "{}", method);
        }
    }

    #[test]
    fn test_labels_are_distinct() {
        let labels: Vec<_> = VarianceMethod::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels, ["two passes", "one pass", "integral images"]);
        assert_eq!(VarianceMethod::OnePass.to_string(), "one pass");
    }
}
