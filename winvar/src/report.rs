//! Text report lines for the benchmark harness

use crate::bench::TimedResult;
use winvar_core::Grid;
use winvar_stats::VarianceResult;

/// Header printed before each window size
pub fn format_window_header(t: u32) -> String {
    format!("T = {}", t)
}

/// One line per method: label and seconds, plus variance, row, column and
/// mean when `detailed` is set.
pub fn format_timed(timed: &TimedResult, detailed: bool) -> String {
    let secs = timed.elapsed.as_secs_f64();
    if detailed {
        let r = &timed.result;
        format!(
            "{}:\t {:.6}\t {:.6} \t {} \t {} \t {:.6}",
            timed.method.label(),
            secs,
            r.variance,
            r.row,
            r.col,
            r.mean
        )
    } else {
        format!("{}:\t {:.6} seconds", timed.method.label(), secs)
    }
}

/// The winning window cut out of `grid`, in the grid's `Display` form
pub fn format_window(grid: &Grid, result: &VarianceResult) -> winvar_core::Result<String> {
    let window = grid.crop(result.row, result.col, result.window, result.window)?;
    Ok(window.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use winvar_stats::VarianceMethod;

    fn create_test_timed() -> TimedResult {
        TimedResult {
            method: VarianceMethod::IntegralImage,
            result: VarianceResult {
                row: 3,
                col: 7,
                variance: 0.25,
                mean: 12.5,
                window: 2,
            },
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_window_header() {
        assert_eq!(format_window_header(75), "T = 75");
    }

    #[test]
    fn test_format_timed_simple() {
        assert_eq!(
            format_timed(&create_test_timed(), false),
            "integral images:\t 1.500000 seconds"
        );
    }

    #[test]
    fn test_format_timed_detailed() {
        assert_eq!(
            format_timed(&create_test_timed(), true),
            "integral images:\t 1.500000\t 0.250000 \t 3 \t 7 \t 12.500000"
        );
    }

    #[test]
    fn test_format_window() {
        let grid = Grid::from_rows(&[vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap();
        let result = VarianceResult {
            row: 1,
            col: 1,
            variance: 2.5,
            mean: 7.0,
            window: 2,
        };
        let text = format_window(&grid, &result).unwrap();
        assert_eq!(text, Grid::from_rows(&[vec![5, 6], vec![8, 9]]).unwrap().to_string());
    }
}
