//! Regression check state and the checks themselves

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use std::fs;
use std::path::Path;
use winvar_core::Grid;
use winvar_io::PgmFormat;

/// How written outputs are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Copy every output over its golden file
    Generate,
    /// Fail on outputs that differ from their golden file
    #[default]
    Compare,
    /// Write outputs but skip golden files entirely
    Display,
}

impl RegTestMode {
    /// Mode named by `REGTEST_MODE` (`generate`, `display`, anything else
    /// compares)
    pub fn from_env() -> Self {
        let raw = std::env::var("REGTEST_MODE").unwrap_or_default();
        match raw.to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// One regression run
///
/// Every check bumps a counter; written outputs are named
/// `<name>.<NN>.<ext>` after it, and golden files `<name>_golden.<NN>.<ext>`.
/// Failures are collected and reported by [`RegParams::cleanup`].
pub struct RegParams {
    name: String,
    check: usize,
    mode: RegTestMode,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a run named `name`, in the mode given by `REGTEST_MODE`.
    pub fn new(name: &str) -> Self {
        Self::with_mode(name, RegTestMode::from_env())
    }

    fn with_mode(name: &str, mode: RegTestMode) -> Self {
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("==== {}_reg ({:?}) ====", name, mode);

        Self {
            name: name.to_string(),
            check: 0,
            mode,
            failures: Vec::new(),
        }
    }

    fn fail(&mut self, what: String) {
        let msg = format!("{}_reg check {}: {}", self.name, self.check, what);
        eprintln!("{}", msg);
        self.failures.push(msg);
    }

    /// Check that `actual` is within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.check += 1;
        let diff = (expected - actual).abs();
        // A NaN difference never passes
        if diff <= delta {
            return true;
        }
        self.fail(format!(
            "expected {} got {} (diff {} > delta {})",
            expected, actual, diff, delta
        ));
        false
    }

    /// Check that two grids have the same size and samples.
    pub fn compare_grids(&mut self, expected: &Grid, actual: &Grid) -> bool {
        self.check += 1;

        if expected.dimensions() != actual.dimensions() {
            self.fail(format!(
                "grid size {}x{} differs from expected {}x{}",
                actual.rows(),
                actual.cols(),
                expected.rows(),
                expected.cols()
            ));
            return false;
        }

        let first_diff = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b);
        match first_diff {
            None => true,
            Some(idx) => {
                let cols = expected.cols() as usize;
                self.fail(format!(
                    "grid sample differs at ({}, {})",
                    idx / cols,
                    idx % cols
                ));
                false
            }
        }
    }

    /// Write `grid` as a PGM under the regout directory and check it
    /// against its golden file.
    pub fn write_grid_and_check(&mut self, grid: &Grid, format: PgmFormat) -> TestResult<()> {
        self.check += 1;

        let ext = format.extension();
        let out_path = format!("{}/{}.{:02}.{}", regout_dir(), self.name, self.check, ext);
        winvar_io::write_grid(grid, &out_path, format).map_err(|e| TestError::ImageWrite {
            path: out_path.clone(),
            message: e.to_string(),
        })?;

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.name,
            self.check,
            ext
        );
        self.check_golden(&out_path, &golden_path)
    }

    fn check_golden(&mut self, out_path: &str, golden_path: &str) -> TestResult<()> {
        match self.mode {
            RegTestMode::Display => {}
            RegTestMode::Generate => {
                fs::copy(out_path, golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(golden_path).exists() {
                    self.fail(format!("missing golden file {}", golden_path));
                    return Ok(());
                }
                let written = fs::read(out_path)?;
                let golden = fs::read(golden_path)?;
                // Byte differences are tolerated if both decode to the same grid
                if written != golden && !same_grid(&written, &golden) {
                    self.fail(format!("{} differs from {}", out_path, golden_path));
                }
            }
        }
        Ok(())
    }

    /// Report the run; `true` if every check passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("SUCCESS: {}_reg ({} checks)", self.name, self.check);
            return true;
        }
        eprintln!(
            "FAILURE: {}_reg ({} of {} checks failed)",
            self.name,
            self.failures.len(),
            self.check
        );
        for failure in &self.failures {
            eprintln!("  {}", failure);
        }
        false
    }
}

fn same_grid(a: &[u8], b: &[u8]) -> bool {
    match (winvar_io::read_pgm_mem(a), winvar_io::read_pgm_mem(b)) {
        (Ok(ga), Ok(gb)) => ga == gb,
        _ => false,
    }
}
