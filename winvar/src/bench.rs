//! Timing harness for the variance methods
//!
//! Runs the selected methods over the configured window sizes and records
//! the wall-clock time of each call. Window sizes that do not fit the grid
//! are skipped with a warning; any other error stops the run.

use crate::config::{ConfigError, RunConfig};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};
use winvar_core::Grid;
use winvar_stats::{StatsError, StatsResult, VarianceMethod, VarianceResult};

/// Errors raised by [`run_config`]
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("variance computation failed: {0}")]
    Stats(#[from] StatsError),
}

/// One method's result with the time it took
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedResult {
    pub method: VarianceMethod,
    pub result: VarianceResult,
    pub elapsed: Duration,
}

/// All method results for one window size of one repetition
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    /// Zero-based repetition index
    pub repetition: u32,
    /// Window side length
    pub window: u32,
    /// One entry per configured method, in configuration order
    pub results: Vec<TimedResult>,
}

impl SweepRow {
    /// Result of `method`, if it was run
    pub fn result_for(&self, method: VarianceMethod) -> Option<&TimedResult> {
        self.results.iter().find(|r| r.method == method)
    }
}

/// Run `method` once and time it.
pub fn run_timed(method: VarianceMethod, grid: &Grid, t: u32) -> StatsResult<TimedResult> {
    let start = Instant::now();
    let result = method.compute(grid, t)?;
    let elapsed = start.elapsed();
    debug!(%method, window = t, ?elapsed, "timed run");
    Ok(TimedResult {
        method,
        result,
        elapsed,
    })
}

/// Run each of `methods` once, in order.
pub fn run_methods(
    methods: &[VarianceMethod],
    grid: &Grid,
    t: u32,
) -> StatsResult<Vec<TimedResult>> {
    methods.iter().map(|&m| run_timed(m, grid, t)).collect()
}

/// Run `config` over `grid`, handing each finished row to `on_row` as soon
/// as it is available.
///
/// Returns the number of rows produced.
pub fn run_config_each<F>(config: &RunConfig, grid: &Grid, mut on_row: F) -> Result<usize, BenchError>
where
    F: FnMut(&SweepRow),
{
    config.validate()?;

    let (rows, cols) = grid.dimensions();
    let sizes = config.window.sizes();
    let mut produced = 0;

    for repetition in 0..config.repetitions {
        for &t in &sizes {
            if t > rows || t > cols {
                warn!(window = t, rows, cols, "window does not fit the image, skipping");
                continue;
            }
            let row = SweepRow {
                repetition,
                window: t,
                results: run_methods(&config.methods, grid, t)?,
            };
            on_row(&row);
            produced += 1;
        }
    }

    Ok(produced)
}

/// Run `config` over `grid` and collect every row.
pub fn run_config(config: &RunConfig, grid: &Grid) -> Result<Vec<SweepRow>, BenchError> {
    let mut rows = Vec::new();
    run_config_each(config, grid, |row| rows.push(row.clone()))?;
    Ok(rows)
}
