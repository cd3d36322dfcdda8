//! Run configuration for the benchmark harness

use thiserror::Error;
use winvar_stats::VarianceMethod;

/// Window sizes visited by a sweep
pub const SWEEP_WINDOWS: [u32; 8] = [25, 50, 75, 100, 125, 150, 175, 200];

/// Repetitions of a sweep when none are requested
pub const DEFAULT_SWEEP_REPETITIONS: u32 = 5;

/// Repetitions of a fixed-window run when none are requested
pub const DEFAULT_FIXED_REPETITIONS: u32 = 1;

/// Invalid run configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("window size must be at least 1")]
    ZeroWindow,

    #[error("repetitions must be at least 1")]
    ZeroRepetitions,

    #[error("no variance method selected")]
    NoMethods,
}

/// Which window sizes to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSpec {
    /// A single window size
    Fixed(u32),
    /// Every size in [`SWEEP_WINDOWS`]
    Sweep,
}

impl WindowSpec {
    /// Window sizes in evaluation order
    pub fn sizes(&self) -> Vec<u32> {
        match *self {
            WindowSpec::Fixed(t) => vec![t],
            WindowSpec::Sweep => SWEEP_WINDOWS.to_vec(),
        }
    }

    fn default_repetitions(&self) -> u32 {
        match self {
            WindowSpec::Fixed(_) => DEFAULT_FIXED_REPETITIONS,
            WindowSpec::Sweep => DEFAULT_SWEEP_REPETITIONS,
        }
    }
}

/// Settings for one invocation of the harness
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Window sizes to evaluate
    pub window: WindowSpec,
    /// Passes over the window list
    pub repetitions: u32,
    /// Report variance, position and mean next to the timing
    pub detailed: bool,
    /// Dump the winning window of the integral-image method
    pub show_window: bool,
    /// Methods to run, in order
    pub methods: Vec<VarianceMethod>,
}

impl RunConfig {
    /// Configuration with the default repetitions for `window`, all methods,
    /// and no extra output.
    pub fn new(window: WindowSpec) -> Self {
        Self {
            window,
            repetitions: window.default_repetitions(),
            detailed: false,
            show_window: false,
            methods: VarianceMethod::ALL.to_vec(),
        }
    }

    pub fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn with_detailed(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    pub fn with_show_window(mut self, show_window: bool) -> Self {
        self.show_window = show_window;
        self
    }

    /// Restrict the run to `methods`; duplicates are dropped, first
    /// occurrence kept.
    pub fn with_methods(mut self, methods: &[VarianceMethod]) -> Self {
        let mut unique = Vec::with_capacity(methods.len());
        for &m in methods {
            if !unique.contains(&m) {
                unique.push(m);
            }
        }
        self.methods = unique;
        self
    }

    /// Check the configuration before running it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window == WindowSpec::Fixed(0) {
            return Err(ConfigError::ZeroWindow);
        }
        if self.repetitions == 0 {
            return Err(ConfigError::ZeroRepetitions);
        }
        if self.methods.is_empty() {
            return Err(ConfigError::NoMethods);
        }
        Ok(())
    }
}
