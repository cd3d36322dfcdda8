use clap::{Parser, ValueEnum, ValueHint};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use winvar::bench::{self, SweepRow};
use winvar::config::{RunConfig, WindowSpec};
use winvar::report;
use winvar::stats::VarianceMethod;
use winvar::{Grid, telemetry};

type Result<T> = std::result::Result<T, Box<dyn Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Estimate image noise from the minimum-variance window of a PGM image"
)]
struct Cli {
    /// PGM image (P2 or P5)
    #[arg(value_hint = ValueHint::FilePath)]
    image: PathBuf,

    /// Window side length; omit to sweep 25, 50, ..., 200
    window: Option<u32>,

    /// Number of passes over the window sizes
    #[arg(long)]
    runs: Option<u32>,

    /// Print variance, row, column and mean next to each timing
    #[arg(long)]
    detailed: bool,

    /// Print the winning window of the integral-image method
    #[arg(long)]
    show_window: bool,

    /// Method to run; repeat to run several (default: all)
    #[arg(long = "method", value_enum)]
    methods: Vec<MethodArg>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    TwoPass,
    OnePass,
    Integral,
}

impl From<MethodArg> for VarianceMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::TwoPass => VarianceMethod::TwoPass,
            MethodArg::OnePass => VarianceMethod::OnePass,
            MethodArg::Integral => VarianceMethod::IntegralImage,
        }
    }
}

impl Cli {
    fn to_config(&self) -> RunConfig {
        let window = match self.window {
            Some(t) => WindowSpec::Fixed(t),
            None => WindowSpec::Sweep,
        };
        let mut config = RunConfig::new(window)
            .with_detailed(self.detailed)
            .with_show_window(self.show_window);
        if let Some(runs) = self.runs {
            config = config.with_repetitions(runs);
        }
        if !self.methods.is_empty() {
            let methods: Vec<VarianceMethod> = self.methods.iter().map(|&m| m.into()).collect();
            config = config.with_methods(&methods);
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    if let Err(err) = telemetry::init_tracing(level) {
        eprintln!("warning: {}", err);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.to_config();
    config.validate()?;

    let grid = winvar::io::read_grid(&cli.image)?;
    info!(
        path = %cli.image.display(),
        rows = grid.rows(),
        cols = grid.cols(),
        "image loaded"
    );

    let mut show_err = None;
    let produced = bench::run_config_each(&config, &grid, |row| {
        print_row(&config, row);
        if config.show_window && show_err.is_none() {
            show_err = show_window(&grid, row).err();
        }
    })?;
    if let Some(err) = show_err {
        return Err(err);
    }

    if produced == 0 {
        info!("no window size fits the image");
    }
    Ok(())
}

fn print_row(config: &RunConfig, row: &SweepRow) {
    println!("{}", report::format_window_header(row.window));
    for timed in &row.results {
        println!("{}", report::format_timed(timed, config.detailed));
    }
}

fn show_window(grid: &Grid, row: &SweepRow) -> Result<()> {
    let timed = match row.result_for(VarianceMethod::IntegralImage) {
        Some(timed) => timed,
        None => match row.results.first() {
            Some(timed) => timed,
            None => return Ok(()),
        },
    };
    print!("{}", report::format_window(grid, &timed.result)?);
    Ok(())
}
