//! `tourbound` command-line entry point.
//!
//! ```text
//! tourbound solve input/berlin52.tsp --timeout 60 --out output
//! tourbound example --algorithm twice-around-the-tree
//! ```
//!
//! Prints the run record text to stdout. Exit code 0 on a solved run, 2 on a
//! branch-and-bound timeout, 1 on any error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use tourbound_harness::config::{Algorithm, RunConfig};
use tourbound_harness::logging::{init_logger, LogLevel};
use tourbound_harness::record::RunRecord;
use tourbound_harness::runner::{run_instance, run_instance_file, RunError};
use tourbound_kernel::instance::classroom_example;
use tourbound_search::bound::BoundKind;

#[derive(Parser)]
#[command(name = "tourbound")]
#[command(about = "Exact branch-and-bound TSP solver with twice-around-the-tree and Christofides baselines")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Wall-clock budget for branch-and-bound, in seconds
    #[arg(long, global = true, default_value_t = 1800.0)]
    timeout: f64,

    /// Algorithm to run
    #[arg(long, global = true, value_enum, default_value_t = AlgorithmArg::BranchAndBound)]
    algorithm: AlgorithmArg,

    /// Lower-bound estimator for branch-and-bound
    #[arg(long, global = true, value_enum, default_value_t = BoundArg::MinUnvisitedEdge)]
    bound: BoundArg,

    /// Known optimal cost, copied into the record
    #[arg(long, global = true)]
    optimal_cost: Option<f64>,

    /// Directory to write `<instance>_<algorithm>.txt` and `.json` into
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// Record peak frontier memory
    #[arg(long, global = true)]
    track_memory: bool,

    /// Log verbosity on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogLevelArg::Warn)]
    log_level: LogLevelArg,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a TSPLIB-style EUC_2D instance file
    Solve {
        /// Instance file
        instance: PathBuf,
    },
    /// Solve the built-in 5-node classroom instance
    Example,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    BranchAndBound,
    TwiceAroundTheTree,
    Christofides,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::BranchAndBound => Self::BranchAndBound,
            AlgorithmArg::TwiceAroundTheTree => Self::TwiceAroundTree,
            AlgorithmArg::Christofides => Self::Christofides,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum BoundArg {
    /// Cheapest edge between unvisited nodes (default, inadmissible)
    MinUnvisitedEdge,
    /// Also counts edges back to the start node (admissible)
    ReturnAware,
    /// Accumulated path cost only
    PathCost,
}

impl From<BoundArg> for BoundKind {
    fn from(arg: BoundArg) -> Self {
        match arg {
            BoundArg::MinUnvisitedEdge => Self::MinUnvisitedEdge,
            BoundArg::ReturnAware => Self::ReturnAware,
            BoundArg::PathCost => Self::PathCost,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevelArg {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
            LogLevelArg::Trace => Self::Trace,
            LogLevelArg::Off => Self::Off,
        }
    }
}

fn run(cli: &Cli) -> Result<RunRecord, RunError> {
    let config = RunConfig {
        timeout_secs: cli.timeout,
        algorithm: cli.algorithm.into(),
        bound: cli.bound.into(),
        track_memory: cli.track_memory,
        optimal_cost: cli.optimal_cost,
        output_dir: cli.out.clone(),
    };
    match &cli.command {
        Command::Solve { instance } => run_instance_file(instance, &config),
        Command::Example => run_instance("classroom", &classroom_example(), &config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logger(cli.log_level.into()) {
        eprintln!("cannot initialise logging: {e}");
    }

    match run(&cli) {
        Ok(record) => {
            print!("{}", record.to_text());
            if record.is_timeout() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
