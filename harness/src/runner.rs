//! Harness runner: executes one algorithm on one graph and produces a
//! [`RunRecord`].
//!
//! # Pipeline
//!
//! ```text
//! RunConfig::validate() → graph digest
//!   → branch-and-bound: search_policy() → search() → outcome
//!   | baselines:        twice_around_tree() / christofides()
//!   → RunRecord → (optional) write_record()
//! ```

use std::time::Instant;

use tourbound_kernel::graph::{GraphError, WeightedGraph};
use tourbound_kernel::instance::{read_instance, InstanceError};
use tourbound_search::error::SearchError;
use tourbound_search::search::{search, SearchOutcome, Tour};
use tourbound_search::state::START_NODE;
use tourbound_search::telemetry::{NullTelemetry, PeakMemoryTelemetry, TelemetryCollector};

use crate::baseline::{christofides, twice_around_tree, BaselineError};
use crate::config::{Algorithm, RunConfig};
use crate::record::{write_record, RunOutcome, RunRecord};

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    /// A `RunConfig` field is out of range.
    InvalidConfig { detail: String },
    /// The instance file could not be loaded.
    Instance(InstanceError),
    /// The instance could not be turned into a graph.
    Graph(GraphError),
    /// The search rejected the input or found no tour.
    Search(SearchError),
    /// The baseline could not be built.
    Baseline(BaselineError),
    /// Record persistence failed.
    Io { path: String, detail: String },
    /// Canonical JSON serialization failed.
    Canon { detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig { detail } => write!(f, "invalid run configuration: {detail}"),
            Self::Instance(e) => write!(f, "instance error: {e}"),
            Self::Graph(e) => write!(f, "graph error: {e}"),
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::Baseline(e) => write!(f, "baseline error: {e}"),
            Self::Io { path, detail } => write!(f, "I/O error at {path}: {detail}"),
            Self::Canon { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<InstanceError> for RunError {
    fn from(e: InstanceError) -> Self {
        Self::Instance(e)
    }
}

impl From<GraphError> for RunError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<BaselineError> for RunError {
    fn from(e: BaselineError) -> Self {
        Self::Baseline(e)
    }
}

/// Run the configured algorithm on `graph` and build its record.
///
/// A branch-and-bound deadline is not an error: it produces a record whose
/// outcome is [`RunOutcome::Timeout`]. If `config.output_dir` is set, the
/// record is also written there.
///
/// # Errors
///
/// Returns [`RunError`] for invalid configuration, pre-flight search
/// errors, infeasible instances, baseline failures and persistence failures.
pub fn run_instance(
    name: &str,
    graph: &WeightedGraph,
    config: &RunConfig,
) -> Result<RunRecord, RunError> {
    config.validate()?;
    log::info!(
        "running {} on {name} ({} nodes, {} edges)",
        config.algorithm,
        graph.node_count(),
        graph.edge_count()
    );

    let record = match config.algorithm {
        Algorithm::BranchAndBound => run_branch_and_bound(name, graph, config)?,
        Algorithm::TwiceAroundTree => run_baseline(name, graph, config, twice_around_tree)?,
        Algorithm::Christofides => run_baseline(name, graph, config, christofides)?,
    };

    match record.found_cost() {
        Some(cost) => log::info!("{name}: {} found cost {cost}", config.algorithm),
        None => log::warn!("{name}: {} timed out", config.algorithm),
    }
    if record.bound_admissible() == Some(false) && !record.is_timeout() {
        log::info!(
            "{name}: bound {} is not admissible, found cost may exceed the optimum",
            config.bound.as_str()
        );
    }

    if let Some(dir) = &config.output_dir {
        write_record(dir, &record)?;
    }
    Ok(record)
}

/// Load a TSPLIB-style file and run it. The instance name falls back to the
/// file stem when the file has no `NAME` header.
///
/// # Errors
///
/// As [`run_instance`], plus [`RunError::Instance`] and [`RunError::Graph`]
/// for loading failures.
pub fn run_instance_file(
    path: &std::path::Path,
    config: &RunConfig,
) -> Result<RunRecord, RunError> {
    let instance = read_instance(path)?;
    let graph = instance.to_graph()?;
    let name = if instance.name.is_empty() {
        path.file_stem()
            .map_or_else(String::new, |s| s.to_string_lossy().into_owned())
    } else {
        instance.name.clone()
    };
    run_instance(&name, &graph, config)
}

fn run_branch_and_bound(
    name: &str,
    graph: &WeightedGraph,
    config: &RunConfig,
) -> Result<RunRecord, RunError> {
    let policy = config.search_policy()?;
    let mut null = NullTelemetry::new();
    let mut peak = PeakMemoryTelemetry::new();
    let telemetry: &mut dyn TelemetryCollector = if config.track_memory {
        &mut peak
    } else {
        &mut null
    };

    let result = search(graph, &policy, config.bound.estimator(), telemetry)?;
    let outcome = match result.outcome {
        SearchOutcome::Optimal(tour) => RunOutcome::Solved {
            cost: tour.cost,
            path: tour.path,
        },
        SearchOutcome::TimedOut => RunOutcome::Timeout,
        SearchOutcome::Infeasible => {
            return Err(RunError::Search(SearchError::InfeasibleInstance {
                node_count: result.node_count,
            }));
        }
    };

    Ok(RunRecord {
        instance: name.to_string(),
        algorithm: Algorithm::BranchAndBound,
        bound: Some(config.bound),
        node_count: graph.node_count(),
        graph_digest: graph.digest(),
        optimal_cost: config.optimal_cost,
        outcome,
        elapsed: result.telemetry.elapsed,
        peak_memory_bytes: result.telemetry.peak_memory_bytes,
        search_stats: Some(result.stats),
    })
}

fn run_baseline(
    name: &str,
    graph: &WeightedGraph,
    config: &RunConfig,
    build: fn(&WeightedGraph, usize) -> Result<Tour, BaselineError>,
) -> Result<RunRecord, RunError> {
    let started = Instant::now();
    let tour = build(graph, START_NODE)?;
    let elapsed = started.elapsed();

    Ok(RunRecord {
        instance: name.to_string(),
        algorithm: config.algorithm,
        bound: None,
        node_count: graph.node_count(),
        graph_digest: graph.digest(),
        optimal_cost: config.optimal_cost,
        outcome: RunOutcome::Solved {
            cost: tour.cost,
            path: tour.path,
        },
        elapsed,
        peak_memory_bytes: None,
        search_stats: None,
    })
}
