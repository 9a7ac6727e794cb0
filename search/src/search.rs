//! Search entry point and expansion loop.

use std::time::{Duration, Instant};

use crate::bound::{BoundEstimator, MinUnvisitedEdgeBound};
use crate::contract::TourGraph;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::policy::{PruneMode, SearchPolicy};
use crate::state::{Incumbent, SearchState, START_NODE};
use crate::stats::{IncumbentUpdate, SearchStats, TerminationReason};
use crate::telemetry::{NullTelemetry, TelemetryCollector, TelemetryReport};

/// A closed tour.
///
/// `path` starts at [`START_NODE`], visits every node once and does not
/// repeat the start at the end. `cost` includes the closing edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub cost: f64,
    pub path: Vec<usize>,
}

/// How a search run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The frontier emptied in time. The tour is proven optimal when the
    /// estimator is admissible (see [`crate::bound::BoundKind::is_admissible`]).
    Optimal(Tour),
    /// The time budget ran out. No partial tour is kept.
    TimedOut,
    /// The frontier emptied without closing any tour.
    Infeasible,
}

/// Result of a search execution.
///
/// Check [`SearchResult::is_optimal`] or match on `outcome`; use
/// [`SearchResult::into_tour`] to collapse the non-optimal outcomes into a
/// [`SearchError`].
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
    pub telemetry: TelemetryReport,
    /// Budget the run was given.
    pub time_budget: Duration,
    /// Node count of the searched graph.
    pub node_count: usize,
}

impl SearchResult {
    /// Returns `true` if the run proved an optimal tour.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Optimal(_))
    }

    #[must_use]
    pub fn tour(&self) -> Option<&Tour> {
        match &self.outcome {
            SearchOutcome::Optimal(tour) => Some(tour),
            SearchOutcome::TimedOut | SearchOutcome::Infeasible => None,
        }
    }

    /// The optimal tour, or the terminal failure.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::DeadlineExceeded`] for a timed-out run and
    /// [`SearchError::InfeasibleInstance`] when no tour exists.
    pub fn into_tour(self) -> Result<Tour, SearchError> {
        match self.outcome {
            SearchOutcome::Optimal(tour) => Ok(tour),
            SearchOutcome::TimedOut => Err(SearchError::DeadlineExceeded {
                budget: self.time_budget,
                expansions: self.stats.expansions,
            }),
            SearchOutcome::Infeasible => Err(SearchError::InfeasibleInstance {
                node_count: self.node_count,
            }),
        }
    }
}

/// Run branch-and-bound from the root `[START_NODE]`.
///
/// The loop polls the deadline once per iteration, before each pop. A popped
/// state whose bound is not below the incumbent is dropped unexpanded.
/// Extending to the last unvisited node closes a tour through the return
/// edge (if any) and never reaches the frontier; other children are pushed
/// only while their bound is strictly below the incumbent.
///
/// Runtime terminations (optimal, deadline, infeasible) all return
/// `Ok(SearchResult)` with stats and telemetry preserved.
///
/// # Errors
///
/// Returns [`SearchError::TooFewNodes`] only for the pre-flight check. No
/// state is created and telemetry is not started in that case.
pub fn search(
    graph: &dyn TourGraph,
    policy: &SearchPolicy,
    estimator: &dyn BoundEstimator,
    telemetry: &mut dyn TelemetryCollector,
) -> Result<SearchResult, SearchError> {
    let n = graph.node_count();
    policy.validate(n)?;

    telemetry.start();
    let started = Instant::now();
    let prune = policy.prune_mode == PruneMode::Bound;

    let mut frontier = Frontier::new(policy.frontier_order);
    let mut incumbent = Incumbent::new();
    let mut stats = SearchStats::new();
    let mut next_creation_order: u64 = 1;

    frontier.push(SearchState::root(graph, estimator));
    telemetry.observe_retained_bytes(frontier.retained_bytes());

    let mut timed_out = false;
    while !frontier.is_empty() {
        if started.elapsed() >= policy.time_budget {
            let discarded = frontier.clear();
            log::warn!(
                "deadline of {:.3}s reached after {} expansions, {discarded} states discarded",
                policy.time_budget.as_secs_f64(),
                stats.expansions
            );
            timed_out = true;
            break;
        }

        let Some(node) = frontier.pop() else {
            break;
        };

        if prune && node.bound() >= incumbent.cost() {
            stats.stale_discarded += 1;
            stats.note_pruned_bound(node.bound());
            continue;
        }
        stats.expansions += 1;

        let last = node.last();
        let closes_tour = node.level() + 1 == n;
        for next in node.unvisited() {
            let Some(step) = graph.edge_weight(last, next) else {
                continue;
            };
            let new_cost = node.cost() + step;

            if closes_tour {
                let Some(back) = graph.edge_weight(next, START_NODE) else {
                    stats.leaves_without_return += 1;
                    continue;
                };
                stats.leaves_closed += 1;
                let total = new_cost + back;
                let improved = incumbent.offer(total, || {
                    let mut path = node.path().to_vec();
                    path.push(next);
                    path
                });
                if improved {
                    log::debug!(
                        "incumbent improved to {total} at expansion {}",
                        stats.expansions
                    );
                    stats.incumbent_updates.push(IncumbentUpdate {
                        cost: total,
                        expansion: stats.expansions,
                    });
                }
                continue;
            }

            let child = node.extend(next, step, next_creation_order, graph, estimator);
            next_creation_order += 1;
            stats.children_generated += 1;
            if !prune || child.bound() < incumbent.cost() {
                frontier.push(child);
            } else {
                stats.children_pruned += 1;
                stats.note_pruned_bound(child.bound());
            }
        }
        telemetry.observe_retained_bytes(frontier.retained_bytes());
    }

    stats.frontier_high_water = frontier.high_water();
    let report = telemetry.finish();

    let (termination, outcome) = if timed_out {
        (TerminationReason::DeadlineExceeded, SearchOutcome::TimedOut)
    } else if incumbent.is_set() {
        let (cost, path) = incumbent.into_parts();
        (
            TerminationReason::Optimal,
            SearchOutcome::Optimal(Tour { cost, path }),
        )
    } else {
        (TerminationReason::Infeasible, SearchOutcome::Infeasible)
    };
    stats.termination = Some(termination);

    log::info!(
        "search finished: {} after {} expansions in {:.3}s",
        termination.as_str(),
        stats.expansions,
        report.elapsed.as_secs_f64()
    );

    Ok(SearchResult {
        outcome,
        stats,
        telemetry: report,
        time_budget: policy.time_budget,
        node_count: n,
    })
}

/// Solve with the default policy and estimator under `budget`.
///
/// # Errors
///
/// Returns [`SearchError::TooFewNodes`] before searching, or the terminal
/// failure from [`SearchResult::into_tour`].
pub fn solve_tour(graph: &dyn TourGraph, budget: Duration) -> Result<Tour, SearchError> {
    let policy = SearchPolicy {
        time_budget: budget,
        ..SearchPolicy::default()
    };
    let mut telemetry = NullTelemetry::new();
    search(graph, &policy, &MinUnvisitedEdgeBound, &mut telemetry)?.into_tour()
}
