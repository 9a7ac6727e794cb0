//! Typed search errors.
//!
//! Pre-flight failures (`TooFewNodes`, `InvalidTimeBudget`) are returned by
//! [`crate::search::search`] before any state is created. The terminal
//! failures (`DeadlineExceeded`, `InfeasibleInstance`) are produced when a
//! caller converts a finished [`crate::search::SearchResult`] into a tour.

use std::time::Duration;

/// Typed failure for the tour search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The graph has fewer than two nodes; no tour exists to search for.
    TooFewNodes { node_count: usize },
    /// The requested time budget is negative, NaN or too large.
    InvalidTimeBudget { detail: String },
    /// The time budget ran out before the frontier emptied. No partial tour.
    DeadlineExceeded {
        budget: Duration,
        expansions: u64,
    },
    /// The frontier emptied without closing any Hamiltonian cycle.
    InfeasibleInstance { node_count: usize },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewNodes { node_count } => {
                write!(f, "tour search needs at least 2 nodes, graph has {node_count}")
            }
            Self::InvalidTimeBudget { detail } => write!(f, "invalid time budget: {detail}"),
            Self::DeadlineExceeded { budget, expansions } => write!(
                f,
                "search exceeded its {:.3}s budget after {expansions} expansions",
                budget.as_secs_f64()
            ),
            Self::InfeasibleInstance { node_count } => {
                write!(f, "no Hamiltonian cycle exists over the {node_count} nodes")
            }
        }
    }
}

impl std::error::Error for SearchError {}
