//! Lower-bound estimators for partial tours.

use crate::contract::TourGraph;
use crate::state::{SearchState, START_NODE};

/// Trait for bounding the cost of any closed tour that extends a state.
///
/// Implementations must be pure (same `(state, graph)` → same value) and
/// return a value `>= state.cost()`.
pub trait BoundEstimator {
    /// Lower estimate of the final closed-tour cost reachable from `state`.
    fn bound(&self, state: &SearchState, graph: &dyn TourGraph) -> f64;
}

/// The estimator the driver uses by default.
///
/// `state.cost()` plus, for every unvisited node `i`, the cheapest edge from
/// `i` to another unvisited node. A node with no unvisited neighbor (for
/// example the last remaining one) contributes nothing.
///
/// Edges back to visited nodes, including the start node, are ignored.
/// This makes the value inadmissible: the last node of the remaining path
/// leaves towards the start, yet is charged its cheapest edge to another
/// unvisited node, which may be dearer. The driver can then prune the
/// branch holding the optimum and report a slightly worse tour (see
/// [`ReturnAwareBound`]). Recorded expansion counts depend on this exact
/// formula.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinUnvisitedEdgeBound;

impl BoundEstimator for MinUnvisitedEdgeBound {
    fn bound(&self, state: &SearchState, graph: &dyn TourGraph) -> f64 {
        let n = graph.node_count();
        let mut bound = state.cost();
        for i in state.unvisited() {
            let cheapest = (0..n)
                .filter(|&j| j != i && !state.is_visited(j))
                .filter_map(|j| graph.edge_weight(i, j))
                .min_by(f64::total_cmp);
            if let Some(w) = cheapest {
                bound += w;
            }
        }
        bound
    }
}

/// Admissible variant of [`MinUnvisitedEdgeBound`].
///
/// Every unvisited node leaves the remaining path exactly once, either to
/// another unvisited node or back to [`START_NODE`]. Taking the minimum over
/// both keeps the sum at or below any completion cost, so search with this
/// estimator is exact.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnAwareBound;

impl BoundEstimator for ReturnAwareBound {
    fn bound(&self, state: &SearchState, graph: &dyn TourGraph) -> f64 {
        let n = graph.node_count();
        let mut bound = state.cost();
        for i in state.unvisited() {
            let cheapest = (0..n)
                .filter(|&j| j != i && (j == START_NODE || !state.is_visited(j)))
                .filter_map(|j| graph.edge_weight(i, j))
                .min_by(f64::total_cmp);
            if let Some(w) = cheapest {
                bound += w;
            }
        }
        bound
    }
}

/// Which estimator a run uses, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundKind {
    /// [`MinUnvisitedEdgeBound`].
    #[default]
    MinUnvisitedEdge,
    /// [`ReturnAwareBound`].
    ReturnAware,
    /// [`PathCostBound`].
    PathCost,
}

impl BoundKind {
    #[must_use]
    pub fn estimator(self) -> &'static dyn BoundEstimator {
        match self {
            Self::MinUnvisitedEdge => &MinUnvisitedEdgeBound,
            Self::ReturnAware => &ReturnAwareBound,
            Self::PathCost => &PathCostBound,
        }
    }

    /// Stable name used in serialized records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MinUnvisitedEdge => "min_unvisited_edge",
            Self::ReturnAware => "return_aware",
            Self::PathCost => "path_cost",
        }
    }

    /// Whether search with this estimator is guaranteed to find the optimum.
    #[must_use]
    pub fn is_admissible(self) -> bool {
        !matches!(self, Self::MinUnvisitedEdge)
    }
}

/// Bound equal to the accumulated path cost. Prunes only on real cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCostBound;

impl BoundEstimator for PathCostBound {
    fn bound(&self, state: &SearchState, _graph: &dyn TourGraph) -> f64 {
        state.cost()
    }
}
