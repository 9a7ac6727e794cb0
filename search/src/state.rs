//! Search state, frontier key and incumbent types.

use crate::bound::BoundEstimator;
use crate::contract::TourGraph;

/// Every tour starts (and implicitly ends) at this node.
pub const START_NODE: usize = 0;

/// An immutable partial tour in the frontier.
///
/// Invariants:
/// - `path[0] == START_NODE`, no node repeats
/// - `level() == path().len()`
/// - `cost()` is the sum of edge weights along `path`, without the closing edge
/// - `bound() >= cost()` for any estimator that only adds non-negative terms
///
/// States are built by [`SearchState::root`] and [`SearchState::extend`] and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SearchState {
    path: Vec<usize>,
    visited: Vec<bool>,
    cost: f64,
    bound: f64,
    creation_order: u64,
}

impl SearchState {
    /// The root state `[START_NODE]` with cost 0, scored by `estimator`.
    ///
    /// # Panics
    ///
    /// Panics if `graph` has no nodes. The driver validates the node count
    /// before building the root.
    #[must_use]
    pub fn root(graph: &dyn TourGraph, estimator: &dyn BoundEstimator) -> Self {
        let mut visited = vec![false; graph.node_count()];
        visited[START_NODE] = true;
        let mut state = Self {
            path: vec![START_NODE],
            visited,
            cost: 0.0,
            bound: 0.0,
            creation_order: 0,
        };
        state.bound = estimator.bound(&state, graph);
        state
    }

    /// A new state with `next` appended, reached over an edge of `step_cost`.
    ///
    /// The parent is left untouched.
    #[must_use]
    pub fn extend(
        &self,
        next: usize,
        step_cost: f64,
        creation_order: u64,
        graph: &dyn TourGraph,
        estimator: &dyn BoundEstimator,
    ) -> Self {
        debug_assert!(!self.visited[next], "node {next} already on the path");
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(next);
        let mut visited = self.visited.clone();
        visited[next] = true;
        let mut child = Self {
            path,
            visited,
            cost: self.cost + step_cost,
            bound: 0.0,
            creation_order,
        };
        child.bound = estimator.bound(&child, graph);
        child
    }

    /// Number of visited nodes (1 at the root).
    #[must_use]
    pub fn level(&self) -> usize {
        self.path.len()
    }

    #[must_use]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// The node the next edge leaves from.
    #[must_use]
    pub fn last(&self) -> usize {
        self.path[self.path.len() - 1]
    }

    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[must_use]
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Global counter for deterministic tie-breaking (root = 0).
    #[must_use]
    pub fn creation_order(&self) -> u64 {
        self.creation_order
    }

    #[must_use]
    pub fn is_visited(&self, node: usize) -> bool {
        self.visited.get(node).copied().unwrap_or(false)
    }

    /// Unvisited node ids in ascending order.
    pub fn unvisited(&self) -> impl Iterator<Item = usize> + '_ {
        self.visited
            .iter()
            .enumerate()
            .filter(|&(_, &seen)| !seen)
            .map(|(node, _)| node)
    }

    /// Bytes accounted to this state while it sits in the frontier.
    ///
    /// Struct size plus the live length of its two buffers. Lengths rather
    /// than capacities keep the figure identical across allocators.
    #[must_use]
    pub fn accounted_bytes(&self) -> u64 {
        let bytes = std::mem::size_of::<Self>()
            + self.path.len() * std::mem::size_of::<usize>()
            + self.visited.len() * std::mem::size_of::<bool>();
        bytes as u64
    }
}

/// The frontier ordering key: `(level, bound, creation_order)`.
///
/// How the fields rank against each other is decided by
/// [`crate::frontier::FrontierOrder`], not by this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontierKey {
    pub level: usize,
    pub bound: f64,
    pub creation_order: u64,
}

impl From<&SearchState> for FrontierKey {
    fn from(state: &SearchState) -> Self {
        Self {
            level: state.level(),
            bound: state.bound(),
            creation_order: state.creation_order(),
        }
    }
}

/// The best closed tour found so far.
///
/// Starts at `(+inf, [])`; [`Incumbent::offer`] only accepts strict
/// improvements, so the cost is strictly decreasing over a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    cost: f64,
    path: Vec<usize>,
}

impl Incumbent {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cost: f64::INFINITY,
            path: Vec::new(),
        }
    }

    /// Current best cost (`+inf` until a tour is closed).
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Whether any closed tour has been recorded.
    #[must_use]
    pub fn is_set(&self) -> bool {
        !self.path.is_empty()
    }

    /// Replace the incumbent if `cost` is strictly lower.
    ///
    /// `path` is only built when the offer is accepted.
    pub fn offer(&mut self, cost: f64, path: impl FnOnce() -> Vec<usize>) -> bool {
        if cost < self.cost {
            self.cost = cost;
            self.path = path();
            true
        } else {
            false
        }
    }

    /// Consume into `(cost, path)`.
    #[must_use]
    pub fn into_parts(self) -> (f64, Vec<usize>) {
        (self.cost, self.path)
    }
}

impl Default for Incumbent {
    fn default() -> Self {
        Self::new()
    }
}
