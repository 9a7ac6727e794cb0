//! Graph contract the search runs against.

use tourbound_kernel::graph::WeightedGraph;

/// Read-only weighted adjacency over nodes `0..node_count()`.
///
/// # Contract
///
/// - The graph must not change while a search holds a reference to it.
/// - Edges are symmetric: `edge_weight(a, b) == edge_weight(b, a)`.
/// - Weights are finite and non-negative.
/// - An absent edge is `None`; it excludes the transition from the search.
pub trait TourGraph {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Weight of `a-b`, or `None` if the edge does not exist.
    fn edge_weight(&self, a: usize, b: usize) -> Option<f64>;

    /// Whether `a-b` is an edge.
    fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edge_weight(a, b).is_some()
    }

    /// Weight of an edge known to exist.
    ///
    /// # Panics
    ///
    /// Panics if `a-b` is not an edge (contract violation by the caller).
    fn weight(&self, a: usize, b: usize) -> f64 {
        match self.edge_weight(a, b) {
            Some(w) => w,
            None => panic!("weight queried for non-edge {a}-{b}"),
        }
    }
}

impl TourGraph for WeightedGraph {
    fn node_count(&self) -> usize {
        WeightedGraph::node_count(self)
    }

    fn edge_weight(&self, a: usize, b: usize) -> Option<f64> {
        WeightedGraph::edge_weight(self, a, b)
    }
}
