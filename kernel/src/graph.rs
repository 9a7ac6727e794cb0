//! Weighted undirected graph over nodes `0..n`.
//!
//! Edges are stored in a dense row-major matrix of `Option<f64>`. An absent
//! edge is `None` and stays absent: it is never read back as zero or
//! infinity. The graph is built once (by an instance loader or by hand) and
//! is read-only for the duration of a search.

use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

/// Typed failure for graph construction.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An edge from a node to itself was requested.
    SelfLoop { node: usize },
    /// A node id is not in `0..node_count`.
    NodeOutOfRange { node: usize, node_count: usize },
    /// The weight is negative, NaN or infinite.
    InvalidWeight { from: usize, to: usize, weight: f64 },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfLoop { node } => write!(f, "self-loop on node {node}"),
            Self::NodeOutOfRange { node, node_count } => {
                write!(f, "node {node} out of range for {node_count} nodes")
            }
            Self::InvalidWeight { from, to, weight } => {
                write!(f, "invalid weight {weight} on edge {from}-{to}")
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// Symmetric weighted adjacency with explicit edge absence.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedGraph {
    node_count: usize,
    weights: Vec<Option<f64>>,
}

impl WeightedGraph {
    /// A graph with `node_count` nodes and no edges.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            weights: vec![None; node_count * node_count],
        }
    }

    /// Build a graph from `(a, b, weight)` triples.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError`] raised by [`WeightedGraph::add_edge`].
    pub fn from_edges(node_count: usize, edges: &[(usize, usize, f64)]) -> Result<Self, GraphError> {
        let mut graph = Self::new(node_count);
        for &(a, b, weight) in edges {
            graph.add_edge(a, b, weight)?;
        }
        Ok(graph)
    }

    /// Insert (or overwrite) the undirected edge `a-b`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::SelfLoop`] if `a == b`
    /// - [`GraphError::NodeOutOfRange`] if either id is `>= node_count`
    /// - [`GraphError::InvalidWeight`] if `weight` is negative or not finite
    pub fn add_edge(&mut self, a: usize, b: usize, weight: f64) -> Result<(), GraphError> {
        for node in [a, b] {
            if node >= self.node_count {
                return Err(GraphError::NodeOutOfRange {
                    node,
                    node_count: self.node_count,
                });
            }
        }
        if a == b {
            return Err(GraphError::SelfLoop { node: a });
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight {
                from: a,
                to: b,
                weight,
            });
        }
        self.weights[a * self.node_count + b] = Some(weight);
        self.weights[b * self.node_count + a] = Some(weight);
        Ok(())
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of undirected edges present.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        (0..self.node_count)
            .map(|a| {
                ((a + 1)..self.node_count)
                    .filter(|&b| self.has_edge(a, b))
                    .count()
            })
            .sum()
    }

    /// Whether the edge `a-b` exists. Out-of-range ids have no edges.
    #[must_use]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edge_weight(a, b).is_some()
    }

    /// Weight of `a-b`, or `None` if the edge is absent.
    #[must_use]
    pub fn edge_weight(&self, a: usize, b: usize) -> Option<f64> {
        if a >= self.node_count || b >= self.node_count {
            return None;
        }
        self.weights[a * self.node_count + b]
    }

    /// Weight of an edge known to exist.
    ///
    /// # Panics
    ///
    /// Panics if `a-b` is not an edge. Asking for the weight of a non-edge is
    /// a caller bug; use [`WeightedGraph::edge_weight`] when absence is possible.
    #[must_use]
    pub fn weight(&self, a: usize, b: usize) -> f64 {
        match self.edge_weight(a, b) {
            Some(w) => w,
            None => panic!("weight queried for non-edge {a}-{b}"),
        }
    }

    /// Neighbors of `a` in ascending id order, with weights.
    pub fn neighbors(&self, a: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        (0..self.node_count).filter_map(move |b| self.edge_weight(a, b).map(|w| (b, w)))
    }

    /// Whether every pair of distinct nodes is connected.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let n = self.node_count;
        self.edge_count() == n * n.saturating_sub(1) / 2
    }

    /// Canonical byte encoding used for the graph digest.
    ///
    /// `node_count:u64le`, then for every present edge with `a < b` in
    /// ascending order: `a:u64le || b:u64le || weight_bits:u64le`.
    #[must_use]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.edge_count() * 24);
        bytes.extend_from_slice(&(self.node_count as u64).to_le_bytes());
        for a in 0..self.node_count {
            for b in (a + 1)..self.node_count {
                if let Some(w) = self.edge_weight(a, b) {
                    bytes.extend_from_slice(&(a as u64).to_le_bytes());
                    bytes.extend_from_slice(&(b as u64).to_le_bytes());
                    bytes.extend_from_slice(&w.to_bits().to_le_bytes());
                }
            }
        }
        bytes
    }

    /// Content hash of [`WeightedGraph::canonical_bytes`].
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        canonical_hash(HashDomain::GraphInstance, &self.canonical_bytes())
    }
}
