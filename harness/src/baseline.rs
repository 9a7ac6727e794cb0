//! Approximate baselines built on a minimum spanning tree.
//!
//! Both start from the same tree (Prim, dense O(n²)).
//!
//! - [`twice_around_tree`]: depth-first preorder walk of the tree from the
//!   start node, shortcut into a Hamiltonian cycle. Within a factor of two
//!   of the optimum on metric instances.
//! - [`christofides`]: tree plus a minimum-weight perfect matching on its
//!   odd-degree nodes, Euler circuit from the start node, shortcut. Within a
//!   factor of 1.5 on metric instances while the matching is exact.

use tourbound_kernel::graph::WeightedGraph;
use tourbound_search::search::Tour;

/// Largest odd-degree node set matched exactly (bitmask DP over `2^k`
/// subsets). Larger sets fall back to greedy matching with pair swaps.
pub const MAX_EXACT_MATCHING_NODES: usize = 20;

/// Failure building the baseline tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaselineError {
    /// The walk shortcuts between arbitrary nodes, so every pair needs an edge.
    NotComplete { node_count: usize, edge_count: usize },
    /// Fewer than two nodes.
    TooFewNodes { node_count: usize },
    /// The start node is not a node of the graph.
    StartOutOfRange { start: usize, node_count: usize },
}

impl std::fmt::Display for BaselineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotComplete {
                node_count,
                edge_count,
            } => write!(
                f,
                "tree baselines need a complete graph; {node_count} nodes have only {edge_count} edges"
            ),
            Self::TooFewNodes { node_count } => {
                write!(f, "baseline needs at least 2 nodes, graph has {node_count}")
            }
            Self::StartOutOfRange { start, node_count } => {
                write!(f, "start node {start} out of range for {node_count} nodes")
            }
        }
    }
}

impl std::error::Error for BaselineError {}

/// Parent of every node in a minimum spanning tree rooted at `root`.
///
/// `parents[root]` is `None`. Among equally cheap candidates the lowest node
/// id joins the tree first.
fn prim_parents(graph: &WeightedGraph, root: usize) -> Vec<Option<usize>> {
    let n = graph.node_count();
    let mut in_tree = vec![false; n];
    let mut best = vec![f64::INFINITY; n];
    let mut parents = vec![None; n];
    best[root] = 0.0;

    for _ in 0..n {
        let next = (0..n)
            .filter(|&v| !in_tree[v])
            .min_by(|&a, &b| best[a].total_cmp(&best[b]).then(a.cmp(&b)));
        let Some(u) = next else { break };
        in_tree[u] = true;
        for (v, w) in graph.neighbors(u) {
            if !in_tree[v] && w < best[v] {
                best[v] = w;
                parents[v] = Some(u);
            }
        }
    }
    parents
}

/// Preorder of the tree given by `parents`, children visited in ascending id.
fn preorder(parents: &[Option<usize>], root: usize) -> Vec<usize> {
    let mut children = vec![Vec::new(); parents.len()];
    for (v, parent) in parents.iter().enumerate() {
        if let Some(p) = parent {
            children[*p].push(v);
        }
    }

    let mut order = Vec::with_capacity(parents.len());
    let mut stack = vec![root];
    while let Some(u) = stack.pop() {
        order.push(u);
        stack.extend(children[u].iter().rev());
    }
    order
}

fn check_input(graph: &WeightedGraph, start: usize) -> Result<(), BaselineError> {
    let n = graph.node_count();
    if n < 2 {
        return Err(BaselineError::TooFewNodes { node_count: n });
    }
    if start >= n {
        return Err(BaselineError::StartOutOfRange {
            start,
            node_count: n,
        });
    }
    if !graph.is_complete() {
        return Err(BaselineError::NotComplete {
            node_count: n,
            edge_count: graph.edge_count(),
        });
    }

    Ok(())
}

/// Close `path` back to its first node and price it.
fn closed_tour(graph: &WeightedGraph, path: Vec<usize>) -> Tour {
    let closing = graph.weight(path[path.len() - 1], path[0]);
    let cost = path.windows(2).map(|w| graph.weight(w[0], w[1])).sum::<f64>() + closing;
    Tour { cost, path }
}

/// Build the twice-around-the-tree tour starting at `start`.
///
/// # Errors
///
/// Returns [`BaselineError`] if the graph is not complete, has fewer than
/// two nodes, or `start` is out of range.
pub fn twice_around_tree(graph: &WeightedGraph, start: usize) -> Result<Tour, BaselineError> {
    check_input(graph, start)?;
    let path = preorder(&prim_parents(graph, start), start);
    Ok(closed_tour(graph, path))
}

/// Minimum-weight perfect matching on `nodes` (even length), as index pairs
/// into `nodes`.
///
/// Exact for up to [`MAX_EXACT_MATCHING_NODES`] nodes. The DP pairs the
/// lowest remaining node with each partner in ascending order and keeps the
/// first strict minimum.
fn min_weight_matching(graph: &WeightedGraph, nodes: &[usize]) -> Vec<(usize, usize)> {
    let k = nodes.len();
    if k > MAX_EXACT_MATCHING_NODES {
        log::warn!(
            "{k} odd-degree nodes exceed the exact matching limit of {MAX_EXACT_MATCHING_NODES}; \
             using greedy matching, the 1.5 factor no longer holds"
        );
        return greedy_matching(graph, nodes);
    }

    let full = (1usize << k) - 1;
    let mut best = vec![f64::INFINITY; full + 1];
    let mut partner = vec![0u8; full + 1];
    best[0] = 0.0;
    for mask in 1..=full {
        if mask.count_ones() % 2 == 1 {
            continue;
        }
        let i = mask.trailing_zeros() as usize;
        let rest = mask & !(1 << i);
        let mut bits = rest;
        while bits != 0 {
            let j = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            let cand = graph.weight(nodes[i], nodes[j]) + best[rest & !(1 << j)];
            if cand < best[mask] {
                best[mask] = cand;
                partner[mask] = u8::try_from(j).unwrap_or(u8::MAX);
            }
        }
    }

    let mut pairs = Vec::with_capacity(k / 2);
    let mut mask = full;
    while mask != 0 {
        let i = mask.trailing_zeros() as usize;
        let j = usize::from(partner[mask]);
        pairs.push((i, j));
        mask &= !(1 << i);
        mask &= !(1 << j);
    }
    pairs
}

/// Nearest-partner matching in node order, then pair swaps until no swap
/// of two pairs lowers the total.
fn greedy_matching(graph: &WeightedGraph, nodes: &[usize]) -> Vec<(usize, usize)> {
    let k = nodes.len();
    let w = |a: usize, b: usize| graph.weight(nodes[a], nodes[b]);
    let mut matched = vec![false; k];
    let mut pairs = Vec::with_capacity(k / 2);
    for i in 0..k {
        if matched[i] {
            continue;
        }
        let partner = ((i + 1)..k)
            .filter(|&j| !matched[j])
            .min_by(|&a, &b| w(i, a).total_cmp(&w(i, b)));
        if let Some(j) = partner {
            matched[i] = true;
            matched[j] = true;
            pairs.push((i, j));
        }
    }

    let mut improved = true;
    while improved {
        improved = false;
        for p in 0..pairs.len() {
            for q in (p + 1)..pairs.len() {
                let (a, b) = pairs[p];
                let (c, d) = pairs[q];
                let current = w(a, b) + w(c, d);
                if w(a, c) + w(b, d) < current {
                    pairs[p] = (a, c);
                    pairs[q] = (b, d);
                    improved = true;
                } else if w(a, d) + w(b, c) < current {
                    pairs[p] = (a, d);
                    pairs[q] = (b, c);
                    improved = true;
                }
            }
        }
    }
    pairs
}

/// Euler circuit of the multigraph `edges` from `start` (Hierholzer).
///
/// Every node must have even degree and the edges must be connected.
/// Neighbors are taken in ascending id, then edge insertion order.
fn euler_circuit(node_count: usize, edges: &[(usize, usize)], start: usize) -> Vec<usize> {
    let mut adjacency: Vec<Vec<(usize, usize)>> = vec![Vec::new(); node_count];
    for (id, &(a, b)) in edges.iter().enumerate() {
        adjacency[a].push((b, id));
        adjacency[b].push((a, id));
    }
    for list in &mut adjacency {
        list.sort_unstable();
    }

    let mut used = vec![false; edges.len()];
    let mut cursor = vec![0usize; node_count];
    let mut stack = vec![start];
    let mut circuit = Vec::with_capacity(edges.len() + 1);
    while let Some(&u) = stack.last() {
        let list = &adjacency[u];
        while cursor[u] < list.len() && used[list[cursor[u]].1] {
            cursor[u] += 1;
        }
        if let Some(&(v, id)) = list.get(cursor[u]) {
            used[id] = true;
            stack.push(v);
        } else {
            circuit.push(u);
            stack.pop();
        }
    }
    circuit.reverse();
    circuit
}

/// Build the Christofides tour starting at `start`.
///
/// # Errors
///
/// Returns [`BaselineError`] if the graph is not complete, has fewer than
/// two nodes, or `start` is out of range.
pub fn christofides(graph: &WeightedGraph, start: usize) -> Result<Tour, BaselineError> {
    check_input(graph, start)?;
    let n = graph.node_count();
    let parents = prim_parents(graph, start);

    let mut edges: Vec<(usize, usize)> = parents
        .iter()
        .enumerate()
        .filter_map(|(v, parent)| parent.map(|p| (p, v)))
        .collect();
    let mut degree = vec![0usize; n];
    for &(a, b) in &edges {
        degree[a] += 1;
        degree[b] += 1;
    }
    let odd: Vec<usize> = (0..n).filter(|&v| degree[v] % 2 == 1).collect();
    for (i, j) in min_weight_matching(graph, &odd) {
        edges.push((odd[i], odd[j]));
    }

    let mut seen = vec![false; n];
    let path: Vec<usize> = euler_circuit(n, &edges, start)
        .into_iter()
        .filter(|&v| !std::mem::replace(&mut seen[v], true))
        .collect();
    Ok(closed_tour(graph, path))
}
