//! Exhaustive reference solver for small graphs.

use tourbound_kernel::graph::WeightedGraph;

/// Cheapest Hamiltonian cycle cost over all orderings starting at node 0,
/// or `None` if no ordering is a cycle through present edges.
///
/// Enumerates `(n-1)!` orderings; meant for `n <= 9`.
#[must_use]
pub fn optimal_tour_cost(graph: &WeightedGraph) -> Option<f64> {
    let n = graph.node_count();
    if n < 2 {
        return None;
    }
    let mut rest: Vec<usize> = (1..n).collect();
    let mut best: Option<f64> = None;
    permute(graph, &mut rest, 0, &mut best);
    best
}

fn permute(graph: &WeightedGraph, rest: &mut [usize], k: usize, best: &mut Option<f64>) {
    if k == rest.len() {
        if let Some(cost) = cycle_cost(graph, rest) {
            match *best {
                Some(b) if b <= cost => {}
                _ => *best = Some(cost),
            }
        }
        return;
    }
    for i in k..rest.len() {
        rest.swap(k, i);
        permute(graph, rest, k + 1, best);
        rest.swap(k, i);
    }
}

/// Cost of the cycle `0 → order... → 0`, or `None` if an edge is missing.
#[must_use]
pub fn cycle_cost(graph: &WeightedGraph, order: &[usize]) -> Option<f64> {
    let mut cost = 0.0;
    let mut prev = 0;
    for &next in order {
        cost += graph.edge_weight(prev, next)?;
        prev = next;
    }
    Some(cost + graph.edge_weight(prev, 0)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourbound_kernel::instance::classroom_example;

    #[test]
    fn classroom_optimum_is_37() {
        assert_eq!(optimal_tour_cost(&classroom_example()), Some(37.0));
    }

    #[test]
    fn path_graph_has_no_cycle() {
        let g = WeightedGraph::from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0)]).unwrap();
        assert_eq!(optimal_tour_cost(&g), None);
    }

    #[test]
    fn cycle_cost_includes_closing_edge() {
        assert_eq!(
            cycle_cost(&classroom_example(), &[1, 2, 4, 3]),
            Some(4.0 + 6.0 + 11.0 + 7.0 + 9.0)
        );
    }
}
