//! Approximation factors of the tree baselines on metric instances.
//!
//! Random integer points in the plane give metric graphs; the brute-force
//! optimum is the reference. Christofides stays within 1.5 of it (the
//! odd-node matching is exact at these sizes), twice-around-the-tree
//! within 2.

use lock_tests::brute_force::{cycle_cost, optimal_tour_cost};
use proptest::prelude::*;
use tourbound_harness::baseline::{christofides, twice_around_tree};
use tourbound_kernel::graph::WeightedGraph;
use tourbound_kernel::instance::{euclidean_graph, Point};
use tourbound_search::state::START_NODE;

const TOLERANCE: f64 = 1e-6;

fn metric_graph_strategy(max_n: usize) -> impl Strategy<Value = WeightedGraph> {
    prop::collection::vec((0u32..100, 0u32..100), 3..=max_n).prop_map(|coords| {
        let points: Vec<Point> = coords
            .into_iter()
            .map(|(x, y)| Point::new(f64::from(x), f64::from(y)))
            .collect();
        euclidean_graph(&points).unwrap()
    })
}

fn assert_valid_tour(graph: &WeightedGraph, path: &[usize], cost: f64) {
    assert_eq!(path[0], START_NODE);
    let mut sorted = path.to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..graph.node_count()).collect::<Vec<_>>());
    let replayed = cycle_cost(graph, &path[1..]).unwrap();
    assert!((replayed - cost).abs() < TOLERANCE);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn christofides_within_one_and_a_half_of_optimum(graph in metric_graph_strategy(8)) {
        let optimum = optimal_tour_cost(&graph).unwrap();
        let tour = christofides(&graph, START_NODE).unwrap();
        assert_valid_tour(&graph, &tour.path, tour.cost);
        prop_assert!(tour.cost >= optimum - TOLERANCE);
        prop_assert!(
            tour.cost <= 1.5 * optimum + TOLERANCE,
            "christofides {} vs optimum {optimum}",
            tour.cost
        );
    }

    #[test]
    fn twice_around_tree_within_twice_optimum(graph in metric_graph_strategy(8)) {
        let optimum = optimal_tour_cost(&graph).unwrap();
        let tour = twice_around_tree(&graph, START_NODE).unwrap();
        assert_valid_tour(&graph, &tour.path, tour.cost);
        prop_assert!(tour.cost >= optimum - TOLERANCE);
        prop_assert!(tour.cost <= 2.0 * optimum + TOLERANCE);
    }
}

#[test]
fn christofides_is_deterministic() {
    let points: Vec<Point> = (0..12u32)
        .map(|i| Point::new(f64::from((i * 37) % 23), f64::from((i * 11) % 17)))
        .collect();
    let graph = euclidean_graph(&points).unwrap();
    let a = christofides(&graph, START_NODE).unwrap();
    let b = christofides(&graph, START_NODE).unwrap();
    assert_eq!(a, b);
}
