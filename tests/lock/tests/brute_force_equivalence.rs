//! Exact search agrees with exhaustive enumeration on small graphs.
//!
//! Weights are small integers so every tour cost is exact in `f64` and
//! equality is meaningful. Graphs are drawn both complete and with edges
//! removed, so infeasible instances are exercised too.
//!
//! Exactness is asserted under [`ReturnAwareBound`]. The default
//! [`MinUnvisitedEdgeBound`] ignores the return edge and may prune the
//! optimum, so for it only tour validity and the one-sided cost relation hold.

use std::time::Duration;

use lock_tests::brute_force::{cycle_cost, optimal_tour_cost};
use proptest::prelude::*;
use tourbound_kernel::graph::WeightedGraph;
use tourbound_search::bound::{BoundEstimator, MinUnvisitedEdgeBound, ReturnAwareBound};
use tourbound_search::error::SearchError;
use tourbound_search::frontier::FrontierOrder;
use tourbound_search::policy::{PruneMode, SearchPolicy};
use tourbound_search::search::{search, Tour};
use tourbound_search::telemetry::NullTelemetry;

const BUDGET: Duration = Duration::from_secs(120);

fn build_graph(n: usize, weights: &[Option<u32>]) -> WeightedGraph {
    let mut graph = WeightedGraph::new(n);
    let mut k = 0;
    for a in 0..n {
        for b in (a + 1)..n {
            if let Some(w) = weights[k] {
                graph.add_edge(a, b, f64::from(w)).unwrap();
            }
            k += 1;
        }
    }
    graph
}

/// Complete graphs on `2..=max_n` nodes with weights in `0..50`.
fn complete_graph_strategy(max_n: usize) -> impl Strategy<Value = WeightedGraph> {
    (2..=max_n).prop_flat_map(|n| {
        prop::collection::vec(0u32..50, n * (n - 1) / 2).prop_map(move |weights| {
            let weights: Vec<Option<u32>> = weights.into_iter().map(Some).collect();
            build_graph(n, &weights)
        })
    })
}

/// Graphs where each pair `a < b` carries an edge with probability
/// `keep_edge`, which must lie strictly between 0 and 1.
fn sparse_graph_strategy(max_n: usize, keep_edge: f64) -> impl Strategy<Value = WeightedGraph> {
    (2..=max_n).prop_flat_map(move |n| {
        prop::collection::vec(prop::option::weighted(keep_edge, 0u32..50), n * (n - 1) / 2)
            .prop_map(move |weights| build_graph(n, &weights))
    })
}

fn exact_policy() -> SearchPolicy {
    SearchPolicy {
        time_budget: BUDGET,
        ..SearchPolicy::default()
    }
}

fn solve_with(
    graph: &WeightedGraph,
    policy: &SearchPolicy,
    estimator: &dyn BoundEstimator,
) -> Result<Tour, SearchError> {
    let mut telemetry = NullTelemetry::new();
    search(graph, policy, estimator, &mut telemetry)?.into_tour()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn complete_graphs_match_brute_force(graph in complete_graph_strategy(8)) {
        let expected = optimal_tour_cost(&graph).unwrap();
        let tour = solve_with(&graph, &exact_policy(), &ReturnAwareBound).unwrap();
        prop_assert_eq!(tour.cost, expected);
        prop_assert_eq!(cycle_cost(&graph, &tour.path[1..]), Some(tour.cost));
        prop_assert_eq!(tour.path[0], 0);
    }

    #[test]
    fn sparse_graphs_match_brute_force(graph in sparse_graph_strategy(7, 0.6)) {
        match (optimal_tour_cost(&graph), solve_with(&graph, &exact_policy(), &ReturnAwareBound)) {
            (Some(expected), Ok(tour)) => {
                prop_assert_eq!(tour.cost, expected);
                prop_assert_eq!(cycle_cost(&graph, &tour.path[1..]), Some(expected));
            }
            (None, Err(SearchError::InfeasibleInstance { node_count })) => {
                prop_assert_eq!(node_count, graph.node_count());
            }
            (expected, got) => {
                prop_assert!(false, "brute force {:?} vs search {:?}", expected, got);
            }
        }
    }

    #[test]
    fn every_policy_finds_the_same_cost(graph in complete_graph_strategy(6)) {
        let expected = optimal_tour_cost(&graph).unwrap();
        for frontier_order in [FrontierOrder::DepthThenBound, FrontierOrder::BoundThenDepth] {
            for prune_mode in [PruneMode::Bound, PruneMode::Disabled] {
                let policy = SearchPolicy {
                    time_budget: BUDGET,
                    frontier_order,
                    prune_mode,
                };
                let tour = solve_with(&graph, &policy, &ReturnAwareBound).unwrap();
                prop_assert_eq!(tour.cost, expected);
            }
        }
    }

    #[test]
    fn unpruned_search_is_exact_under_any_bound(graph in complete_graph_strategy(6)) {
        let expected = optimal_tour_cost(&graph).unwrap();
        let policy = SearchPolicy {
            prune_mode: PruneMode::Disabled,
            ..exact_policy()
        };
        let tour = solve_with(&graph, &policy, &MinUnvisitedEdgeBound).unwrap();
        prop_assert_eq!(tour.cost, expected);
    }

    #[test]
    fn default_bound_returns_a_valid_tour_no_cheaper_than_optimum(graph in complete_graph_strategy(8)) {
        let expected = optimal_tour_cost(&graph).unwrap();
        let tour = solve_with(&graph, &exact_policy(), &MinUnvisitedEdgeBound).unwrap();
        prop_assert!(tour.cost >= expected);
        prop_assert_eq!(cycle_cost(&graph, &tour.path[1..]), Some(tour.cost));
        let mut seen = tour.path.clone();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..graph.node_count()).collect::<Vec<_>>());
    }
}
