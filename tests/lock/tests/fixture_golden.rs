//! The octagon8 fixture parses to a pinned graph and solves to a pinned tour.
//!
//! Golden values live in `tests/fixtures/octagon8_golden.json`. A change to
//! graph canonicalisation, policy serialisation, frontier ordering or the
//! default bound shows up here first.

use std::time::Duration;

use lock_tests::brute_force::{cycle_cost, optimal_tour_cost};
use lock_tests::fixture_path;
use tourbound_kernel::instance::read_instance;
use tourbound_search::bound::{MinUnvisitedEdgeBound, ReturnAwareBound};
use tourbound_search::policy::SearchPolicy;
use tourbound_search::search::search;
use tourbound_search::telemetry::NullTelemetry;

fn golden() -> serde_json::Value {
    let text = std::fs::read_to_string(fixture_path("octagon8_golden.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn golden_path(golden: &serde_json::Value) -> Vec<usize> {
    golden["optimal_path"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| usize::try_from(v.as_u64().unwrap()).unwrap())
        .collect()
}

#[test]
fn fixture_parses_to_pinned_graph_digest() {
    let golden = golden();
    let instance = read_instance(&fixture_path("octagon8.tsp")).unwrap();
    assert_eq!(instance.name, golden["instance"].as_str().unwrap());
    assert_eq!(instance.points.len(), 8);
    let graph = instance.to_graph().unwrap();
    assert!(graph.is_complete());
    assert_eq!(
        graph.digest().as_str(),
        golden["graph_digest"].as_str().unwrap()
    );
}

#[test]
fn default_policy_digest_is_pinned() {
    let golden = golden();
    assert_eq!(
        SearchPolicy::default().digest().unwrap().as_str(),
        golden["policy_digest"].as_str().unwrap()
    );
}

#[test]
fn default_search_reproduces_golden_tour_and_expansions() {
    let golden = golden();
    let graph = read_instance(&fixture_path("octagon8.tsp"))
        .unwrap()
        .to_graph()
        .unwrap();
    let mut telemetry = NullTelemetry::new();
    let result = search(
        &graph,
        &SearchPolicy::default(),
        &MinUnvisitedEdgeBound,
        &mut telemetry,
    )
    .unwrap();

    let expected_cost = golden["optimal_cost"].as_f64().unwrap();
    let tour = result.tour().unwrap();
    assert!(
        (tour.cost - expected_cost).abs() < 1e-9,
        "cost {} vs golden {expected_cost}",
        tour.cost
    );
    assert_eq!(tour.path, golden_path(&golden));
    assert_eq!(result.stats.expansions, golden["expansions"].as_u64().unwrap());
}

#[test]
fn golden_cost_is_the_true_optimum() {
    let golden = golden();
    let graph = read_instance(&fixture_path("octagon8.tsp"))
        .unwrap()
        .to_graph()
        .unwrap();
    let expected_cost = golden["optimal_cost"].as_f64().unwrap();
    let brute = optimal_tour_cost(&graph).unwrap();
    assert!((brute - expected_cost).abs() < 1e-9);

    let path = golden_path(&golden);
    let replayed = cycle_cost(&graph, &path[1..]).unwrap();
    assert!((replayed - expected_cost).abs() < 1e-9);

    let mut telemetry = NullTelemetry::new();
    let policy = SearchPolicy {
        time_budget: Duration::from_secs(120),
        ..SearchPolicy::default()
    };
    let exact = search(&graph, &policy, &ReturnAwareBound, &mut telemetry)
        .unwrap()
        .into_tour()
        .unwrap();
    assert!((exact.cost - expected_cost).abs() < 1e-9);
}
