//! The 5-node classroom instance, end to end through every layer.

use std::time::Duration;

use tourbound_harness::config::{Algorithm, RunConfig};
use tourbound_harness::record::RunOutcome;
use tourbound_harness::runner::run_instance;
use tourbound_kernel::instance::classroom_example;
use tourbound_search::search::solve_tour;

#[test]
fn solve_tour_returns_cost_37_and_known_order() {
    let tour = solve_tour(&classroom_example(), Duration::from_secs(60)).unwrap();
    assert_eq!(tour.cost, 37.0);
    assert_eq!(tour.path, vec![0, 1, 2, 4, 3]);
}

#[test]
fn closing_edge_is_counted_but_not_repeated() {
    let g = classroom_example();
    let tour = solve_tour(&g, Duration::from_secs(60)).unwrap();
    assert_eq!(tour.path.len(), g.node_count());
    assert_ne!(tour.path.last(), Some(&0));
    let open: f64 = tour.path.windows(2).map(|w| g.weight(w[0], w[1])).sum();
    assert_eq!(open + g.weight(3, 0), tour.cost);
}

#[test]
fn baseline_is_never_better_than_exact_search() {
    let g = classroom_example();
    let exact = run_instance("classroom", &g, &RunConfig::default()).unwrap();
    let baseline = run_instance(
        "classroom",
        &g,
        &RunConfig {
            algorithm: Algorithm::TwiceAroundTree,
            ..RunConfig::default()
        },
    )
    .unwrap();
    let exact_cost = exact.found_cost().unwrap();
    let baseline_cost = baseline.found_cost().unwrap();
    assert!(baseline_cost >= exact_cost);
    assert!(baseline_cost <= 2.0 * exact_cost);
    assert_eq!(exact.graph_digest, baseline.graph_digest);
}

#[test]
fn record_text_lists_cost_and_path() {
    let record = run_instance(
        "classroom",
        &classroom_example(),
        &RunConfig {
            optimal_cost: Some(37.0),
            ..RunConfig::default()
        },
    )
    .unwrap();
    assert!(matches!(record.outcome, RunOutcome::Solved { .. }));
    let text = record.to_text();
    assert!(text.contains("optimal cost: 37\n"), "{text}");
    assert!(text.contains("found cost: 37\n"), "{text}");
    assert!(text.contains("path: 0 1 2 4 3\n"), "{text}");
}
