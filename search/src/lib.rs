//! Tourbound Search: exact branch-and-bound over Hamiltonian path prefixes.
//!
//! This crate provides the search layer. It depends only on
//! `tourbound_kernel`; it does NOT depend on `tourbound_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! tourbound_kernel  ←  tourbound_search  ←  tourbound_harness
//! (graph, hashing)     (frontier, driver)    (runner, records, CLI)
//! ```
//!
//! # Key types
//!
//! - [`TourGraph`](contract::TourGraph) -- read-only weighted adjacency the search runs on
//! - [`SearchState`](state::SearchState) -- immutable partial tour with its lower bound
//! - [`BoundEstimator`](bound::BoundEstimator) -- lower bound on the closed tour cost; [`BoundKind`](bound::BoundKind) names the shipped ones
//! - [`Frontier`](frontier::Frontier) -- pending states ordered by a [`FrontierOrder`](frontier::FrontierOrder)
//! - [`SearchPolicy`](policy::SearchPolicy) -- time budget, ordering and pruning configuration
//! - [`search`](search::search) -- the driver loop; returns `Optimal`, `TimedOut` or `Infeasible`
//! - [`TelemetryCollector`](telemetry::TelemetryCollector) -- caller-supplied wall-clock / memory measurement

#![forbid(unsafe_code)]

pub mod bound;
pub mod contract;
pub mod error;
pub mod frontier;
pub mod policy;
pub mod search;
pub mod state;
pub mod stats;
pub mod telemetry;
