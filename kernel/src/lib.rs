//! Tourbound Kernel: graph data and canonical hashing for the tour search.
//!
//! # API Surface
//!
//! - [`graph::WeightedGraph`] -- immutable-after-build weighted adjacency over `n` nodes
//! - [`instance::parse_instance`] / [`instance::read_instance`] -- TSPLIB-style coordinate files
//! - [`instance::euclidean_graph`] -- complete graph from 2D coordinates
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 content hashing
//!
//! # Module Dependency Direction
//!
//! `proof` ← `graph` ← `instance`
//!
//! One-way only. `proof` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod graph;
pub mod instance;
pub mod proof;
