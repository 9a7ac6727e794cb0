//! Tourbound Harness: runs solvers on instances and records what they found.
//!
//! The harness does NOT implement search logic; it delegates to
//! `tourbound_search` and adds the surrounding tooling: run configuration,
//! the twice-around-the-tree baseline, run records (text + canonical JSON)
//! and the `tourbound` command-line binary.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod baseline;
pub mod config;
pub mod logging;
pub mod record;
pub mod runner;
