//! Proof module: canonical JSON, domain-separated hashing.
//!
//! Depends on nothing else in the kernel. Everything that produces a digest
//! routes through here.

pub mod canon;
pub mod hash;
pub mod hash_domain;
