//! Shared helpers for the cross-crate lock tests.

#![forbid(unsafe_code)]

pub mod brute_force;

use std::path::PathBuf;

/// Workspace root, resolved from this crate's manifest directory.
///
/// # Panics
///
/// Panics if the crate is not at `<root>/tests/lock`.
#[must_use]
pub fn workspace_root() -> PathBuf {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(std::path::Path::parent)
        .expect("lock-tests lives at <root>/tests/lock")
        .to_path_buf()
}

/// Path of a file under `<root>/tests/fixtures`.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    workspace_root().join("tests").join("fixtures").join(name)
}
