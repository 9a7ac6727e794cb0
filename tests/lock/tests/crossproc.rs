//! Cross-process determinism.
//!
//! Spawns the `solve_fixture` binary under several cwd and environment
//! variants and asserts identical stdout. Search results must not depend
//! on process-level state (cwd, locale, env vars, hash seeds).

use std::path::{Path, PathBuf};
use std::process::Command;

use lock_tests::{fixture_path, workspace_root};

/// `solve_fixture` lives next to the test binary's `deps/` directory.
fn binary_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push(format!("solve_fixture{}", std::env::consts::EXE_SUFFIX));
    path
}

fn run_variant(work_dir: &Path, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();
    let fixture = fixture_path("octagon8.tsp");

    let mut command = Command::new(&bin);
    command
        .arg(&fixture)
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!(
            "failed to spawn {} (work_dir={}, overrides={env_overrides:?}): {e}",
            bin.display(),
            work_dir.display()
        )
    });
    assert!(
        output.status.success(),
        "solve_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

fn field<'a>(output: &'a str, key: &str) -> &'a str {
    output
        .lines()
        .find_map(|line| line.strip_prefix(key)?.strip_prefix('='))
        .unwrap_or_else(|| panic!("output missing {key}: {output}"))
}

#[test]
fn crossproc_determinism_four_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);
    assert!(field(&baseline, "record_digest").starts_with("sha256:"));

    let alt_cwd = std::env::temp_dir();
    assert_eq!(
        baseline,
        run_variant(&alt_cwd, &[]),
        "output differs when cwd changes to {}",
        alt_cwd.display()
    );

    assert_eq!(
        baseline,
        run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]),
        "output differs when LC_ALL=C LANG=C"
    );

    assert_eq!(
        baseline,
        run_variant(
            &root,
            &[
                ("TOURBOUND_NOISE", "should_not_matter"),
                ("TZ", "America/New_York"),
                ("RUST_LOG", "trace"),
            ],
        ),
        "output differs with spurious env vars"
    );
}

#[test]
fn crossproc_output_matches_golden_fixture() {
    let output = run_variant(&workspace_root(), &[]);
    let text = std::fs::read_to_string(fixture_path("octagon8_golden.json")).unwrap();
    let golden: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(field(&output, "instance"), golden["instance"].as_str().unwrap());
    assert_eq!(
        field(&output, "graph_digest"),
        golden["graph_digest"].as_str().unwrap()
    );
    assert_eq!(
        field(&output, "expansions"),
        golden["expansions"].as_u64().unwrap().to_string()
    );

    let expected_path: Vec<String> = golden["optimal_path"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap().to_string())
        .collect();
    assert_eq!(field(&output, "path"), expected_path.join(","));

    let cost = f64::from_bits(u64::from_str_radix(field(&output, "cost_bits"), 16).unwrap());
    let expected_cost = golden["optimal_cost"].as_f64().unwrap();
    assert!((cost - expected_cost).abs() < 1e-9);
}
