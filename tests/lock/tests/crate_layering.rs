//! Build-graph layering: kernel ← search ← harness, one way only.
//!
//! Library crates also never write to stdout or stderr directly; they log
//! through the `log` facade and leave output to the binary.

use std::fmt::Write;
use std::fs;
use std::path::Path;

use lock_tests::workspace_root;

/// Non-comment source lines under `dir` containing any of `patterns`.
fn scan(dir: &Path, patterns: &[&str]) -> Vec<(String, usize, String)> {
    let mut violations = Vec::new();
    walk(dir, patterns, &mut violations);
    violations
}

fn walk(dir: &Path, patterns: &[&str], violations: &mut Vec<(String, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, patterns, violations);
        } else if path.extension().is_some_and(|e| e == "rs") {
            check_file(&path, patterns, violations);
        }
    }
}

fn check_file(path: &Path, patterns: &[&str], violations: &mut Vec<(String, usize, String)>) {
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };
    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*') {
            continue;
        }
        for pattern in patterns {
            if trimmed.contains(pattern) {
                violations.push((path.display().to_string(), line_no + 1, line.to_string()));
            }
        }
    }
}

fn assert_clean(what: &str, violations: &[(String, usize, String)]) {
    if !violations.is_empty() {
        let mut msg = format!("{what}:\n");
        for (file, line, content) in violations {
            let _ = writeln!(msg, "  {file}:{line}: {content}");
        }
        panic!("{msg}");
    }
}

fn dependency_section(crate_dir: &str) -> String {
    let manifest = workspace_root().join(crate_dir).join("Cargo.toml");
    let content = fs::read_to_string(&manifest)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", manifest.display()));
    content
        .split("[dependencies]")
        .nth(1)
        .map(|rest| rest.split("\n[").next().unwrap_or_default().to_string())
        .unwrap_or_default()
}

#[test]
fn kernel_depends_on_no_workspace_crate() {
    let deps = dependency_section("kernel");
    assert!(!deps.contains("tourbound-"), "kernel dependencies:\n{deps}");
    assert_clean(
        "kernel source references an upper layer",
        &scan(
            &workspace_root().join("kernel").join("src"),
            &["tourbound_search", "tourbound_harness"],
        ),
    );
}

#[test]
fn search_depends_only_on_kernel() {
    let deps = dependency_section("search");
    assert!(deps.contains("tourbound-kernel"));
    assert!(!deps.contains("tourbound-harness"), "search dependencies:\n{deps}");
    assert_clean(
        "search source references the harness",
        &scan(&workspace_root().join("search").join("src"), &["tourbound_harness"]),
    );
}

#[test]
fn libraries_do_not_print() {
    let root = workspace_root();
    for crate_dir in ["kernel", "search"] {
        assert_clean(
            &format!("{crate_dir} prints directly"),
            &scan(
                &root.join(crate_dir).join("src"),
                &["println!", "eprintln!", "print!(", "dbg!("],
            ),
        );
    }
    // The harness library prints nothing either; only its binary does.
    let harness_src = root.join("harness").join("src");
    let violations: Vec<_> = scan(&harness_src, &["println!", "eprintln!", "print!(", "dbg!("])
        .into_iter()
        .filter(|(file, _, _)| !Path::new(file).starts_with(harness_src.join("bin")))
        .collect();
    assert_clean("harness library prints directly", &violations);
}
