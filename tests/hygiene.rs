//! Hygiene: enforces coding standards at test time
//!
//! Scans the bouquet crate's production sources (`src/`, minus `*_test.rs`
//! modules) for patterns that crash the server, swallow errors, or bypass
//! the logging and config layers. Each pattern has a budget; budgets only
//! ratchet down.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    // Panics: a handler that panics drops the connection.
    Budget { pattern: ".unwrap()", max: 0, why: "propagate with `?` or map to an ApiError" },
    Budget { pattern: ".expect(", max: 0, why: "propagate with `?` or map to an ApiError" },
    Budget { pattern: "panic!(", max: 0, why: "return an error instead" },
    Budget { pattern: "unreachable!(", max: 0, why: "make the state unrepresentable" },
    Budget { pattern: "todo!(", max: 0, why: "finish the stub" },
    Budget { pattern: "unimplemented!(", max: 0, why: "finish the stub" },
    // Silent loss.
    Budget { pattern: "let _ =", max: 0, why: "inspect or log the result" },
    // config.rs: env lookup maps `VarError` to `None`.
    Budget { pattern: ".ok()", max: 1, why: "inspect or log the error" },
    // Output goes through tracing.
    Budget { pattern: "println!(", max: 0, why: "use tracing::info!" },
    Budget { pattern: "eprintln!(", max: 0, why: "use tracing::warn! or error!" },
    Budget { pattern: "dbg!(", max: 0, why: "remove debugging output" },
    // Style.
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete the code" },
];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")), "run from the crate root");
    assert!(files.iter().all(|f| !f.path.ends_with("_test.rs")));
}

#[test]
fn pattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let listing: Vec<String> = found.iter().map(|(path, c)| format!("    {path}: {c}")).collect();
            failures.push(format!(
                "`{}` budget exceeded: found {count}, max {} ({})\n{}",
                budget.pattern,
                budget.max,
                budget.why,
                listing.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn env_is_read_only_by_config() {
    let files = source_files();
    let offenders: Vec<&str> = files
        .iter()
        .filter(|f| f.content.contains("std::env::var") && !f.path.ends_with("config.rs"))
        .map(|f| f.path.as_str())
        .collect();
    assert!(offenders.is_empty(), "read environment through Config: {offenders:?}");
}
