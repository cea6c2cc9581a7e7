//! Runs every program under `demos/`
//!
//! The first line of each file states the outcome:
//! `// expect: <value>` or `// expect-error: <message fragment>`.

use std::fs;
use std::path::{Path, PathBuf};

use lamgamma::eval::EvalOptions;
use lamgamma::run;
use walkdir::WalkDir;

enum Expectation {
    Value(String),
    Error(String),
}

fn demo_files() -> Vec<PathBuf> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "lg"))
        .collect();
    files.sort();
    files
}

fn expectation(path: &Path, source: &str) -> Expectation {
    let first = source.lines().next().unwrap_or_default();
    if let Some(rest) = first.strip_prefix("// expect-error:") {
        Expectation::Error(rest.trim().to_string())
    } else if let Some(rest) = first.strip_prefix("// expect:") {
        Expectation::Value(rest.trim().to_string())
    } else {
        panic!("{} has no expectation header", path.display());
    }
}

#[test]
fn test_demos_exist() {
    assert!(demo_files().len() >= 10);
}

#[test]
fn test_demos() {
    let mut failures = Vec::new();

    for path in demo_files() {
        let source = fs::read_to_string(&path).unwrap();
        let result = run(&source, &EvalOptions::default());
        let name = path.file_name().unwrap().to_string_lossy().into_owned();

        match (expectation(&path, &source), result) {
            (Expectation::Value(expected), Ok(value)) => {
                if value.to_string() != expected {
                    failures.push(format!("{}: expected `{}`, got `{}`", name, expected, value));
                }
            }
            (Expectation::Value(expected), Err(err)) => {
                failures.push(format!("{}: expected `{}`, got error {}", name, expected, err.render(&source)));
            }
            (Expectation::Error(fragment), Ok(value)) => {
                failures.push(format!("{}: expected error `{}`, got `{}`", name, fragment, value));
            }
            (Expectation::Error(fragment), Err(err)) => {
                if !err.to_string().contains(&fragment) {
                    failures.push(format!("{}: expected error `{}`, got `{}`", name, fragment, err));
                }
            }
        }
    }

    assert!(failures.is_empty(), "demo failures:\n{}", failures.join("\n"));
}
