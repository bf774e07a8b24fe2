//! Tests for the rib-stability binary: option layering and exit status.

use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

use tempfile::TempDir;

const RIB_A: &str = "\
=|10.0.0.0/8|3356 174 64512|192.0.2.1|
=|11.0.0.0/8|6939 64513|192.0.2.1|
not a record
";

const RIB_B: &str = "\
=|10.0.0.0/8|3356 174 64512|192.0.2.1|
=|12.0.0.0/8|1299 64514|192.0.2.1|
";

fn setup(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.out"), RIB_A).unwrap();
    fs::write(dir.path().join("b.out"), RIB_B).unwrap();
    fs::write(dir.path().join("rib-stability.toml"), config).unwrap();
    dir
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rib-stability"))
        .env_remove("RUST_LOG")
        .arg("--base-dir")
        .arg(dir)
        .arg("--config")
        .arg(dir.join("rib-stability.toml"))
        .args(args)
        .output()
        .expect("failed to execute rib-stability")
}

fn json_report(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_config_file_is_used() {
    let dir = setup("top_k = 1\nnew_route_base = \"later\"\n");

    let report = json_report(&run(dir.path(), &["--format", "json", "a.out", "b.out"]));

    assert_eq!(report["snapshots"][0]["top_ases"].as_array().unwrap().len(), 1);
    assert_eq!(report["comparisons"][0]["new_route_base"], "later");
    assert_eq!(report["snapshots"][0]["skipped_records"], 1);
}

#[test]
fn test_flags_override_config_file() {
    let dir = setup("top_k = 1\nnew_route_base = \"later\"\n");

    let report = json_report(&run(
        dir.path(),
        &["--format", "json", "--top-k", "3", "a.out", "b.out"],
    ));

    assert_eq!(report["snapshots"][0]["top_ases"].as_array().unwrap().len(), 3);
    // no --new-route-base flag, the file value stays
    assert_eq!(report["comparisons"][0]["new_route_base"], "later");
}

#[test]
fn test_strict_flag_overrides_config_file() {
    let dir = setup("malformed_records = \"skip\"\n");

    let output = run(dir.path(), &["--strict", "a.out", "b.out"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: "), "stderr: {}", stderr);
    assert!(stderr.contains("line 3"), "stderr: {}", stderr);
}

#[test]
fn test_zero_top_k_flag_is_rejected() {
    let dir = setup("top_k = 5\n");

    let output = run(dir.path(), &["--top-k", "0", "a.out"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: "), "stderr: {}", stderr);
    assert!(stderr.contains("top_k"), "stderr: {}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_source_exits_with_error() {
    let dir = setup("");

    let output = run(dir.path(), &["a.out", "missing.out"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: "), "stderr: {}", stderr);
    assert!(stderr.contains("missing.out"), "stderr: {}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_skipped_records_are_not_logged_per_line_by_default() {
    let dir = setup("");

    let output = run(dir.path(), &["a.out", "b.out"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("skipping record"), "stderr: {}", stderr);
    assert!(stderr.contains("skipped malformed records"), "stderr: {}", stderr);
}
