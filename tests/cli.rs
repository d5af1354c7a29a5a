// End-to-end tests of the recovery_plot binary, run inside a temporary working directory
#![allow(deprecated)] // assert_cmd::Command::cargo_bin

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CSV_HEADER: &str = "num_instances,recovery_time_sec\n";

fn workdir_with_csv(content: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("recovery_times.csv"), content).unwrap();
    dir
}

fn recovery_plot(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("recovery_plot").unwrap();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn test_default_paths_write_png() {
    let dir = workdir_with_csv(&format!("{}1,5.0\n2,9.5\n4,20.0\n", CSV_HEADER));
    recovery_plot(dir.path()).assert().success();

    let png = dir.path().join("recovery_graph.png");
    let bytes = fs::read(&png).unwrap();
    assert!(!bytes.is_empty());
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn test_second_run_overwrites() {
    let dir = workdir_with_csv(&format!("{}1,5.0\n2,9.5\n", CSV_HEADER));
    let png = dir.path().join("recovery_graph.png");
    fs::write(&png, b"stale").unwrap();

    recovery_plot(dir.path()).assert().success();
    recovery_plot(dir.path()).assert().success();

    let bytes = fs::read(&png).unwrap();
    assert_ne!(bytes, b"stale");
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn test_custom_paths() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("scale.csv"),
        format!("{}10,31.5\n20,62\n", CSV_HEADER),
    )
    .unwrap();

    recovery_plot(dir.path())
        .args(&["-f", "scale.csv", "-o", "scale.png"])
        .assert()
        .success();

    assert!(dir.path().join("scale.png").exists());
    assert!(!dir.path().join("recovery_graph.png").exists());
}

#[test]
fn test_missing_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();

    recovery_plot(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("recovery_times.csv"));

    assert!(!dir.path().join("recovery_graph.png").exists());
}

#[test]
fn test_missing_column_leaves_previous_png() {
    let dir = workdir_with_csv("num_instances,elapsed\n1,5.0\n");
    let png = dir.path().join("recovery_graph.png");
    fs::write(&png, b"previous run").unwrap();

    recovery_plot(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("recovery_time_sec"));

    assert_eq!(fs::read(&png).unwrap(), b"previous run");
}

#[test]
fn test_header_only_fails() {
    let dir = workdir_with_csv(CSV_HEADER);

    recovery_plot(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no data rows"));

    assert!(!dir.path().join("recovery_graph.png").exists());
}

#[test]
fn test_invalid_value_names_line() {
    let dir = workdir_with_csv(&format!("{}1,5.0\nmany,9.5\n", CSV_HEADER));

    recovery_plot(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"))
        .stderr(predicate::str::contains("many"));
}

#[test]
fn test_unwritable_output_fails() {
    let dir = workdir_with_csv(&format!("{}1,5.0\n", CSV_HEADER));

    recovery_plot(dir.path())
        .args(&["-o", "no_such_dir/graph.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no_such_dir"));
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    recovery_plot(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
