//! End-to-end CLI tests for the sysprober binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn scratch_meminfo(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create scratch meminfo");
    file.write_all(content.as_bytes()).expect("write scratch meminfo");
    file.flush().expect("flush scratch meminfo");
    file
}

fn sysprober() -> Command {
    let mut cmd = Command::cargo_bin("sysprober").expect("binary builds");
    cmd.env_remove("SYSPROBER_MEMINFO");
    cmd.env_remove("SYSPROBER_LOG");
    cmd
}

#[test]
fn test_memory_json_output() {
    let file = scratch_meminfo("MemTotal:    16384000 kB\nMemFree:    8192000 kB\n");

    sysprober()
        .args(["memory", "--meminfo"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"memtotal\": 16384000"))
        .stdout(predicate::str::contains("\"unit\": \"kB\""));
}

#[test]
fn test_memory_summary_output() {
    let file = scratch_meminfo(
        "MemTotal:    100 kB\nMemFree:    50 kB\nMemAvailable:    75 kB\nSwapTotal:    10 kB\n",
    );

    sysprober()
        .args(["memory", "-f", "summary", "--meminfo"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("mem: total=100 free=50 available=75"));
}

#[test]
fn test_memory_unit_mismatch_is_fatal() {
    let file = scratch_meminfo("SwapTotal:    2048000 MB\n");

    sysprober()
        .args(["memory", "--meminfo"])
        .arg(file.path())
        .assert()
        .failure()
        .code(20)
        .stderr(predicate::str::contains("Unit Mismatch"))
        .stderr(predicate::str::contains("SwapTotal"));
}

#[test]
fn test_memory_missing_source_is_fatal() {
    sysprober()
        .args(["memory", "--meminfo", "/nonexistent/meminfo"])
        .assert()
        .failure()
        .code(10)
        .stderr(predicate::str::contains("Source Unavailable"));
}

#[test]
fn test_pkg_json_output_has_both_groups() {
    sysprober()
        .args(["pkg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"linux\""))
        .stdout(predicate::str::contains("\"python\""))
        .stdout(predicate::str::contains("\"apt\""))
        .stdout(predicate::str::contains("\"poetry\""));
}

#[test]
fn test_pkg_text_output() {
    sysprober()
        .args(["pkg", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("linux:"))
        .stdout(predicate::str::contains("python:"));
}

#[test]
fn test_all_json_output() {
    let file = scratch_meminfo("MemTotal:    100 kB\n");

    sysprober()
        .args(["all", "--meminfo"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"memory\""))
        .stdout(predicate::str::contains("\"pkg\""));
}
