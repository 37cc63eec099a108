//! End-to-end tests for global CLI behaviour (help, version, etc.).

use assert_cmd::Command;
use predicates::prelude::*;

fn sift() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sift"))
}

#[test]
fn help_shows_usage() {
    sift()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("regular expressions"));
}

#[test]
fn help_lists_commands() {
    sift()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn scan_help_lists_pattern_flags() {
    sift()
        .args(["scan", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--pattern"))
        .stdout(predicate::str::contains("--pattern-file"))
        .stdout(predicate::str::contains("--exit-zero"));
}

#[test]
fn version_flag() {
    sift()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sift"));
}

#[test]
fn no_args_shows_help() {
    sift().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn invalid_command_fails() {
    sift().arg("invalid-command").assert().failure();
}

#[test]
fn invalid_format_fails() {
    sift().args(["scan", ".", "--format", "xml"]).assert().failure();
}
