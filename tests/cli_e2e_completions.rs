//! End-to-end tests for the `vcsync completions` command.

use assert_cmd::Command;
use predicates::prelude::*;

fn vcsync_cmd() -> Command {
    Command::cargo_bin("vcsync").unwrap()
}

#[test]
fn test_completions_bash() {
    vcsync_cmd()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("vcsync"));
}

#[test]
fn test_completions_zsh() {
    vcsync_cmd()
        .arg("completions")
        .arg("zsh")
        .assert()
        .success()
        .stdout(predicate::str::contains("vcsync"));
}

#[test]
fn test_completions_rejects_unknown_shell() {
    vcsync_cmd()
        .arg("completions")
        .arg("tcsh")
        .assert()
        .failure();
}
