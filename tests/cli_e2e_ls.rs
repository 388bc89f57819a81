//! End-to-end tests for the `vcsync ls` command.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Get a Command for the vcsync binary
fn vcsync_cmd() -> Command {
    Command::cargo_bin("vcsync").unwrap()
}

fn write_config(temp: &assert_fs::TempDir) -> assert_fs::fixture::ChildPath {
    let config = temp.child("config.yaml");
    config
        .write_str(
            "/tmp/work:\n  \
             alpha: git+file:///tmp/origin/alpha\n  \
             beta:\n    \
             url: hg+https://hg.example.com/beta\n    \
             remotes:\n      \
             mirror: https://hg.example.com/mirror\n  \
             gamma: svn+svn://svn.example.com/gamma/trunk\n",
        )
        .unwrap();
    config
}

#[test]
fn test_ls_help() {
    vcsync_cmd()
        .arg("ls")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "List the repositories a configuration resolves to",
        ));
}

#[test]
fn test_ls_lists_all_repositories() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = write_config(&temp);

    vcsync_cmd()
        .arg("ls")
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"))
        .stdout(predicate::str::contains("beta"))
        .stdout(predicate::str::contains("gamma"))
        .stdout(predicate::str::contains("3 repository(ies)"));
}

#[test]
fn test_ls_shows_vcs_kind_and_path() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = write_config(&temp);

    vcsync_cmd()
        .arg("ls")
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("git"))
        .stdout(predicate::str::contains("hg"))
        .stdout(predicate::str::contains("svn"))
        .stdout(predicate::str::contains("/tmp/work/alpha"));
}

#[test]
fn test_ls_namematch_filter() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = write_config(&temp);

    vcsync_cmd()
        .arg("ls")
        .arg("--config")
        .arg(config.path())
        .arg("a*")
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"))
        .stdout(predicate::str::contains("1 repository(ies)"))
        .stdout(predicate::str::contains("beta").not());
}

#[test]
fn test_ls_repomatch_filter() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = write_config(&temp);

    vcsync_cmd()
        .arg("ls")
        .arg("--config")
        .arg(config.path())
        .arg("--repomatch")
        .arg("hg+*")
        .assert()
        .success()
        .stdout(predicate::str::contains("beta"))
        .stdout(predicate::str::contains("alpha").not());
}

#[test]
fn test_ls_json_output() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = write_config(&temp);

    let output = vcsync_cmd()
        .arg("ls")
        .arg("--config")
        .arg(config.path())
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["name"], "alpha");
    assert_eq!(entries[0]["vcs"], "git");
    assert_eq!(entries[1]["remotes"][0]["name"], "mirror");
}

#[test]
fn test_ls_invalid_glob_pattern() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = write_config(&temp);

    vcsync_cmd()
        .arg("ls")
        .arg("--config")
        .arg(config.path())
        .arg("[broken")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Glob pattern error"));
}
