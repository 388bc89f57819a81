//! End-to-end tests for the `vcsync sync` command.
//!
//! These tests verify CLI behavior by invoking the binary directly against
//! temporary configurations and real git repositories.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Get a Command for the vcsync binary
fn vcsync_cmd() -> Command {
    Command::cargo_bin("vcsync").unwrap()
}

/// Create an origin git repository with one commit at `root/name`.
fn init_origin(root: &Path, name: &str) {
    let origin = root.join(name);
    std::fs::create_dir_all(&origin).unwrap();
    for args in [
        vec!["init"],
        vec!["commit", "--allow-empty", "-m", "initial"],
    ] {
        let output = StdCommand::new("git")
            .args([
                "-c",
                "init.defaultBranch=main",
                "-c",
                "user.name=vcsync-test",
                "-c",
                "user.email=vcsync-test@example.invalid",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(&args)
            .current_dir(&origin)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

#[test]
fn test_sync_help() {
    vcsync_cmd()
        .arg("sync")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Clone missing repositories and update existing ones",
        ));
}

#[test]
fn test_sync_missing_config_file() {
    vcsync_cmd()
        .arg("sync")
        .arg("--config")
        .arg("/nonexistent/vcsync.yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn test_sync_clones_then_updates() {
    let temp = assert_fs::TempDir::new().unwrap();
    init_origin(temp.path(), "origin_proj");

    let config = temp.child("config.yaml");
    config
        .write_str(&format!(
            "{}/work:\n  proj: git+file://{}/origin_proj\n",
            temp.path().display(),
            temp.path().display()
        ))
        .unwrap();

    vcsync_cmd()
        .arg("sync")
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("cloned"))
        .stdout(predicate::str::contains("1 repositories synchronized"));

    temp.child("work/proj/.git").assert(predicate::path::exists());

    // Second run takes the update path.
    vcsync_cmd()
        .arg("sync")
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("updated"));
}

#[test]
fn test_sync_failure_does_not_stop_siblings() {
    let temp = assert_fs::TempDir::new().unwrap();
    init_origin(temp.path(), "origin_good");

    // 'aaa_bad' sorts before 'good' in the mapping so the failure comes
    // first and the success must still happen.
    let config = temp.child("config.yaml");
    config
        .write_str(&format!(
            "{root}/work:\n  \
             aaa_bad: unknownvcs+file:///nowhere\n  \
             good: git+file://{root}/origin_good\n",
            root = temp.path().display()
        ))
        .unwrap();

    vcsync_cmd()
        .arg("sync")
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("cloned"))
        .stderr(predicate::str::contains("aaa_bad"))
        .stderr(predicate::str::contains("1 of 2 repositories failed"));

    temp.child("work/good/.git").assert(predicate::path::exists());
}

#[test]
fn test_sync_namematch_filter_limits_run() {
    let temp = assert_fs::TempDir::new().unwrap();
    init_origin(temp.path(), "origin_alpha");
    init_origin(temp.path(), "origin_beta");

    let config = temp.child("config.yaml");
    config
        .write_str(&format!(
            "{root}/work:\n  \
             alpha: git+file://{root}/origin_alpha\n  \
             beta: git+file://{root}/origin_beta\n",
            root = temp.path().display()
        ))
        .unwrap();

    vcsync_cmd()
        .arg("sync")
        .arg("--config")
        .arg(config.path())
        .arg("a*")
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"));

    temp.child("work/alpha").assert(predicate::path::exists());
    temp.child("work/beta").assert(predicate::path::missing());
}

#[test]
fn test_sync_filter_matching_nothing_is_not_an_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = temp.child("config.yaml");
    config
        .write_str(&format!(
            "{}/work:\n  proj: git+file:///nowhere\n",
            temp.path().display()
        ))
        .unwrap();

    vcsync_cmd()
        .arg("sync")
        .arg("--config")
        .arg(config.path())
        .arg("zzz*")
        .assert()
        .success()
        .stdout(predicate::str::contains("No repositories selected."));
}

#[test]
fn test_sync_path_collision_is_config_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = temp.child("config.yaml");
    // Both parent keys resolve to the same directory, so 'proj' collides.
    config
        .write_str(&format!(
            "{root}/work:\n  proj: git+file:///a\n{root}/work/:\n  proj: git+file:///b\n",
            root = temp.path().display()
        ))
        .unwrap();

    vcsync_cmd()
        .arg("sync")
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("same path"));

    temp.child("work").assert(predicate::path::missing());
}
