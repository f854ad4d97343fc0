//! CLI smoke tests

mod common;

use assert_cmd::Command;
use common::{create_project, write_file};
use predicates::prelude::*;

fn distkit() -> Command {
    Command::cargo_bin("distkit").unwrap()
}

#[test]
fn test_no_subcommand_prints_help() {
    distkit()
        .current_dir(std::env::temp_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("build"));
}

#[test]
fn test_build_fails_without_manifest() {
    let empty = tempfile::TempDir::new().unwrap();
    distkit()
        .current_dir(empty.path())
        .args(["build", "--source"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("manifest"));
}

#[test]
fn test_source_build_succeeds() {
    let project = create_project();
    distkit()
        .current_dir(project.path())
        .args(["-q", "build", "--source"])
        .assert()
        .success();

    assert!(project.path().join("build/infusion-all.js").exists());
    assert!(project
        .path()
        .join("products/infusion-all-1.2.3.zip")
        .exists());
}

#[test]
fn test_custom_build_with_unknown_module_fails() {
    let project = create_project();
    distkit()
        .current_dir(project.path())
        .args(["build", "custom", "--source", "--include", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown module"));
}

#[test]
fn test_invalid_target_is_rejected() {
    let project = create_project();
    distkit()
        .current_dir(project.path())
        .args(["build", "dev"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown build target"));
}

#[test]
fn test_lint_runs_configured_commands() {
    let project = create_project();
    write_file(
        project.path(),
        "distkit.yml",
        "name: infusion\nversion: 1.2.3\nlint:\n  - \"true\"\n",
    );

    distkit()
        .current_dir(project.path())
        .arg("lint")
        .assert()
        .success();
}

#[test]
fn test_lint_without_commands_fails() {
    let project = create_project();
    distkit()
        .current_dir(project.path())
        .arg("lint")
        .assert()
        .failure()
        .stderr(predicate::str::contains("lint"));
}

#[test]
fn test_tests_subcommand_propagates_failure() {
    let project = create_project();
    write_file(
        project.path(),
        "distkit.yml",
        "name: infusion\nversion: 1.2.3\ntests: \"false\"\n",
    );

    distkit()
        .current_dir(project.path())
        .arg("tests")
        .assert()
        .failure();
}
