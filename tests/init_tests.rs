//! Integration tests for init and config commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{init_memoir, memoir_cmd};

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();

    memoir_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized memoir"));

    let config_path = temp.path().join(".memoir/config.toml");
    let content = fs::read_to_string(config_path).unwrap();
    assert!(content.contains("sort = \"newest\""));
    assert!(content.contains("limit = 20"));
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = TempDir::new().unwrap();

    init_memoir(temp.path());
    memoir_cmd().arg("init").arg(temp.path()).assert().failure();
}

#[test]
fn test_commands_outside_memoir_fail_with_code_2() {
    let temp = TempDir::new().unwrap();

    memoir_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("memoir init"));
}

#[test]
fn test_memoir_root_env_is_used() {
    let temp = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    init_memoir(temp.path());

    memoir_cmd()
        .current_dir(elsewhere.path())
        .env("MEMOIR_ROOT", temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn test_config_set_and_get_sort() {
    let temp = TempDir::new().unwrap();
    init_memoir(temp.path());

    memoir_cmd()
        .current_dir(temp.path())
        .args(["config", "sort", "a-z"])
        .assert()
        .success();

    memoir_cmd()
        .current_dir(temp.path())
        .args(["config", "sort"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a-z"));
}

#[test]
fn test_config_invalid_sort_fails_with_hint() {
    let temp = TempDir::new().unwrap();
    init_memoir(temp.path());

    memoir_cmd()
        .current_dir(temp.path())
        .args(["config", "sort", "sideways"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("newest, oldest, a-z, z-a"));
}

#[test]
fn test_config_list() {
    let temp = TempDir::new().unwrap();
    init_memoir(temp.path());

    memoir_cmd()
        .current_dir(temp.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("editor = "))
        .stdout(predicate::str::contains("sort = newest"))
        .stdout(predicate::str::contains("limit = 20"))
        .stdout(predicate::str::contains("created = "));
}

#[test]
fn test_config_created_is_read_only() {
    let temp = TempDir::new().unwrap();
    init_memoir(temp.path());

    memoir_cmd()
        .current_dir(temp.path())
        .args(["config", "created", "2020-01-01T00:00:00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("read-only"));
}
