#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn memoir_cmd() -> Command {
    let mut cmd = Command::cargo_bin("memoir").unwrap();
    cmd.env_remove("MEMOIR_ROOT");
    cmd.env_remove("MEMOIR_LOG");
    cmd.env_remove("EDITOR");
    cmd.env_remove("VISUAL");
    cmd
}

/// `memoir init` in `dir`, asserting success
pub fn init_memoir(dir: &Path) {
    memoir_cmd().arg("init").arg(dir).assert().success();
}

/// Run `memoir` in `dir` with `args` and return the id printed by a
/// "Created ..." line
pub fn create(dir: &Path, args: &[&str]) -> String {
    let output = memoir_cmd().current_dir(dir).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .trim()
        .rsplit(' ')
        .next()
        .expect("id in output")
        .to_string()
}

pub fn new_entry(dir: &Path, title: &str, extra: &[&str]) -> String {
    let mut args = vec!["new", "--title", title];
    args.extend_from_slice(extra);
    create(dir, &args)
}

pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = memoir_cmd().current_dir(dir).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}
