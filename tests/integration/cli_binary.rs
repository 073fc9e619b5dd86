//! Integration tests that run the dirtrack binary

use crate::integration::make_dir;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn dirtrack(config_home: &Path, args: &[&str]) -> Output {
    let home = config_home.join("home");
    fs::create_dir_all(&home).unwrap();
    Command::new(env!("CARGO_BIN_EXE_dirtrack"))
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", &home)
        .env_remove("DIRTRACK_LOG")
        .env_remove("DIRTRACK_LOG_FORMAT")
        .env_remove("DIRTRACK_LOG_OUTPUT")
        .env_remove("DIRTRACK_TRACKER__HASH_WORKERS")
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_changes_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let dir = make_dir(temp_dir.path(), "d", &[("a.txt", "hello"), ("b.txt", "world")]);
    let dir_arg = dir.to_str().unwrap();

    let first = dirtrack(temp_dir.path(), &["changes", dir_arg]);
    assert!(
        first.status.success(),
        "first scan should succeed: stderr={:?}",
        String::from_utf8_lossy(&first.stderr)
    );
    assert!(stdout(&first).contains("Now tracking"));
    assert!(temp_dir.path().join("d.json").exists());

    fs::write(dir.join("b.txt"), "earth").unwrap();
    let second = dirtrack(temp_dir.path(), &["changes", dir_arg, "--format", "json"]);
    assert!(second.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&second)).unwrap();
    assert_eq!(
        report["changed"][0],
        dir.join("b.txt").to_string_lossy().as_ref()
    );
}

#[test]
fn test_structural_mismatch_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let dir = make_dir(temp_dir.path(), "d", &[("a", "1"), ("b", "2")]);
    let dir_arg = dir.to_str().unwrap();
    assert!(dirtrack(temp_dir.path(), &["commit", dir_arg]).status.success());

    fs::write(dir.join("c"), "3").unwrap();
    fs::write(dir.join("e"), "4").unwrap();

    let output = dirtrack(temp_dir.path(), &["changes", dir_arg]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));

    assert!(dirtrack(temp_dir.path(), &["forget", dir_arg]).status.success());
    assert!(dirtrack(temp_dir.path(), &["changes", dir_arg]).status.success());
}

#[test]
fn test_missing_directory_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent");
    let output = dirtrack(temp_dir.path(), &["changes", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_verbose_logging_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let dir = make_dir(temp_dir.path(), "d", &[("a", "1")]);
    let log_path = temp_dir.path().join("logs").join("dirtrack.log");

    let output = dirtrack(
        temp_dir.path(),
        &[
            "--verbose",
            "--log-file",
            log_path.to_str().unwrap(),
            "show",
            dir.to_str().unwrap(),
        ],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("Leaves: 2"));

    let content = fs::read_to_string(&log_path).unwrap();
    assert!(
        content.contains("Tree build completed"),
        "log file should contain the build event; got: {}",
        content
    );
}

#[test]
fn test_config_command_honours_flags() {
    let temp_dir = TempDir::new().unwrap();
    let output = dirtrack(temp_dir.path(), &["--hash-workers", "6", "config"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("hash_workers = 6"));

    let rejected = dirtrack(temp_dir.path(), &["--hash-workers", "0", "config"]);
    assert_eq!(rejected.status.code(), Some(1));
}
