//! End-to-end runs of the `songdupe` binary, checking exit codes and
//! which stream each kind of output lands on.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn songdupe(args: &[&str], config_dir: &Path) -> Output {
    let empty_config = config_dir.join("empty.toml");
    fs::write(&empty_config, "").unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_songdupe"));
    cmd.args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SONGDUPE_ROOT")
        .env_remove("SONGDUPE_THREADS")
        .env_remove("SONGDUPE_EXTENSIONS");
    if args.first() == Some(&"scan") {
        cmd.args(["--config", empty_config.to_str().unwrap()]);
    }
    cmd.output().unwrap()
}

#[test]
fn test_cli_duplicates_exit_zero() {
    let music = tempdir().unwrap();
    fs::write(music.path().join("a.mp3"), b"xxxxxxxxxx").unwrap();
    fs::write(music.path().join("b.mp3"), b"xxxxxxxxxx").unwrap();

    let output = songdupe(&["scan", music.path().to_str().unwrap(), "-q"], music.path());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Duplicate group #1 (2 files"));
    assert!(stdout.contains("a.mp3"));
}

#[test]
fn test_cli_no_duplicates_exit_two() {
    let music = tempdir().unwrap();
    fs::write(music.path().join("a.mp3"), b"only one").unwrap();

    let output = songdupe(&["scan", music.path().to_str().unwrap(), "-q"], music.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stdout).contains("No duplicate music files found."));
}

#[test]
fn test_cli_notices_on_stdout_for_text() {
    let music = tempdir().unwrap();
    fs::write(music.path().join("a.ogg"), b"1234").unwrap();
    fs::write(music.path().join("b.ogg"), b"1234").unwrap();

    let output = songdupe(&["scan", music.path().to_str().unwrap()], music.path());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let found = stdout.find("Found 2 music file(s)").unwrap();
    let groups = stdout
        .find("Found 1 group(s) of same-size files")
        .unwrap();
    let hashing = stdout.find("Hashing 2 files of size").unwrap();
    let report = stdout.find("Duplicate group #1").unwrap();
    assert!(found < groups && groups < hashing && hashing < report);
}

#[test]
fn test_cli_stage_notices_not_repeated_on_stderr() {
    let music = tempdir().unwrap();
    fs::write(music.path().join("a.ogg"), b"1234").unwrap();
    fs::write(music.path().join("b.ogg"), b"1234").unwrap();

    let output = songdupe(&["scan", music.path().to_str().unwrap()], music.path());
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0));
    assert!(!stderr.contains("music files"), "stderr: {stderr}");
    assert!(!stderr.contains("size groups"), "stderr: {stderr}");
    assert!(!stderr.contains("Scan complete"), "stderr: {stderr}");
}

#[test]
fn test_cli_json_keeps_stdout_clean() {
    let music = tempdir().unwrap();
    fs::write(music.path().join("a.wav"), b"pcm").unwrap();
    fs::write(music.path().join("b.wav"), b"pcm").unwrap();

    let output = songdupe(
        &["scan", music.path().to_str().unwrap(), "--output", "json"],
        music.path(),
    );

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["duplicate_groups"], 1);
    assert_eq!(value["duplicates"][0]["files"].as_array().unwrap().len(), 2);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Found 2 music file(s)"));
}

#[test]
fn test_cli_missing_root_json_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("MUSIC");

    let output = songdupe(
        &["scan", missing.to_str().unwrap(), "-q", "--json-errors"],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["code"], "SD001");
    assert!(value["message"].as_str().unwrap().contains("Failed to scan"));
}

#[test]
fn test_cli_usage_error_exits_one() {
    let music = tempdir().unwrap();

    let output = songdupe(
        &["scan", music.path().to_str().unwrap(), "--chunk-size", "lots"],
        music.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());

    let output = songdupe(&["scan", "--no-such-flag"], music.path());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_help_exits_zero() {
    let dir = tempdir().unwrap();

    let output = songdupe(&["--help"], dir.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("scan"));
}
