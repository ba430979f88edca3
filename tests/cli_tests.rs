//! CLI integration tests

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn audio_shelf_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_audio-shelf"));
    cmd.env("NO_COLOR", "1").env_remove("AUDIO_SHELF_LIBRARY");
    cmd
}

/// Run against a library directory and snapshot file inside `root`
fn run_in(root: &Path, args: &[&str]) -> Output {
    audio_shelf_bin()
        .arg("--library")
        .arg(root.join("rec"))
        .arg("--data")
        .arg(root.join("library.json"))
        .arg("--config-file")
        .arg(root.join("config.toml"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn library_with(names: &[&str]) -> TempDir {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join("rec")).unwrap();
    for name in names {
        fs::write(root.path().join("rec").join(name), b"").unwrap();
    }
    root
}

#[test]
fn help_output() {
    let output = audio_shelf_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("recordings"));
    assert!(stdout.contains("--library"));
    assert!(stdout.contains("--data"));
    assert!(stdout.contains("search"));
    assert!(stdout.contains("group"));
    assert!(stdout.contains("mark"));
}

#[test]
fn version_output() {
    let output = audio_shelf_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("audio-shelf"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let root = TempDir::new().unwrap();
    let output = audio_shelf_bin()
        .env("XDG_CONFIG_HOME", root.path())
        .env("HOME", root.path())
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("audio-shelf"));
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_help() {
    let output = audio_shelf_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn config_set_then_get() {
    let root = TempDir::new().unwrap();

    let output = run_in(root.path(), &["config", "set", "search_threshold", "50"]);
    assert!(output.status.success());

    let output = run_in(root.path(), &["config", "get", "search_threshold"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "50");
}

#[test]
fn list_empty_library() {
    let root = library_with(&[]);
    let output = run_in(root.path(), &["list"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No recordings"));
}

#[test]
fn list_shows_audio_files_only() {
    let root = library_with(&["standup.m4a", "notes.txt", "interview.mp3"]);
    let output = run_in(root.path(), &["list"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("standup"));
    assert!(stdout.contains("interview"));
    assert!(!stdout.contains("notes"));
}

#[test]
fn tag_then_list_shows_tag() {
    let root = library_with(&["standup.m4a"]);

    let output = run_in(root.path(), &["tag", "add", "work", "standup"]);
    assert!(output.status.success());

    let output = run_in(root.path(), &["list"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("#work"));
    assert!(root.path().join("library.json").exists());
}

#[test]
fn mark_add_and_list() {
    let root = library_with(&["standup.m4a"]);

    let output = run_in(
        root.path(),
        &["mark", "add", "standup", "1:30", "Decision", "-d", "ship it"],
    );
    assert!(output.status.success());

    let output = run_in(root.path(), &["mark", "list", "standup"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1:30"));
    assert!(stdout.contains("Decision"));
    assert!(stdout.contains("ship it"));
}
