//! End-to-end tests for the complete scoring flow.
//!
//! Runs the `padel` binary: play → history → stats → delete.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn padel_binary() -> String {
    env!("CARGO_BIN_EXE_padel").to_string()
}

/// Writes a config file pointing the database into the temp directory.
fn write_config(temp: &Path) -> PathBuf {
    let config_path = temp.join("config.toml");
    let db_path = temp.join("data").join("padel.db");
    std::fs::write(
        &config_path,
        format!("database_path = {:?}\n", db_path.display().to_string()),
    )
    .unwrap();
    config_path
}

fn padel(temp: &Path, config: &Path) -> Command {
    let mut cmd = Command::new(padel_binary());
    cmd.env("HOME", temp)
        .env("XDG_CONFIG_HOME", temp.join(".config"))
        .env("XDG_DATA_HOME", temp.join(".local/share"))
        .env_remove("PADEL_DATABASE_PATH")
        .env_remove("PADEL_SYNC_ENDPOINT")
        .env_remove("PADEL_API_KEY")
        .arg("--config")
        .arg(config);
    cmd
}

fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn padel");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_play_history_stats_delete() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    let mut play = padel(temp.path(), &config);
    play.arg("play");
    let output = run_with_stdin(play, "a\na\na\na\nend\n");
    assert!(
        output.status.success(),
        "play failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Game Team A"), "stdout: {stdout}");
    assert!(stdout.contains("Match complete: 1-0 (Team A)"), "stdout: {stdout}");

    let stats = json_output(padel(temp.path(), &config).args(["stats", "--json"]));
    assert_eq!(stats["total_matches"], 1);
    assert_eq!(stats["total_games"], 1);

    let history = json_output(padel(temp.path(), &config).args(["history", "--json"]));
    let records = history.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["teamAGames"], 1);
    assert_eq!(records[0]["teamBGames"], 0);
    assert_eq!(records[0]["isComplete"], true);

    let output = padel(temp.path(), &config)
        .args(["delete", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats = json_output(padel(temp.path(), &config).args(["stats", "--json"]));
    assert_eq!(stats["total_matches"], 0);

    let output = padel(temp.path(), &config)
        .args(["delete", "0"])
        .output()
        .unwrap();
    assert!(!output.status.success(), "deleting from empty history should fail");
    assert!(String::from_utf8_lossy(&output.stderr).contains("no match at index 0"));
}

#[test]
fn test_quit_leaves_history_empty() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    let mut play = padel(temp.path(), &config);
    play.arg("play");
    let output = run_with_stdin(play, "b\nb\nquit\n");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Match discarded."));

    let history = json_output(padel(temp.path(), &config).args(["history", "--json"]));
    assert_eq!(history.as_array().unwrap().len(), 0);
}
