#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

pub const BIN_NAME: &str = "finance_tracker_cli";

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh home directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Script-mode invocation of the CLI with its data isolated under `home`.
pub fn script_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("FINANCE_TRACKER_CLI_SCRIPT", "1")
        .env("FINANCE_TRACKER_HOME", home)
        .env_remove("RUST_LOG");
    cmd
}
