use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn trk_cmd() -> Command {
    let mut cmd = Command::cargo_bin("trk").unwrap();
    cmd.env_remove("TRK_CONFIG");
    cmd.env_remove("TRK_LOG");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write a timesheet into a fresh temp directory
pub fn timesheet(content: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hours.txt");
    fs::write(&path, content).unwrap();
    (temp, path)
}
