#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct BatchSummary {
    pub trials: usize,
    pub total_collisions: usize,
    pub elapsed_ms: u128,
}

pub fn binary_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ncd-aggregator"))
}

pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write fixture");
    path
}

/// Run the binary, assert success, return stdout.
pub fn run_ok(args: &[&str]) -> String {
    let output = binary_command()
        .args(args)
        .output()
        .expect("failed to run binary");
    assert!(
        output.status.success(),
        "binary failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout was not UTF-8")
}

/// Run the binary expecting failure, return stderr.
pub fn run_err(args: &[&str]) -> String {
    let output = binary_command()
        .args(args)
        .output()
        .expect("failed to run binary");
    assert!(!output.status.success(), "binary unexpectedly succeeded");
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("failed to read output")
        .lines()
        .map(str::to_string)
        .collect()
}
