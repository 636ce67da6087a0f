//! Shared setup for CLI integration tests.
#![allow(dead_code)]

use assert_cmd::Command;
use mcplens_testing::TestWorld;
use serde_json::Value;
use std::path::PathBuf;

/// A run tree plus an isolated data directory for config lookup
pub struct CliFixture {
    pub world: TestWorld,
    data_dir: PathBuf,
}

impl Default for CliFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl CliFixture {
    pub fn new() -> Self {
        let world = TestWorld::new();
        let data_dir = world.root().join(".mcplens");
        Self { world, data_dir }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("mcplens");
        cmd.env("MCPLENS_PATH", &self.data_dir)
            .env_remove("RUST_LOG")
            .arg("--compact");
        cmd
    }

    /// Run the command, assert success and parse stdout as JSON
    pub fn json(&self, cmd: &mut Command) -> Value {
        let output = cmd.output().expect("Failed to run mcplens");
        assert!(
            output.status.success(),
            "mcplens failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
    }
}
