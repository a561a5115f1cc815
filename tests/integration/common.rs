//! Common utilities for integration tests

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};

/// Isolated project directory for one test
pub struct TestContext {
    pub temp: TempDir,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    /// Create a Command for running lerna-changelog inside the project
    ///
    /// `GITHUB_AUTH` is cleared so tests never pick up a developer token.
    pub fn changelog(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("lerna-changelog").unwrap();
        cmd.current_dir(self.temp.path());
        cmd.env_remove("GITHUB_AUTH");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Write a manifest file (package.json, lerna.json) into the project
    pub fn write_manifest(&self, name: &str, value: serde_json::Value) {
        self.temp
            .child(name)
            .write_str(&serde_json::to_string_pretty(&value).unwrap())
            .unwrap();
    }
}
