//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating isolated test environments
//! - Placing the sample card database and a config file
//! - Executing CLI commands with proper context

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::write_sample_cards;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use thronescli_testing::TestWorld;
///
/// let world = TestWorld::new();
///
/// let result = world.run(&["--trait", "Recruit"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    cards_file: PathBuf,
    config_file: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment with the sample cards in place.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_path = temp_dir.path().to_path_buf();
        let cards_file = base_path.join("cards.jsonl");
        let config_file = base_path.join("config.toml");

        write_sample_cards(&cards_file).expect("Failed to write sample cards");

        Self {
            temp_dir,
            cards_file,
            config_file,
            env_vars: HashMap::new(),
        }
    }

    /// Get the card database path handed to the CLI.
    pub fn cards_file(&self) -> &Path {
        &self.cards_file
    }

    /// Get the config file path handed to the CLI.
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write `content` as the CLI's config file.
    pub fn with_config(self, content: &str) -> Self {
        std::fs::write(&self.config_file, content).expect("Failed to write config");
        self
    }

    /// Remove the card database, so the CLI has to download one.
    pub fn without_cards(self) -> Self {
        let _ = std::fs::remove_file(&self.cards_file);
        self
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.env("THRONESCLI_DATA", &self.cards_file)
            .env("THRONESCLI_CONFIG", &self.config_file)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");

        cmd.current_dir(self.temp_dir.path());

        // Apply environment variables
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute a command using the project's binary and return the result.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built and the `CARGO_BIN_EXE_` environment variable to be set (which
    /// cargo test does automatically).
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("thronescli")
            .map_err(|e| anyhow::anyhow!("Failed to find thronescli binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// The process exit code, if it exited normally.
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Names printed by a `--name-only` run, without the summary.
    pub fn names(&self) -> Vec<&str> {
        self.stdout
            .lines()
            .take_while(|line| !line.is_empty())
            .collect()
    }
}
