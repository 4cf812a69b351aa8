//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `tabula` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct TabulaCommand {
    args: Vec<String>,
    envs: Vec<(String, PathBuf)>,
    stdin: Option<String>,
}

impl TabulaCommand {
    /// Creates a new command for the `tabula` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: Vec::new(),
            stdin: None,
        }
    }

    /// Sets the `--db` option to specify the database file.
    pub fn db(mut self, path: &Path) -> Self {
        self.args.push("--db".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Sets the `--project` option.
    pub fn project(self, project: &str) -> Self {
        self.args(["--project", project])
    }

    /// Sets an environment variable for the child process.
    pub fn env(mut self, key: &str, value: &Path) -> Self {
        self.envs.push((key.to_string(), value.to_path_buf()));
        self
    }

    /// Feeds the given text on stdin.
    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("tabula").expect("Failed to find tabula binary");
        cmd.args(&self.args);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `tree` command.
    pub fn tree(self) -> Self {
        self.args(["tree"])
    }

    /// Configures for `project ls`.
    pub fn projects(self) -> Self {
        self.args(["project", "ls"])
    }

    /// Configures for `category new`, optionally under a parent.
    pub fn new_category(self, name: &str, parent: Option<&str>) -> Self {
        let cmd = self.args(["category", "new", name]);
        match parent {
            Some(parent) => cmd.args(["--parent", parent]),
            None => cmd,
        }
    }

    /// Configures for `template new` under a parent.
    pub fn new_template(self, name: &str, parent: &str) -> Self {
        self.args(["template", "new", name, "--parent", parent])
    }

    /// Configures for `template show`.
    pub fn show(self, node: &str) -> Self {
        self.args(["template", "show", node])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for TabulaCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // TabulaCommand Basics
    // ===========================================

    #[test]
    fn command_collects_args_in_order() {
        let cmd = TabulaCommand::new()
            .db(Path::new("/tmp/t.db"))
            .project("Backend")
            .new_category("Models", Some("1"));
        assert_eq!(
            cmd.get_args(),
            &[
                "--db", "/tmp/t.db", "--project", "Backend", "category", "new", "Models",
                "--parent", "1"
            ]
        );
    }

    #[test]
    fn command_env_is_not_an_arg() {
        let cmd = TabulaCommand::new().env("HOME", Path::new("/tmp"));
        assert!(cmd.get_args().is_empty());
    }
}
