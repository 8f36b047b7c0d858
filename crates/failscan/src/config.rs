// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the failscan CLI
//!
//! This module provides the command-line configuration: which log to read,
//! where the reports go, and logging options.

use std::path::{Path, PathBuf};

use clap::Parser;

/// Default log location, relative to the project root
pub const DEFAULT_LOG: &str = "test-results/test_results.log";

/// Default Markdown report location, relative to the project root
pub const DEFAULT_OUTPUT: &str = "test-results/error-inventory.md";

/// failscan - Error inventory from test runner logs
#[derive(Parser, Debug, Clone)]
#[command(name = "failscan")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Test runner log to parse
    #[arg(value_name = "LOG", env = "FAILSCAN_LOG", default_value = DEFAULT_LOG)]
    pub log: PathBuf,

    /// Path of the Markdown report
    ///
    /// The JSON report is written next to it with the extension replaced
    /// by `.json`. The parent directory must already exist.
    #[arg(short, long, env = "FAILSCAN_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with the summary.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Do not print the summary to stdout
    ///
    /// The Markdown and JSON reports are still written.
    #[arg(long, default_value = "false")]
    pub no_console: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: PathBuf::from(DEFAULT_LOG),
            output: PathBuf::from(DEFAULT_OUTPUT),
            verbose: false,
            quiet: false,
            no_console: false,
        }
    }
}

/// Path of the JSON report that accompanies a Markdown report
#[must_use]
pub fn json_path_for(markdown: &Path) -> PathBuf {
    markdown.with_extension("json")
}

impl Config {
    /// Get the JSON report path
    #[must_use]
    pub fn json_output_path(&self) -> PathBuf {
        json_path_for(&self.output)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The log file doesn't exist or isn't a file
    /// - The output's parent directory doesn't exist
    /// - The output already ends in `.json` and would be overwritten by the JSON report
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.log.exists() {
            return Err(ConfigError::LogNotFound(self.log.clone()));
        }
        if !self.log.is_file() {
            return Err(ConfigError::LogNotFile(self.log.clone()));
        }

        // Reports are never written into directories we had to create
        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(ConfigError::OutputDirectoryMissing(parent.to_path_buf()));
            }
        }

        if self.json_output_path() == self.output {
            return Err(ConfigError::OutputCollision(self.output.clone()));
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Log file not found
    #[error("Log file not found: {0}")]
    LogNotFound(PathBuf),

    /// Log path is not a regular file
    #[error("Log path is not a file: {0}")]
    LogNotFile(PathBuf),

    /// Output directory does not exist
    #[error("Output directory does not exist: {0}")]
    OutputDirectoryMissing(PathBuf),

    /// Markdown and JSON reports would share a path
    #[error("Output path {0} would be overwritten by the JSON report; use a .md path")]
    OutputCollision(PathBuf),
}
