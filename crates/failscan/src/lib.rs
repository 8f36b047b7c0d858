// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! failscan library
//!
//! This module exports the CLI configuration and report rendering for use in
//! integration tests and as a library.

pub mod config;
pub mod report;

pub use config::{Config, ConfigError};
pub use report::{ReportError, ReportGenerator};

use anyhow::Context;
use failscan_parser::{ParseResult, parse_file};
use tracing::info;

/// Parse the configured log and write both reports
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the log cannot be read,
/// or a report cannot be written.
pub fn run(config: &Config) -> anyhow::Result<ParseResult> {
    config.validate()?;

    if !config.no_console {
        println!("Parsing {}...", config.log.display());
    }
    let result = parse_file(&config.log)
        .with_context(|| format!("Failed to parse {}", config.log.display()))?;
    info!(
        lines = result.stats.total_lines,
        failures = result.stats.actual_failures,
        "Log parsed"
    );

    ReportGenerator::new(&result)
        .console(!config.no_console)
        .generate(&config.output)?;

    if !config.no_console {
        println!("Next steps:");
        println!("  1. Review the error inventory: {}", config.output.display());
        println!("  2. Prioritize errors by category (Unit → System → Integration → UI → Utils)");
        println!("  3. Fix the failures in the most affected files first");
    }
    Ok(result)
}
