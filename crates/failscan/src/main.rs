// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! failscan: error inventory reports from test runner logs
//!
//! Reads a Jest-style log, separates genuine failures from console noise and
//! act() warnings, and writes Markdown and JSON reports.

use clap::Parser;
use tracing::debug;

use failscan::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the summary
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!(?config, "Starting failscan");
    failscan::run(&config)?;
    Ok(())
}
