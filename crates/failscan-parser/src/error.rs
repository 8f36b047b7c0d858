// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for failscan-parser

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a test log
#[derive(Debug, Error)]
pub enum ParseError {
    /// The log file could not be opened
    #[error("Failed to open log {}: {source}", path.display())]
    Open {
        /// Path of the log file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Error reading from the log source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
