// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! failscan-parser: Failure extraction from test runner logs
//!
//! This library crate scans free-form Jest-style test runner output and
//! separates genuine test failures from incidental noise such as console
//! output and React act() warnings.
//!
//! # Example
//!
//! ```no_run
//! use failscan_parser::{LogParser, parse_file};
//!
//! // Parse a complete log file
//! let result = parse_file("test-results/test_results.log").unwrap();
//! println!("{} failures", result.stats.actual_failures);
//!
//! // Or feed lines incrementally
//! let mut parser = LogParser::new();
//! parser.process_line("FAIL tests/unit/foo.test.js");
//! let result = parser.finish();
//! ```

pub mod error;
pub mod parser;
pub mod patterns;
pub mod record;

pub use error::ParseError;
pub use parser::{LogParser, parse_file, parse_reader, parse_str};
pub use record::{Category, ErrorKind, FailureRecord, ParseResult, Stats};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::ParseError;
    pub use crate::parser::{LogParser, parse_file, parse_str};
    pub use crate::record::{Category, ErrorKind, FailureRecord, ParseResult};
}
