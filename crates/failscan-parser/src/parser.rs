// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test log parsing
//!
//! This module scans a Jest-style test runner log line by line and extracts
//! the genuine failures, filtering out console output and React act() warnings.
//!
//! # Example
//!
//! ```
//! use failscan_parser::parser::parse_str;
//!
//! let log = "FAIL tests/unit/foo.test.js\n\
//!            ● Foo › does the thing\n\
//!            TypeError: x is not a function\n\
//!                at Object.<anonymous> (foo.test.js:10:5)\n\
//!            PASS tests/unit/bar.test.js\n";
//! let result = parse_str(log);
//! assert_eq!(result.stats.actual_failures, 1);
//! assert_eq!(result.test_failures[0].test_name, "Foo › does the thing");
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::patterns::{self, SummaryKind};
use crate::record::{Category, FailureRecord, MAX_STACK_TRACE, ParseResult, UNKNOWN_TEST_NAME};

/// Lines of the failure currently being read
#[derive(Debug, Default)]
struct ErrorBlock {
    lines: Vec<String>,
}

impl ErrorBlock {
    fn push(&mut self, line: &str) {
        self.lines.push(line.trim().to_string());
    }

    /// A block made only of `FAIL tests/...` banners carries no error text
    fn is_banner_only(&self) -> bool {
        self.lines.iter().all(|line| patterns::is_suite_banner(line))
    }
}

/// An incremental parser for test runner logs
///
/// Feed lines in log order with [`LogParser::process_line`] and call
/// [`LogParser::finish`] once the log is exhausted.
#[derive(Debug)]
pub struct LogParser {
    result: ParseResult,
    current_test_file: Option<String>,
    current_test_name: Option<String>,
    block: Option<ErrorBlock>,
}

impl LogParser {
    /// Create a new parser
    #[must_use]
    pub fn new() -> Self {
        Self {
            result: ParseResult::empty(),
            current_test_file: None,
            current_test_name: None,
            block: None,
        }
    }

    /// Process a single line of the log
    ///
    /// A trailing line terminator is ignored. Returns the failure record when
    /// this line closed an error block that produced one.
    pub fn process_line(&mut self, line: &str) -> Option<&FailureRecord> {
        let line = line.trim_end_matches(['\n', '\r']);
        let stats = &mut self.result.stats;
        stats.total_lines += 1;
        let line_number = stats.total_lines;

        if patterns::is_console_output(line) {
            stats.console_warnings += 1;
            return None;
        }
        if patterns::is_act_warning(line) {
            stats.act_warnings += 1;
            return None;
        }

        let failure = patterns::failure_indicator(line);

        // A block is closed with the context in effect before this line, so
        // a `PASS <file>` line ending the block does not claim its failure.
        let mut recorded = false;
        if failure.is_none() && self.block.is_some() {
            if patterns::is_continuation(line) {
                if let Some(block) = self.block.as_mut() {
                    block.push(line);
                }
            } else {
                recorded = self.close_block(line_number);
            }
        }

        if let Some(test_file) = patterns::extract_test_file(line) {
            self.current_test_file = Some(test_file.to_string());
        }
        if let Some(test_name) = patterns::extract_test_name(line) {
            self.current_test_name = Some(test_name);
        }

        if let Some(pattern) = failure {
            match self.block.as_mut() {
                Some(block) => block.push(line),
                None => {
                    debug!(line = line_number, pattern = pattern.label, "Error block opened");
                    let mut block = ErrorBlock::default();
                    block.push(line);
                    self.block = Some(block);
                    if let Some(kind) = patterns::extract_error_kind(line) {
                        *self.result.error_types.entry(kind).or_insert(0) += 1;
                    }
                }
            }
        }

        self.scan_summary(line);

        if recorded {
            self.result.test_failures.last()
        } else {
            None
        }
    }

    /// Turn the open error block into a record; returns whether one was made
    fn close_block(&mut self, line_number: usize) -> bool {
        let Some(block) = self.block.take() else {
            return false;
        };

        if block.is_banner_only() {
            debug!(line = line_number, "Discarding suite banner without error lines");
            return false;
        }
        let Some(test_file) = self.current_test_file.clone() else {
            debug!(line = line_number, "Discarding error block with no test file");
            return false;
        };

        let mut lines = block.lines;
        lines.truncate(MAX_STACK_TRACE);
        let record = FailureRecord {
            error_message: lines.first().cloned().unwrap_or_default(),
            test_name: self
                .current_test_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_TEST_NAME.to_string()),
            stack_trace: lines,
            line_number,
            test_file,
        };
        debug!(
            line = line_number,
            file = %record.test_file,
            test = %record.test_name,
            "Failure recorded"
        );

        if let Some(category) = Category::from_test_file(&record.test_file) {
            self.result
                .categories
                .entry(category)
                .or_default()
                .push(record.clone());
        }
        self.result.test_failures.push(record);
        self.result.stats.actual_failures += 1;
        true
    }

    fn scan_summary(&mut self, line: &str) {
        for kind in SummaryKind::ALL {
            if !kind.matches(line) {
                continue;
            }
            let counts = patterns::summary_counts(line);
            let stats = &mut self.result.stats;
            let (failed, passed) = match kind {
                SummaryKind::Suites => {
                    (&mut stats.test_suites_failed, &mut stats.test_suites_passed)
                }
                SummaryKind::Tests => (&mut stats.tests_failed, &mut stats.tests_passed),
            };
            if let Some(n) = counts.failed {
                *failed = n;
            }
            if let Some(n) = counts.passed {
                *passed = n;
            }
        }
    }

    /// Failures recorded so far
    #[must_use]
    pub fn failures(&self) -> &[FailureRecord] {
        &self.result.test_failures
    }

    /// Finalize and return the result
    ///
    /// An error block still open at the end of the log is dropped, not
    /// flushed. The drop is logged at warn level.
    #[must_use]
    pub fn finish(self) -> ParseResult {
        if let Some(block) = &self.block {
            warn!(
                lines = block.lines.len(),
                first = %block.lines.first().map(String::as_str).unwrap_or_default(),
                "Dropping error block still open at end of log"
            );
        }
        ParseResult {
            timestamp: Utc::now(),
            ..self.result
        }
    }
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a log from any buffered reader
///
/// Invalid UTF-8 is replaced with U+FFFD so no line is lost to encoding.
///
/// # Errors
///
/// Returns `ParseError::Io` if reading fails.
pub fn parse_reader<R: BufRead>(mut reader: R) -> Result<ParseResult, ParseError> {
    let mut parser = LogParser::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        parser.process_line(&String::from_utf8_lossy(&buf));
    }
    Ok(parser.finish())
}

/// Parse a log file
///
/// # Errors
///
/// Returns `ParseError::Open` if the file cannot be opened and
/// `ParseError::Io` if reading it fails.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParseResult, ParseError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ParseError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Parsing log file");
    parse_reader(BufReader::new(file))
}

/// Parse a log held in memory
#[must_use]
pub fn parse_str(log: &str) -> ParseResult {
    let mut parser = LogParser::new();
    for line in log.lines() {
        parser.process_line(line);
    }
    parser.finish()
}
