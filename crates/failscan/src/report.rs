// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report rendering
//!
//! This module turns a [`ParseResult`] into the three failscan artifacts:
//! a console summary, a Markdown error inventory and a JSON dump.
//!
//! # Example
//!
//! ```no_run
//! use failscan::report::ReportGenerator;
//! use failscan_parser::parse_file;
//! use std::path::Path;
//!
//! let result = parse_file("test-results/test_results.log").expect("parse log");
//! ReportGenerator::new(&result)
//!     .generate(Path::new("test-results/error-inventory.md"))
//!     .expect("write reports");
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::SecondsFormat;
use thiserror::Error;
use tracing::info;

use crate::config::json_path_for;
use failscan_parser::{Category, ParseResult};

/// Files listed per category in the console summary
pub const CONSOLE_FILES_PER_CATEGORY: usize = 5;

/// Errors detailed per file in the Markdown report
pub const MARKDOWN_ERRORS_PER_FILE: usize = 3;

/// Stack trace lines shown per error in the Markdown report
pub const MARKDOWN_STACK_LINES: usize = 5;

const BANNER_WIDTH: usize = 80;

// ============================================================================
// Error Types
// ============================================================================

/// Report generation errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing a report file failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Report path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing the console summary failed
    #[error("Failed to write console summary: {0}")]
    Console(#[source] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Report Generator
// ============================================================================

/// Renders and writes the reports for one parse result
#[derive(Debug, Clone, Copy)]
pub struct ReportGenerator<'a> {
    result: &'a ParseResult,
    console: bool,
}

impl<'a> ReportGenerator<'a> {
    /// Create a generator that also prints to stdout
    #[must_use]
    pub fn new(result: &'a ParseResult) -> Self {
        Self {
            result,
            console: true,
        }
    }

    /// Enable or disable console output
    #[must_use]
    pub fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Print the console summary and write the Markdown and JSON reports
    ///
    /// The JSON report goes next to `output` with its extension replaced by
    /// `.json`. Any write failure aborts; a report written before the
    /// failure is left in place.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Write` if either file cannot be written.
    pub fn generate(&self, output: &Path) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.generate_to(output, &mut out)
    }

    /// Same as [`ReportGenerator::generate`], with console text sent to `out`
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Write` if either file cannot be written and
    /// `ReportError::Console` if `out` fails.
    pub fn generate_to(&self, output: &Path, out: &mut impl Write) -> Result<(), ReportError> {
        let json_path = json_path_for(output);

        if self.console {
            let banner = "=".repeat(BANNER_WIDTH);
            write!(
                out,
                "\n{banner}\nTEST RESULTS LOG ANALYSIS\n{banner}\n\n{}",
                self.console_summary()
            )
            .map_err(ReportError::Console)?;
            writeln!(out, "\nGenerating detailed report: {}", output.display())
                .map_err(ReportError::Console)?;
        }

        self.write_markdown(output)?;
        self.write_json(&json_path)?;

        if self.console {
            let banner = "=".repeat(BANNER_WIDTH);
            write!(
                out,
                "JSON data saved: {}\n\n{banner}\nANALYSIS COMPLETE\n{banner}\n\n",
                json_path.display()
            )
            .map_err(ReportError::Console)?;
        }
        Ok(())
    }

    /// Render the statistics, error types and category breakdown
    #[must_use]
    pub fn console_summary(&self) -> String {
        let stats = &self.result.stats;
        let mut out = String::from("STATISTICS:\n");

        out.push_str(&format!("  Total log lines: {}\n", thousands(stats.total_lines)));
        out.push_str(&format!(
            "  Console warnings (filtered): {}\n",
            thousands(stats.console_warnings)
        ));
        out.push_str(&format!(
            "  React act() warnings (filtered): {}\n",
            thousands(stats.act_warnings)
        ));
        out.push_str(&format!("  Actual test failures found: {}\n", stats.actual_failures));
        out.push_str(&format!("  Test suites failed: {}\n", stats.test_suites_failed));
        out.push_str(&format!("  Test suites passed: {}\n", stats.test_suites_passed));
        out.push_str(&format!("  Tests failed: {}\n", stats.tests_failed));
        out.push_str(&format!("  Tests passed: {}\n", stats.tests_passed));

        out.push_str("\nERROR TYPES:\n");
        for (kind, count) in self.result.error_types_by_count() {
            out.push_str(&format!("  {kind}: {count}\n"));
        }

        out.push_str("\nERRORS BY CATEGORY:\n");
        for category in Category::ALL {
            let errors = self.result.failures_in(category);
            if errors.is_empty() {
                continue;
            }
            let by_file = self.result.files_by_category(category);
            out.push_str(&format!("  {}: {} errors\n", heading(category), errors.len()));
            out.push_str(&format!("    Affected files: {}\n", by_file.len()));
            for (test_file, records) in by_file.iter().take(CONSOLE_FILES_PER_CATEGORY) {
                out.push_str(&format!("      - {test_file}: {} error(s)\n", records.len()));
            }
            if by_file.len() > CONSOLE_FILES_PER_CATEGORY {
                out.push_str(&format!(
                    "      ... and {} more files\n",
                    by_file.len() - CONSOLE_FILES_PER_CATEGORY
                ));
            }
        }

        out
    }

    /// Render the Markdown error inventory
    #[must_use]
    pub fn markdown(&self) -> String {
        let result = self.result;
        let stats = &result.stats;
        let mut md = String::from("# Test Results Error Inventory\n\n");

        md.push_str(&format!(
            "Generated: {}\n\n",
            result.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));

        md.push_str("## Summary\n\n");
        md.push_str(&format!("- **Total actual failures**: {}\n", stats.actual_failures));
        md.push_str(&format!(
            "- **Console warnings (filtered)**: {}\n",
            thousands(stats.console_warnings)
        ));
        md.push_str(&format!(
            "- **React act() warnings (filtered)**: {}\n",
            thousands(stats.act_warnings)
        ));
        md.push_str(&format!("- **Test suites failed**: {}\n", stats.test_suites_failed));
        md.push_str(&format!("- **Tests failed**: {}\n\n", stats.tests_failed));

        md.push_str("## Error Types\n\n");
        for (kind, count) in result.error_types_by_count() {
            md.push_str(&format!("- **{kind}**: {count}\n"));
        }
        md.push('\n');

        for category in Category::ALL {
            let errors = result.failures_in(category);
            if errors.is_empty() {
                continue;
            }
            md.push_str(&format!("## {} Test Errors ({})\n\n", heading(category), errors.len()));

            for (test_file, records) in result.files_by_category(category) {
                md.push_str(&format!("### {test_file} ({} error(s))\n\n", records.len()));

                for (i, record) in records.iter().take(MARKDOWN_ERRORS_PER_FILE).enumerate() {
                    md.push_str(&format!("#### Error {}: {}\n\n", i + 1, record.test_name));
                    md.push_str("**Error Message:**\n");
                    push_code_block(&mut md, &[record.error_message.as_str()]);

                    if record.stack_trace.len() > 1 {
                        md.push_str(&format!(
                            "**Stack Trace (first {MARKDOWN_STACK_LINES} lines):**\n"
                        ));
                        let trace: Vec<&str> = record
                            .stack_trace
                            .iter()
                            .skip(1)
                            .take(MARKDOWN_STACK_LINES)
                            .map(String::as_str)
                            .collect();
                        push_code_block(&mut md, &trace);
                    }
                }

                if records.len() > MARKDOWN_ERRORS_PER_FILE {
                    md.push_str(&format!(
                        "*... and {} more errors in this file*\n\n",
                        records.len() - MARKDOWN_ERRORS_PER_FILE
                    ));
                }
            }
        }

        md
    }

    /// Render the parse result as indented JSON
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Json` if serialization fails.
    pub fn json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self.result)?)
    }

    /// Write the Markdown report
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Write` if the file cannot be written.
    pub fn write_markdown(&self, path: &Path) -> Result<(), ReportError> {
        write_report(path, &self.markdown())?;
        info!(path = %path.display(), "Markdown report written");
        Ok(())
    }

    /// Write the JSON report
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Json` if serialization fails and
    /// `ReportError::Write` if the file cannot be written.
    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        write_report(path, &self.json()?)?;
        info!(path = %path.display(), "JSON report written");
        Ok(())
    }
}

fn write_report(path: &Path, contents: &str) -> Result<(), ReportError> {
    std::fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn heading(category: Category) -> String {
    category.as_str().to_uppercase()
}

/// Append a fenced code block, followed by a blank line
///
/// The fence is one backtick longer than the longest backtick run in the
/// content, and never shorter than three.
fn push_code_block(md: &mut String, lines: &[&str]) {
    let longest_run = lines
        .iter()
        .flat_map(|line| line.split(|c| c != '`'))
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat((longest_run + 1).max(3));

    md.push_str(&fence);
    md.push('\n');
    for line in lines {
        md.push_str(line);
        md.push('\n');
    }
    md.push_str(&fence);
    md.push_str("\n\n");
}

/// Format a count with `,` thousands separators
#[must_use]
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use failscan_parser::parse_str;
    use similar_asserts::assert_eq;

    const LOG: &str = "FAIL tests/unit/foo.test.js
● Foo › does the thing
TypeError: x is not a function
    at Object.<anonymous> (foo.test.js:10:5)
PASS tests/unit/bar.test.js
";

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_console_summary() {
        let result = parse_str(LOG);
        let summary = ReportGenerator::new(&result).console_summary();

        assert!(summary.contains("  Total log lines: 5\n"));
        assert!(summary.contains("  Actual test failures found: 1\n"));
        assert!(summary.contains("ERROR TYPES:\n  TypeError: 1\n"));
        assert!(summary.contains("  UNIT: 1 errors\n    Affected files: 1\n"));
        assert!(summary.contains("      - tests/unit/foo.test.js: 1 error(s)\n"));
        assert!(!summary.contains("SYSTEM"));
    }

    #[test]
    fn test_markdown_sections() {
        let result = parse_str(LOG);
        let md = ReportGenerator::new(&result).markdown();

        assert!(md.starts_with("# Test Results Error Inventory\n\nGenerated: "));
        assert!(md.contains("## Summary\n\n- **Total actual failures**: 1\n"));
        assert!(md.contains("## Error Types\n\n- **TypeError**: 1\n"));
        assert!(md.contains("## UNIT Test Errors (1)\n"));
        assert!(md.contains("### tests/unit/foo.test.js (1 error(s))\n"));
        assert!(md.contains("#### Error 1: Foo › does the thing\n"));
        assert!(md.contains("```\nTypeError: x is not a function\n```\n"));
        assert!(md.contains(
            "**Stack Trace (first 5 lines):**\n```\nat Object.<anonymous> (foo.test.js:10:5)\n```\n"
        ));
    }

    #[test]
    fn test_code_block_fence_outgrows_backticks() {
        let log = "FAIL tests/unit/snap.test.js
● Snap › matches
Error: expected ```html``` but got ````text````
    at Object.<anonymous> (snap.test.js:3:1)

";
        let result = parse_str(log);
        let md = ReportGenerator::new(&result).markdown();

        assert!(md.contains(
            "`````\nError: expected ```html``` but got ````text````\n`````\n\n"
        ));
        assert!(md.contains(
            "**Stack Trace (first 5 lines):**\n```\nat Object.<anonymous> (snap.test.js:3:1)\n```\n\n"
        ));
    }

    #[test]
    fn test_code_block_plain_content() {
        let mut md = String::new();
        push_code_block(&mut md, &["one", "two"]);
        assert_eq!(md, "```\none\ntwo\n```\n\n");

        let mut md = String::new();
        push_code_block(&mut md, &[]);
        assert_eq!(md, "```\n```\n\n");
    }

    #[test]
    fn test_json_is_pretty() {
        let result = parse_str(LOG);
        let json = ReportGenerator::new(&result).json().expect("Should serialize");
        assert!(json.starts_with("{\n  \"stats\": {"));
        let restored: ParseResult = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(restored, result);
    }
}
