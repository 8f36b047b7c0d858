// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Failure record types

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of error-block lines kept in a record's stack trace
pub const MAX_STACK_TRACE: usize = 20;

/// Test name used when no `●` heading was seen before the failure
pub const UNKNOWN_TEST_NAME: &str = "Unknown";

/// Test suite grouping inferred from a path segment of the test file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// `tests/unit/`
    Unit,
    /// `tests/system/`
    System,
    /// `tests/integration/`
    Integration,
    /// `tests/ui/`
    Ui,
    /// `tests/utils/`
    Utils,
}

impl Category {
    /// All categories in report order
    pub const ALL: [Category; 5] = [
        Category::Unit,
        Category::System,
        Category::Integration,
        Category::Ui,
        Category::Utils,
    ];

    /// Lowercase name, as used for JSON keys
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Unit => "unit",
            Category::System => "system",
            Category::Integration => "integration",
            Category::Ui => "ui",
            Category::Utils => "utils",
        }
    }

    /// Path segment that marks a test file as belonging to this category
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Category::Unit => "/unit/",
            Category::System => "/system/",
            Category::Integration => "/integration/",
            Category::Ui => "/ui/",
            Category::Utils => "/utils/",
        }
    }

    /// Categorize a test file path
    ///
    /// Markers are checked in [`Category::ALL`] order and the first one found
    /// anywhere in the path wins, so `tests/ui/unit/a.test.js` is `Unit`.
    #[must_use]
    pub fn from_test_file(test_file: &str) -> Option<Category> {
        Self::ALL
            .into_iter()
            .find(|category| test_file.contains(category.marker()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JavaScript error kinds counted when an error block opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// `AssertionError:`
    AssertionError,
    /// `TypeError:`
    TypeError,
    /// `ReferenceError:`
    ReferenceError,
    /// `SyntaxError:`
    SyntaxError,
    /// `RangeError:`
    RangeError,
}

impl ErrorKind {
    /// The label as it appears in logs and reports
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::AssertionError => "AssertionError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::RangeError => "RangeError",
        }
    }

    /// Look up a kind by its label
    #[must_use]
    pub fn from_label(label: &str) -> Option<ErrorKind> {
        match label {
            "AssertionError" => Some(ErrorKind::AssertionError),
            "TypeError" => Some(ErrorKind::TypeError),
            "ReferenceError" => Some(ErrorKind::ReferenceError),
            "SyntaxError" => Some(ErrorKind::SyntaxError),
            "RangeError" => Some(ErrorKind::RangeError),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A genuine test failure extracted from the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Test file the failure is attributed to
    pub test_file: String,
    /// Test name from the closest preceding `●` heading
    pub test_name: String,
    /// First line of the error block
    pub error_message: String,
    /// Error block lines, capped at [`MAX_STACK_TRACE`] entries
    pub stack_trace: Vec<String>,
    /// 1-based log line on which the error block closed
    pub line_number: usize,
}

impl FailureRecord {
    /// Category of the record's test file, if any
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        Category::from_test_file(&self.test_file)
    }
}

/// Line counters and runner summary figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Lines read from the log
    pub total_lines: usize,
    /// `console.error` / `console.warn` lines filtered out
    pub console_warnings: usize,
    /// React act() warnings filtered out
    pub act_warnings: usize,
    /// Failure records produced
    pub actual_failures: usize,
    /// From the runner's `Test Suites:` summary
    pub test_suites_failed: usize,
    /// From the runner's `Test Suites:` summary
    pub test_suites_passed: usize,
    /// From the runner's `Tests:` summary
    pub tests_failed: usize,
    /// From the runner's `Tests:` summary
    pub tests_passed: usize,
}

/// Everything extracted from one log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Counters
    pub stats: Stats,
    /// Failures grouped by category; all five keys are always present
    pub categories: BTreeMap<Category, Vec<FailureRecord>>,
    /// Occurrences of each error kind that opened an error block
    pub error_types: BTreeMap<ErrorKind, usize>,
    /// All failures in log order
    pub test_failures: Vec<FailureRecord>,
    /// When the parse finished
    pub timestamp: DateTime<Utc>,
}

impl ParseResult {
    /// Create an empty result with every category pre-initialized
    #[must_use]
    pub fn empty() -> Self {
        Self {
            stats: Stats::default(),
            categories: Category::ALL
                .into_iter()
                .map(|category| (category, Vec::new()))
                .collect(),
            error_types: BTreeMap::new(),
            test_failures: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Failures in a category
    #[must_use]
    pub fn failures_in(&self, category: Category) -> &[FailureRecord] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Error kinds sorted by descending count, ties in label order
    #[must_use]
    pub fn error_types_by_count(&self) -> Vec<(ErrorKind, usize)> {
        let mut counts: Vec<(ErrorKind, usize)> =
            self.error_types.iter().map(|(k, v)| (*k, *v)).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Failures in a category grouped by test file, files sorted alphabetically
    #[must_use]
    pub fn files_by_category(&self, category: Category) -> BTreeMap<&str, Vec<&FailureRecord>> {
        let mut by_file: BTreeMap<&str, Vec<&FailureRecord>> = BTreeMap::new();
        for record in self.failures_in(category) {
            by_file
                .entry(record.test_file.as_str())
                .or_default()
                .push(record);
        }
        by_file
    }

    /// Whether the findings equal another result's, ignoring the timestamp
    #[must_use]
    pub fn same_findings(&self, other: &ParseResult) -> bool {
        self.stats == other.stats
            && self.categories == other.categories
            && self.error_types == other.error_types
            && self.test_failures == other.test_failures
    }

    /// Check the structural invariants of a result
    ///
    /// - `actual_failures` equals the number of records
    /// - every categorized record is also in `test_failures`
    /// - every categorized record sits under the category its file maps to,
    ///   so no record can appear under two categories
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.stats.actual_failures != self.test_failures.len() {
            return false;
        }
        let categorized: usize = self.categories.values().map(Vec::len).sum();
        if categorized > self.test_failures.len() {
            return false;
        }
        self.categories.iter().all(|(category, records)| {
            records.iter().all(|record| {
                record.category() == Some(*category) && self.test_failures.contains(record)
            })
        })
    }
}
