// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Line classification patterns
//!
//! Every pattern is compiled once on first use. Lines that match nothing are
//! the normal case and never an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::ErrorKind;

/// A compiled failure indicator with a label for diagnostics
pub struct FailurePattern {
    /// Short human-readable name
    pub label: &'static str,
    regex: Regex,
}

impl FailurePattern {
    fn new(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            // All failure indicators are case-insensitive
            regex: Regex::new(&format!("(?i){pattern}")).expect("failure pattern is valid"),
        }
    }

    /// Whether the pattern occurs anywhere in the line
    #[must_use]
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

static FAILURE_PATTERNS: LazyLock<Vec<FailurePattern>> = LazyLock::new(|| {
    vec![
        FailurePattern::new("suite-fail", r"FAIL\s+tests/"),
        FailurePattern::new("cross-mark", r"✕\s+"),
        FailurePattern::new("multiplication-mark", r"×\s+"),
        FailurePattern::new("error", r"Error:"),
        FailurePattern::new("assertion-error", r"AssertionError:"),
        FailurePattern::new("type-error", r"TypeError:"),
        FailurePattern::new("reference-error", r"ReferenceError:"),
        FailurePattern::new("syntax-error", r"SyntaxError:"),
        FailurePattern::new("range-error", r"RangeError:"),
        FailurePattern::new("expected", r"Expected:"),
        FailurePattern::new("received", r"Received:"),
        FailurePattern::new("expect-call", r"expect\("),
        FailurePattern::new("thrown", r"thrown:"),
        FailurePattern::new("test-failed", r"test.*failed"),
    ]
});

static TEST_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(tests/(?:unit|system|integration|ui|utils)/\S+\.(?:test|spec)\.(?:jsx?|tsx?|cjs))",
    )
    .expect("test file pattern is valid")
});

static TEST_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"●\s+(.+?)(?:\s+›\s+(.+))?$").expect("test name pattern is valid")
});

static ERROR_KIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:Assertion|Type|Reference|Syntax|Range)Error):")
        .expect("error kind pattern is valid")
});

static SOURCE_EXCERPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*\|").expect("source excerpt pattern is valid"));

static SUITE_BANNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)FAIL\s+tests/").expect("suite banner pattern is valid"));

static SUITES_SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Test Suites:.*failed").expect("suites summary pattern is valid")
});

static TESTS_SUMMARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Tests:.*failed").expect("tests summary pattern is valid"));

static FAILED_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+failed").expect("failed count pattern is valid"));

static PASSED_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+passed").expect("passed count pattern is valid"));

/// Which runner summary line a line is, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    /// `Test Suites: N failed, M passed, T total`
    Suites,
    /// `Tests: N failed, M passed, T total`
    Tests,
}

impl SummaryKind {
    /// Both kinds, checked independently for every line
    pub const ALL: [SummaryKind; 2] = [SummaryKind::Suites, SummaryKind::Tests];

    /// Whether the line is a summary of this kind reporting failures
    #[must_use]
    pub fn matches(self, line: &str) -> bool {
        match self {
            SummaryKind::Suites => SUITES_SUMMARY.is_match(line),
            SummaryKind::Tests => TESTS_SUMMARY.is_match(line),
        }
    }
}

/// Counts embedded in a summary line; each is optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryCounts {
    /// `<N> failed`
    pub failed: Option<usize>,
    /// `<N> passed`
    pub passed: Option<usize>,
}

/// Whether the line is console output rather than runner output
#[must_use]
pub fn is_console_output(line: &str) -> bool {
    line.contains("console.error") || line.contains("console.warn")
}

/// Whether the line is a React "not wrapped in act(...)" warning
#[must_use]
pub fn is_act_warning(line: &str) -> bool {
    line.contains("Warning: An update to") && line.contains("not wrapped in act(...)")
}

/// The first failure pattern matching a line, ignoring warning lines
#[must_use]
pub fn failure_indicator(line: &str) -> Option<&'static FailurePattern> {
    if line.contains("console.error") || line.contains("Warning:") {
        return None;
    }
    FAILURE_PATTERNS.iter().find(|pattern| pattern.is_match(line))
}

/// Whether a line continues an open error block (stack frame, diff, excerpt)
#[must_use]
pub fn is_continuation(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && (trimmed.starts_with("at ")
            || trimmed.starts_with("Expected")
            || trimmed.starts_with("Received")
            || SOURCE_EXCERPT.is_match(line))
}

/// Whether a line is a `FAIL tests/...` suite banner
#[must_use]
pub fn is_suite_banner(line: &str) -> bool {
    SUITE_BANNER.is_match(line)
}

/// Extract a categorized test file path from a line
#[must_use]
pub fn extract_test_file(line: &str) -> Option<&str> {
    TEST_FILE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract a `● describe › test` heading, joining the breadcrumb with ` › `
#[must_use]
pub fn extract_test_name(line: &str) -> Option<String> {
    let caps = TEST_NAME.captures(line.trim())?;
    let head = caps.get(1)?.as_str();
    Some(match caps.get(2) {
        Some(rest) => format!("{head} › {}", rest.as_str()),
        None => head.to_string(),
    })
}

/// The error kind named on a line, if one of the tracked kinds
#[must_use]
pub fn extract_error_kind(line: &str) -> Option<ErrorKind> {
    ERROR_KIND
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| ErrorKind::from_label(m.as_str()))
}

/// Pull the `<N> failed` and `<N> passed` counts out of a summary line
#[must_use]
pub fn summary_counts(line: &str) -> SummaryCounts {
    SummaryCounts {
        failed: captured_count(&FAILED_COUNT, line),
        passed: captured_count(&PASSED_COUNT, line),
    }
}

fn captured_count(regex: &Regex, line: &str) -> Option<usize> {
    regex
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_console_output() {
        assert!(is_console_output("    console.error"));
        assert!(is_console_output("  console.warn src/api.js:12"));
        assert!(!is_console_output("console.log hello"));
    }

    #[test]
    fn test_act_warning() {
        assert!(is_act_warning(
            "Warning: An update to ChartView inside a test was not wrapped in act(...)."
        ));
        assert!(!is_act_warning("Warning: An update to ChartView"));
    }

    #[test]
    fn test_failure_indicators() {
        for line in [
            "FAIL tests/unit/foo.test.js",
            "fail  tests/ui/bar.test.jsx",
            "    ✕ renders the chart (12 ms)",
            "    × renders the chart",
            "TypeError: x is not a function",
            "    expect(received).toBe(expected)",
            "thrown: \"Exceeded timeout of 5000 ms\"",
            "Expected: 3",
            "Received: 4",
            "the test has FAILED badly",
            "some error: happened",
        ] {
            assert!(failure_indicator(line).is_some(), "expected failure: {line}");
        }
    }

    #[test]
    fn test_failure_indicator_excludes_warnings() {
        assert!(failure_indicator("Warning: Error: something odd").is_none());
        assert!(failure_indicator("console.error Error: nope").is_none());
        assert!(failure_indicator("PASS tests/unit/bar.test.js").is_none());
        assert!(failure_indicator("").is_none());
    }

    #[test]
    fn test_failure_indicator_label() {
        let pattern = failure_indicator("FAIL tests/unit/a.test.js").expect("Should match");
        assert_eq!(pattern.label, "suite-fail");
    }

    #[test]
    fn test_continuation_lines() {
        assert!(is_continuation("    at Object.<anonymous> (foo.test.js:10:5)"));
        assert!(is_continuation("    Expected value to be 3"));
        assert!(is_continuation("    Received undefined"));
        assert!(is_continuation("      12 |   const x = y();"));
        assert!(!is_continuation(""));
        assert!(!is_continuation("   "));
        assert!(!is_continuation("PASS tests/unit/bar.test.js"));
        assert!(!is_continuation("    > 12 |   const x = y();"));
    }

    #[test]
    fn test_extract_test_file() {
        assert_eq!(
            extract_test_file("FAIL tests/unit/foo.test.js (5.2 s)"),
            Some("tests/unit/foo.test.js")
        );
        assert_eq!(
            extract_test_file("at Object.<anonymous> (tests/system/chart/render.spec.tsx:4:1)"),
            Some("tests/system/chart/render.spec.tsx")
        );
        assert_eq!(
            extract_test_file("FAIL tests/ui/Chart.test.jsx"),
            Some("tests/ui/Chart.test.jsx")
        );
        assert_eq!(
            extract_test_file("PASS tests/integration/api.spec.ts"),
            Some("tests/integration/api.spec.ts")
        );
        assert_eq!(
            extract_test_file("PASS tests/utils/date.test.cjs"),
            Some("tests/utils/date.test.cjs")
        );
        assert_eq!(extract_test_file("FAIL tests/e2e/foo.test.js"), None);
        assert_eq!(extract_test_file("FAIL tests/unit/foo.js"), None);
    }

    #[test]
    fn test_extract_test_name() {
        assert_eq!(
            extract_test_name("  ● Foo › does the thing"),
            Some("Foo › does the thing".to_string())
        );
        assert_eq!(
            extract_test_name("● Chart › render › draws axes"),
            Some("Chart › render › draws axes".to_string())
        );
        assert_eq!(
            extract_test_name("● standalone test"),
            Some("standalone test".to_string())
        );
        assert_eq!(extract_test_name("Foo › does the thing"), None);
        assert_eq!(extract_test_name("●"), None);
    }

    #[test]
    fn test_extract_error_kind() {
        assert_eq!(
            extract_error_kind("TypeError: x is not a function"),
            Some(ErrorKind::TypeError)
        );
        assert_eq!(
            extract_error_kind("    AssertionError: expected 1 to equal 2"),
            Some(ErrorKind::AssertionError)
        );
        assert_eq!(extract_error_kind("Error: plain"), None);
        assert_eq!(extract_error_kind("typeerror: lowercase"), None);
    }

    #[test]
    fn test_summary_lines() {
        let line = "Test Suites: 2 failed, 5 passed, 7 total";
        assert!(SummaryKind::Suites.matches(line));
        assert!(!SummaryKind::Tests.matches(line));
        assert_eq!(
            summary_counts(line),
            SummaryCounts {
                failed: Some(2),
                passed: Some(5)
            }
        );

        let line = "Tests:       3 failed, 40 passed, 43 total";
        assert!(SummaryKind::Tests.matches(line));
        assert!(!SummaryKind::Suites.matches(line));
        assert_eq!(
            summary_counts(line),
            SummaryCounts {
                failed: Some(3),
                passed: Some(40)
            }
        );
    }

    #[test]
    fn test_summary_requires_failed() {
        assert!(!SummaryKind::Suites.matches("Test Suites: 7 passed, 7 total"));
        assert!(!SummaryKind::Tests.matches("Tests: 43 passed, 43 total"));
    }

    #[test]
    fn test_summary_counts_optional() {
        assert_eq!(
            summary_counts("Tests: 1 failed, 1 total"),
            SummaryCounts {
                failed: Some(1),
                passed: None
            }
        );
    }
}
