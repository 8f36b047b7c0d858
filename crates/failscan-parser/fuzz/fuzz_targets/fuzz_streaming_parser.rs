// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for streaming parser
//!
//! This fuzzes the `LogParser` which processes test runner output
//! line-by-line incrementally.

#![no_main]

use libfuzzer_sys::fuzz_target;

use failscan_parser::LogParser;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut parser = LogParser::new();

        // Process each line - parser should never panic
        for line in input.lines() {
            let _ = parser.process_line(line);
        }

        // Finalize should never panic
        let _ = parser.finish();
    }
});
