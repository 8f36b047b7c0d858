// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for reading raw log bytes
//!
//! Arbitrary bytes, including invalid UTF-8, go through the same lossy
//! reader used for log files.

#![no_main]

use libfuzzer_sys::fuzz_target;

use failscan_parser::parse_reader;

fuzz_target!(|data: &[u8]| {
    // Reading from memory cannot fail, and parsing should never panic
    if let Ok(result) = parse_reader(data) {
        assert!(result.is_consistent());
    }
});
