//! Real stack capture tests
//!
//! Kept in their own binary: the test installs each capture mode globally,
//! which would race with tests that read the configuration.

#![cfg(feature = "rich-trace")]

use faultbase::config::{self, CaptureMode, FaultConfig};
use faultbase::prelude::*;

declare_error! {
    pub struct LookupError;
}

#[inline(never)]
fn raise_lookup_error(message: &str) -> BaseError {
    LookupError::new(message)
}

#[test]
fn test_both_backends_start_at_the_caller() {
    let original = config::current();

    for capture in [CaptureMode::Rich, CaptureMode::Basic] {
        config::install(FaultConfig {
            capture,
            max_frames: 64,
            internal_markers: Vec::new(),
        });

        let error = raise_lookup_error("key 7 missing");
        let trace = error.trace();
        assert!(trace.is_some(), "{:?} capture produced no trace", capture);

        let lines: Vec<&str> = trace.unwrap_or_default().lines().collect();
        assert_eq!(lines[0], "LookupError: key 7 missing");
        assert!(lines.len() > 1, "{:?} trace has no frames", capture);
        assert!(lines[1].starts_with("    at "), "unexpected frame line: {}", lines[1]);
        assert!(
            lines[1].contains("raise_lookup_error"),
            "{:?} trace does not start at the caller:\n{}",
            capture,
            lines.join("\n")
        );
    }

    config::install(original);
}
