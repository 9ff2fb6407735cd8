//! Trace configuration tests
//!
//! Kept in their own binary: they install a global configuration, which would
//! race with tests that read it.

use faultbase::config::{self, CaptureMode, FaultConfig};
use faultbase::prelude::*;

declare_error! {
    pub struct IngestError;
}

#[inline(never)]
fn raise_ingest_error(message: &str) -> BaseError {
    IngestError::new(message)
}

#[test]
fn test_installed_config_drives_capture() {
    let original = config::current();

    // capture off: no trace at all
    let previous = config::install(FaultConfig {
        capture: CaptureMode::Off,
        ..FaultConfig::default()
    });
    assert_eq!(previous, original);
    assert!(IngestError::new("batch 3 rejected").trace().is_none());

    // depth limit applies to both backends
    for capture in [CaptureMode::Basic, CaptureMode::Rich] {
        config::install(FaultConfig {
            capture,
            max_frames: 2,
            internal_markers: Vec::new(),
        });
        let error = IngestError::new("batch 3 rejected");
        let trace = error.trace().unwrap();
        assert!(trace.starts_with("IngestError: batch 3 rejected"));
        assert_eq!(trace.lines().count(), 3, "expected two frames:\n{}", trace);
    }

    // extra markers hide a caller's own factory
    config::install(FaultConfig {
        capture: CaptureMode::Basic,
        max_frames: 64,
        internal_markers: vec!["raise_ingest_error".to_string()],
    });
    let error = raise_ingest_error("batch 4 rejected");
    let trace = error.trace().unwrap();
    assert!(!trace.contains("raise_ingest_error"), "factory frame leaked:\n{}", trace);
    assert!(trace.lines().count() > 1, "callers above the factory were lost:\n{}", trace);

    // construction itself never changes what is installed
    let installed = config::current();
    for _ in 0..10 {
        let _ = IngestError::new("again");
    }
    assert_eq!(config::current(), installed);

    config::install(original.clone());
    assert_eq!(config::current(), original);
}
