//! Stack-trace capture
//!
//! Capture is selected by [`CaptureMode`](crate::config::CaptureMode): resolved
//! frames from the `backtrace` crate, plain `std::backtrace` text, or nothing.
//! Both backends feed the same filter, so published traces look alike.

mod capture;
mod filter;

pub use capture::{BasicCapture, TraceCapture, capturer_for};
#[cfg(feature = "rich-trace")]
pub use capture::RichCapture;
pub use filter::{INTERNAL_FRAME_MARKERS, filter_frames};

#[cfg(test)]
pub(crate) use capture::MockTraceCapture;

use crate::config::FaultConfig;

/// Capture and filter a trace for a new error, per `config`
pub(crate) fn capture_trace(header: &str, config: &FaultConfig) -> Option<String> {
    let capturer = capturer_for(config.capture)?;
    capture_with(capturer, header, config)
}

/// Capture through an explicit backend
pub(crate) fn capture_with(
    capturer: &dyn TraceCapture,
    header: &str,
    config: &FaultConfig,
) -> Option<String> {
    let raw = capturer.raw_trace()?;
    let trace = filter_frames(&raw, header, &config.internal_markers, config.max_frames);
    if trace.is_none() {
        tracing::debug!("captured trace had no recognizable frames");
    }
    trace
}
