//! Raw stack capture backends

use crate::config::CaptureMode;
use std::backtrace::{Backtrace, BacktraceStatus};

/// Produces a raw, unfiltered stack trace for the current thread.
///
/// Output uses the `std::backtrace` layout: one `N: symbol` line per frame,
/// optionally followed by an `at file:line` line. Implementations must not
/// touch process-global state such as `RUST_BACKTRACE`.
#[cfg_attr(test, mockall::automock)]
pub trait TraceCapture: Send + Sync {
    /// Capture the current stack, or `None` when the host cannot provide one
    fn raw_trace(&self) -> Option<String>;
}

/// Capture through `std::backtrace`, ignoring `RUST_BACKTRACE`
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicCapture;

impl TraceCapture for BasicCapture {
    fn raw_trace(&self) -> Option<String> {
        let backtrace = Backtrace::force_capture();
        match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            status => {
                tracing::debug!(?status, "std backtrace unavailable");
                None
            }
        }
    }
}

/// Capture resolved frames through the `backtrace` crate
#[cfg(feature = "rich-trace")]
#[derive(Debug, Default, Clone, Copy)]
pub struct RichCapture;

#[cfg(feature = "rich-trace")]
impl TraceCapture for RichCapture {
    fn raw_trace(&self) -> Option<String> {
        use std::fmt::Write;

        let backtrace = backtrace::Backtrace::new();
        let mut out = String::new();
        let mut index = 0usize;

        for frame in backtrace.frames() {
            for symbol in frame.symbols() {
                let name = symbol
                    .name()
                    .map(|name| format!("{:#}", name))
                    .unwrap_or_else(|| "<unknown>".to_string());
                let _ = writeln!(out, "{:4}: {}", index, name);
                if let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) {
                    let _ = writeln!(out, "             at {}:{}", file.display(), line);
                }
                index += 1;
            }
        }

        if index == 0 { None } else { Some(out) }
    }
}

#[cfg(feature = "rich-trace")]
static RICH: RichCapture = RichCapture;
static BASIC: BasicCapture = BasicCapture;

/// Backend for `mode`, or `None` when capture is off.
///
/// `Rich` without the `rich-trace` feature degrades to `Basic`.
pub fn capturer_for(mode: CaptureMode) -> Option<&'static dyn TraceCapture> {
    match mode {
        CaptureMode::Off => None,
        CaptureMode::Basic => Some(&BASIC),
        #[cfg(feature = "rich-trace")]
        CaptureMode::Rich => Some(&RICH),
        #[cfg(not(feature = "rich-trace"))]
        CaptureMode::Rich => {
            tracing::debug!("rich trace capture not compiled in, using std backtrace");
            Some(&BASIC)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_off() {
        assert!(capturer_for(CaptureMode::Off).is_none());
    }

    #[test]
    fn test_basic_capture_has_frames() {
        let capturer = capturer_for(CaptureMode::Basic).unwrap();
        // Backtraces can be unsupported on exotic targets; absence is allowed
        if let Some(raw) = capturer.raw_trace() {
            assert!(raw.lines().any(|line| line.trim_start().starts_with("0:")));
        }
    }

    #[cfg(feature = "rich-trace")]
    #[test]
    fn test_rich_capture_has_frames() {
        let raw = RichCapture.raw_trace().unwrap();
        assert!(raw.lines().next().unwrap().trim_start().starts_with("0:"));
    }
}
