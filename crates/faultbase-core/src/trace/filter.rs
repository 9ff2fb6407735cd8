//! Frame filtering and rendering

/// Symbol substrings that identify frames belonging to faultbase itself or to
/// the stack-walking machinery.
pub const INTERNAL_FRAME_MARKERS: &[&str] = &[
    // capture and filter routines
    "faultbase_core::trace::",
    "capture_trace",
    "filter_frames",
    // constructors and kind dispatch
    "faultbase_core::entity::BaseError::",
    "faultbase_core::kind::ErrorKind>::",
    "faultbase_core::kind::ErrorKind::",
    "faultbase_core::ext::",
    // stack walkers
    "std::backtrace::",
    "std::backtrace_rs::",
    "backtrace::backtrace::",
    "backtrace::capture::",
];

/// One frame of a raw trace
#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    symbol: String,
    location: Option<String>,
}

impl Frame {
    fn is_internal(&self) -> bool {
        INTERNAL_FRAME_MARKERS
            .iter()
            .any(|marker| self.symbol.contains(marker))
    }

    fn is_hidden(&self, extra: &[String]) -> bool {
        self.is_internal() || extra.iter().any(|marker| self.symbol.contains(marker.as_str()))
    }

    fn render(&self) -> String {
        match &self.location {
            Some(location) => format!("    at {} ({})", self.symbol, location),
            None => format!("    at {}", self.symbol),
        }
    }
}

/// `"  12: some::symbol"` → `Some("some::symbol")`
fn frame_symbol(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let (index, rest) = trimmed.split_once(':')?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(rest.trim())
}

fn parse_frames(raw: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();

    for line in raw.lines() {
        if let Some(symbol) = frame_symbol(line) {
            frames.push(Frame {
                symbol: symbol.to_string(),
                location: None,
            });
            continue;
        }

        let trimmed = line.trim();
        if let Some(location) = trimmed.strip_prefix("at ") {
            // only the first location of a frame is kept
            if let Some(frame) = frames.last_mut() {
                frame.location.get_or_insert_with(|| location.to_string());
            }
        }
        // anything else (header, blank lines) is dropped
    }

    frames
}

/// Turn a raw trace into the published form.
///
/// The header becomes `header`; frames up to and including the outermost
/// internal frame are cut, remaining internal frames and frames matching
/// `extra_markers` are dropped, and at most `max_frames` frames are kept.
/// Extra markers never move the cut. Returns `None` when `raw` has no frames.
pub fn filter_frames(
    raw: &str,
    header: &str,
    extra_markers: &[String],
    max_frames: usize,
) -> Option<String> {
    let frames = parse_frames(raw);
    if frames.is_empty() {
        return None;
    }

    let boundary = frames
        .iter()
        .rposition(Frame::is_internal)
        .map_or(0, |index| index + 1);

    let mut out = String::from(header);
    for frame in frames[boundary..]
        .iter()
        .filter(|frame| !frame.is_hidden(extra_markers))
        .take(max_frames)
    {
        out.push('\n');
        out.push_str(&frame.render());
    }

    Some(out)
}
