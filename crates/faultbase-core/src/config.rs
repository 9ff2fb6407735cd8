//! Trace capture configuration
//!
//! The installed configuration is process-global. Constructing an error only
//! ever reads it; [`install`] is the single writer.

use crate::error::{FaultError, FaultResult};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable selecting the capture mode (`rich`, `basic`, `off`)
pub const ENV_TRACE_CAPTURE: &str = "FAULTBASE_TRACE_CAPTURE";
/// Environment variable holding the maximum number of frames kept
pub const ENV_TRACE_DEPTH: &str = "FAULTBASE_TRACE_DEPTH";
/// Environment variable with comma-separated extra frame markers to hide
pub const ENV_TRACE_HIDE: &str = "FAULTBASE_TRACE_HIDE";

const DEFAULT_MAX_FRAMES: usize = 32;

/// How stack traces are captured at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// Resolved frames from the `backtrace` crate (needs the `rich-trace` feature)
    #[default]
    Rich,
    /// Text from `std::backtrace`
    Basic,
    /// No capture; `trace()` is always `None`
    #[serde(alias = "disabled", alias = "none")]
    Off,
}

impl CaptureMode {
    /// Parse a mode name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rich" | "full" => Some(Self::Rich),
            "basic" | "std" => Some(Self::Basic),
            "off" | "none" | "disabled" => Some(Self::Off),
            _ => None,
        }
    }
}

/// Trace capture configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaultConfig {
    /// Capture mode
    pub capture: CaptureMode,
    /// Maximum number of frames kept in a captured trace
    pub max_frames: usize,
    /// Extra symbol substrings whose frames are hidden, e.g. a caller's own
    /// error factory functions
    pub internal_markers: Vec<String>,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            capture: CaptureMode::default(),
            max_frames: DEFAULT_MAX_FRAMES,
            internal_markers: Vec::new(),
        }
    }
}

impl FaultConfig {
    /// Merge with another config. Zero depth and empty markers do not override.
    pub fn merge(&mut self, other: FaultConfig) {
        self.capture = other.capture;

        if other.max_frames > 0 {
            self.max_frames = other.max_frames;
        }

        for marker in other.internal_markers {
            if !self.internal_markers.contains(&marker) {
                self.internal_markers.push(marker);
            }
        }
    }

    /// Load configuration from `FAULTBASE_*` environment variables
    pub fn load_from_env() -> FaultResult<FaultConfig> {
        Self::load_from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    /// Unset variables keep their defaults.
    pub fn load_from_lookup<F>(lookup: F) -> FaultResult<FaultConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = FaultConfig::default();

        if let Some(mode) = lookup(ENV_TRACE_CAPTURE) {
            config.capture = CaptureMode::parse(&mode).ok_or_else(|| {
                FaultError::config(format!("Invalid {} value: '{}'", ENV_TRACE_CAPTURE, mode))
            })?;
        }

        if let Some(depth) = lookup(ENV_TRACE_DEPTH) {
            let max_frames: usize = depth
                .trim()
                .parse()
                .ok()
                .filter(|frames| *frames > 0)
                .ok_or_else(|| {
                    FaultError::config(format!("Invalid {} value: '{}'", ENV_TRACE_DEPTH, depth))
                })?;
            config.max_frames = max_frames;
        }

        if let Some(hide) = lookup(ENV_TRACE_HIDE) {
            config.internal_markers = hide
                .split(',')
                .map(str::trim)
                .filter(|marker| !marker.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(config)
    }
}

static GLOBAL_CONFIG: Lazy<RwLock<FaultConfig>> = Lazy::new(|| {
    let config = FaultConfig::load_from_env().unwrap_or_else(|error| {
        tracing::warn!(%error, "ignoring faultbase environment configuration");
        FaultConfig::default()
    });
    RwLock::new(config)
});

/// Snapshot of the installed configuration
pub fn current() -> FaultConfig {
    GLOBAL_CONFIG.read().clone()
}

/// Replace the installed configuration, returning the previous one
pub fn install(config: FaultConfig) -> FaultConfig {
    tracing::debug!(
        capture = ?config.capture,
        max_frames = config.max_frames,
        "installing faultbase configuration"
    );
    std::mem::replace(&mut *GLOBAL_CONFIG.write(), config)
}
