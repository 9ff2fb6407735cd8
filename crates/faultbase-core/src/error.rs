//! Errors raised by faultbase itself

use thiserror::Error;

/// Result type alias for faultbase operations
pub type FaultResult<T> = Result<T, FaultError>;

/// Policy violations and configuration problems reported to callers.
///
/// Capability gaps (no rich capture, unsupported backtraces, unserializable
/// causes) never show up here; they degrade silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaultError {
    /// A localized message already exists for this language tag.
    /// Use `update_localized_message` to overwrite it.
    #[error("Localized message for '{lang}' already exists")]
    DuplicateLocalization { lang: String },

    /// Invalid configuration value
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl FaultError {
    /// Create a new duplicate localization error
    pub fn duplicate_localization(lang: impl Into<String>) -> Self {
        Self::DuplicateLocalization { lang: lang.into() }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_localization_display() {
        let error = FaultError::duplicate_localization("en");
        assert_eq!(error.to_string(), "Localized message for 'en' already exists");
    }

    #[test]
    fn test_config_display() {
        let error = FaultError::config("Invalid FAULTBASE_TRACE_DEPTH value");
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid FAULTBASE_TRACE_DEPTH value"
        );
    }
}
