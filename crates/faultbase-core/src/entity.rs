//! The error entity

use crate::cause::Cause;
use crate::config::{self, FaultConfig};
use crate::kind::{ErrorKind, KindId, Lineage};
use crate::trace;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// One raised fault.
///
/// Identity, message, timestamps and trace are fixed at construction. A cause
/// may be attached once; user-facing messages may be added at any time.
///
/// ```
/// use faultbase_core::{declare_error, ErrorKind, MessageQuery};
///
/// declare_error! {
///     pub struct UserNotFoundError;
/// }
///
/// let mut error = UserNotFoundError::new("User 42 not found");
/// error
///     .set_default_user_message("We could not find that account.")
///     .add_localized_message("fr", "Compte introuvable.")
///     .unwrap();
///
/// assert_eq!(error.to_string(), "[UserNotFoundError] User 42 not found");
/// assert_eq!(
///     error.resolve_user_message(MessageQuery::preferred("fr")),
///     Some("Compte introuvable.")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct BaseError {
    pub(crate) lineage: Lineage,
    pub(crate) message: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) timestamp_ms: i64,
    pub(crate) iso_timestamp: String,
    pub(crate) trace: Option<String>,
    pub(crate) cause: Option<Cause>,
    pub(crate) default_user_message: Option<String>,
    pub(crate) localized_messages: BTreeMap<String, String>,
}

impl BaseError {
    /// Create an error of the root kind
    pub fn new(message: impl Into<String>) -> Self {
        Self::of::<BaseError>(message)
    }

    /// Create an error of kind `K`
    pub fn of<K: ErrorKind>(message: impl Into<String>) -> Self {
        Self::construct(Lineage::of::<K>(), message.into(), &config::current())
    }

    fn construct(lineage: Lineage, message: String, config: &FaultConfig) -> Self {
        let header = format!("{}: {}", lineage.leaf(), message);
        let trace = trace::capture_trace(&header, config);
        Self::assemble(lineage, message, trace)
    }

    pub(crate) fn assemble(lineage: Lineage, message: String, trace: Option<String>) -> Self {
        // single clock read for both encodings
        let created_at = Utc::now();

        tracing::trace!(
            kind = lineage.leaf().name(),
            has_trace = trace.is_some(),
            "error constructed"
        );

        Self {
            lineage,
            message,
            created_at,
            timestamp_ms: created_at.timestamp_millis(),
            iso_timestamp: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            trace,
            cause: None,
            default_user_message: None,
            localized_messages: BTreeMap::new(),
        }
    }

    /// Attach the underlying cause.
    ///
    /// A cause that is already set never changes; a second attachment is ignored.
    /// A JSON `null` counts as no cause and leaves the slot empty.
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        if self.cause.is_some() {
            tracing::debug!(kind = self.name(), "cause already attached, ignoring new cause");
            return self;
        }

        match cause.into() {
            Cause::Value(Value::Null) => {
                tracing::debug!(kind = self.name(), "null cause, leaving cause unset");
            }
            cause => self.cause = Some(cause),
        }
        self
    }

    /// Identity name of the most-derived kind
    pub fn name(&self) -> &'static str {
        self.lineage.leaf().name()
    }

    /// Technical message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Construction time
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Construction time in milliseconds since the Unix epoch
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    /// Construction time as ISO-8601 with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`
    pub fn iso_timestamp(&self) -> &str {
        &self.iso_timestamp
    }

    /// Filtered stack trace, if one could be captured
    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }

    /// Underlying cause
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Whether this error is of kind `K` or of a kind declared below it
    pub fn is<K: ErrorKind>(&self) -> bool {
        self.lineage.contains::<K>()
    }

    /// Kind identities, most-derived first
    pub fn kinds(&self) -> impl Iterator<Item = KindId> + '_ {
        self.lineage.iter().copied()
    }

    /// Kind names, most-derived first
    pub fn kind_names(&self) -> Vec<&'static str> {
        self.lineage.iter().map(KindId::name).collect()
    }

    /// `"[<name>] <message>"`, followed by `"\nCaused by: <cause>"` when a cause is set
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.name(), self.message)?;

        if let Some(cause) = &self.cause {
            write!(f, "\nCaused by: {}", cause)?;
        }

        Ok(())
    }
}

impl std::error::Error for BaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_ref().and_then(Cause::as_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::MockTraceCapture;
    use std::error::Error as _;

    crate::declare_error! {
        struct NetworkError;
        struct TimeoutError: NetworkError;
    }

    #[test]
    fn test_root_kind() {
        let error = BaseError::new("boom");
        assert_eq!(error.name(), "BaseError");
        assert_eq!(error.message(), "boom");
        assert!(error.cause().is_none());
        assert!(error.is::<BaseError>());
        assert!(!error.is::<NetworkError>());
    }

    #[test]
    fn test_empty_message_allowed() {
        let error = TimeoutError::new("");
        assert_eq!(error.message(), "");
        assert_eq!(error.to_string(), "[TimeoutError] ");
    }

    #[test]
    fn test_kind_names() {
        let error = TimeoutError::new("no reply");
        assert_eq!(error.kind_names(), vec!["TimeoutError", "NetworkError", "BaseError"]);
        assert_eq!(error.kinds().next(), Some(KindId::of::<TimeoutError>()));
    }

    #[test]
    fn test_timestamps_share_one_instant() {
        let error = BaseError::new("boom");
        let parsed = DateTime::parse_from_rfc3339(error.iso_timestamp()).unwrap();
        assert_eq!(parsed.timestamp_millis(), error.timestamp_ms());
        assert_eq!(error.created_at().timestamp_millis(), error.timestamp_ms());
        assert!(error.iso_timestamp().ends_with('Z'));
    }

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("faultbase_core=debug")
            .try_init();
    }

    #[test]
    fn test_cause_is_attached_once() {
        init_logging();
        let error = BaseError::new("outer")
            .with_cause("first")
            .with_cause("second");
        assert_eq!(error.cause().unwrap().to_string(), "first");
    }

    #[test]
    fn test_null_cause_is_no_cause() {
        init_logging();
        let error = TimeoutError::with_cause("request failed", Value::Null);
        assert!(error.cause().is_none());
        assert_eq!(error.to_string(), "[TimeoutError] request failed");
        assert_eq!(error.to_structured().cause, None);

        // the slot stays open for a real cause
        let error = error.with_cause("socket closed");
        assert_eq!(error.cause().unwrap().to_string(), "socket closed");
    }

    #[test]
    fn test_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
        let inner = NetworkError::with_cause("fetch failed", io);
        let outer = TimeoutError::with_cause("sync aborted", inner);

        let source = outer.source().unwrap();
        let inner = source.downcast_ref::<BaseError>().unwrap();
        assert_eq!(inner.name(), "NetworkError");
        assert_eq!(inner.source().unwrap().to_string(), "config.toml missing");
    }

    #[test]
    fn test_value_cause_has_no_source() {
        let error = BaseError::new("outer").with_cause(serde_json::json!({"code": 7}));
        assert!(error.source().is_none());
        assert!(error.cause().is_some());
    }

    #[test]
    fn test_display_with_cause() {
        let inner = NetworkError::new("socket closed");
        let outer = TimeoutError::with_cause("request failed", inner);
        assert_eq!(
            outer.to_display_string(),
            "[TimeoutError] request failed\nCaused by: [NetworkError] socket closed"
        );
    }

    #[test]
    fn test_trace_from_injected_capture() {
        let mut mock = MockTraceCapture::new();
        mock.expect_raw_trace().returning(|| {
            Some(
                "   0: faultbase_core::entity::BaseError::construct\n   1: app::handler\n"
                    .to_string(),
            )
        });

        let lineage = Lineage::of::<TimeoutError>();
        let header = format!("{}: {}", lineage.leaf(), "late");
        let trace = trace::capture_with(&mock, &header, &FaultConfig::default());
        let error = BaseError::assemble(lineage, "late".to_string(), trace);

        assert_eq!(error.trace(), Some("TimeoutError: late\n    at app::handler"));
    }

    #[test]
    fn test_error_is_send_sync_clone() {
        fn assert_traits<T: Send + Sync + Clone + 'static>() {}
        assert_traits::<BaseError>();
    }
}
