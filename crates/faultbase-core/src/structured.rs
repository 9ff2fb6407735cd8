//! Structured serialization for log sinks

use crate::cause::Cause;
use crate::entity::BaseError;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Serializable snapshot of a [`BaseError`].
///
/// Field order is stable. The annex fields are omitted, not null, when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredError {
    pub name: String,
    pub message: String,
    pub timestamp: i64,
    pub iso_timestamp: String,
    pub stack: Option<String>,
    pub cause: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub localized_messages: BTreeMap<String, String>,
}

impl BaseError {
    /// Snapshot this error, expanding the whole cause chain
    pub fn to_structured(&self) -> StructuredError {
        StructuredError {
            name: self.name().to_string(),
            message: self.message.clone(),
            timestamp: self.timestamp_ms,
            iso_timestamp: self.iso_timestamp.clone(),
            stack: self.trace.clone(),
            cause: self.cause.as_ref().map(Cause::to_json),
            user_message: self.default_user_message.clone(),
            localized_messages: self.localized_messages.clone(),
        }
    }

    /// [`to_structured`](Self::to_structured) as a JSON value
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.to_structured()).unwrap_or_else(|error| {
            // every field is a plain string, number or JSON value
            tracing::warn!(%error, "failed to serialize error record");
            Value::Null
        })
    }
}

impl Serialize for BaseError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_structured().serialize(serializer)
    }
}
