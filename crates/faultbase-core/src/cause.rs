//! Underlying causes
//!
//! A cause is whatever triggered an error: another [`BaseError`], a foreign
//! `std::error::Error`, a structured value, or a summary of a structured value
//! that could not be serialized.

use crate::entity::BaseError;
use crate::keys::member_keys;
use serde::Serialize;
use serde_json::{Value, json};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Maximum number of member names kept in an [`OpaqueSummary`]
pub const SUMMARY_KEY_LIMIT: usize = 5;

/// Marker appended to summary keys when more members exist
pub const SUMMARY_ELLIPSIS: &str = "...";

/// The condition that triggered an error
#[derive(Debug, Clone)]
pub enum Cause {
    /// Another faultbase error
    Fault(Box<BaseError>),
    /// Any other error value
    Foreign(ForeignError),
    /// A structured record, array, or scalar
    Value(Value),
    /// A structured value that could not be serialized
    Opaque(OpaqueSummary),
}

/// A non-faultbase error kept as a cause
#[derive(Debug, Clone)]
pub struct ForeignError {
    name: &'static str,
    error: Arc<dyn StdError + Send + Sync + 'static>,
}

impl ForeignError {
    /// Short type name of the wrapped error, e.g. `Error` for `std::io::Error`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The wrapped error
    pub fn error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.error.as_ref()
    }
}

/// Bounded description of an unserializable value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpaqueSummary {
    /// Declared type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Up to [`SUMMARY_KEY_LIMIT`] member names, then [`SUMMARY_ELLIPSIS`] if truncated
    pub keys: Vec<String>,
}

impl OpaqueSummary {
    fn new(type_name: &str, mut keys: Vec<String>) -> Self {
        if keys.len() > SUMMARY_KEY_LIMIT {
            keys.truncate(SUMMARY_KEY_LIMIT);
            keys.push(SUMMARY_ELLIPSIS.to_string());
        }
        Self {
            type_name: type_name.to_string(),
            keys,
        }
    }

    /// Whether member names were dropped
    pub fn is_truncated(&self) -> bool {
        self.keys.last().is_some_and(|key| key == SUMMARY_ELLIPSIS)
    }
}

impl Cause {
    /// Wrap any error. A `BaseError` is recognized and kept as [`Cause::Fault`].
    pub fn error<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(error), short_type_name(std::any::type_name::<E>()))
    }

    /// Wrap an already boxed error
    pub fn boxed(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self::from_boxed(error, "Error")
    }

    fn from_boxed(error: Box<dyn StdError + Send + Sync + 'static>, name: &'static str) -> Self {
        match error.downcast::<BaseError>() {
            Ok(fault) => Self::Fault(fault),
            Err(error) => Self::Foreign(ForeignError {
                name,
                error: Arc::from(error),
            }),
        }
    }

    /// Snapshot a structured value.
    ///
    /// The value is deep-copied through `serde_json`. When that fails, only the
    /// type name and the first member names are kept.
    pub fn structured<T>(value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_value(value) {
            Ok(value) => Self::Value(value),
            Err(error) => {
                let type_name = std::any::type_name::<T>();
                tracing::debug!(%error, type_name, "cause is not serializable, keeping a summary");
                Self::Opaque(OpaqueSummary::new(type_name, member_keys(value)))
            }
        }
    }

    /// The nested faultbase error, if this cause is one
    pub fn as_fault(&self) -> Option<&BaseError> {
        match self {
            Self::Fault(fault) => Some(&**fault),
            _ => None,
        }
    }

    /// The cause as a std error, when it is one
    pub fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Fault(fault) => {
                let error: &(dyn StdError + 'static) = &**fault;
                Some(error)
            }
            Self::Foreign(foreign) => {
                let error: &(dyn StdError + 'static) = foreign.error.as_ref();
                Some(error)
            }
            Self::Value(_) | Self::Opaque(_) => None,
        }
    }

    /// The structured value, if this cause is one
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Serialize the cause and everything below it
    pub fn to_json(&self) -> Value {
        match self {
            Self::Fault(fault) => fault_json(fault),
            Self::Foreign(foreign) => foreign_json(foreign.name, foreign.error.as_ref()),
            Self::Value(value) => value.clone(),
            Self::Opaque(summary) => json!({
                "type": summary.type_name,
                "keys": summary.keys,
            }),
        }
    }
}

fn fault_json(fault: &BaseError) -> Value {
    json!({
        "name": fault.name(),
        "message": fault.message(),
        "stack": fault.trace(),
        "cause": fault.cause().map(Cause::to_json),
    })
}

fn foreign_json(name: &str, error: &(dyn StdError + 'static)) -> Value {
    json!({
        "name": name,
        "message": error.to_string(),
        "stack": Value::Null,
        "cause": error.source().map(source_json),
    })
}

fn source_json(source: &(dyn StdError + 'static)) -> Value {
    match source.downcast_ref::<BaseError>() {
        Some(fault) => fault_json(fault),
        None => foreign_json("Error", source),
    }
}

/// Last path segment of a type name, without generic arguments
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fault(fault) => fmt::Display::fmt(fault, f),
            Self::Foreign(foreign) => fmt::Display::fmt(&foreign.error, f),
            Self::Value(Value::String(text)) => f.write_str(text),
            Self::Value(value) => write!(f, "{}", value),
            Self::Opaque(summary) => write!(f, "[{}]", summary.type_name),
        }
    }
}

impl From<BaseError> for Cause {
    fn from(error: BaseError) -> Self {
        Self::Fault(Box::new(error))
    }
}

impl From<Value> for Cause {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<String> for Cause {
    fn from(text: String) -> Self {
        Self::Value(Value::String(text))
    }
}

impl From<&str> for Cause {
    fn from(text: &str) -> Self {
        Self::Value(Value::String(text.to_string()))
    }
}

impl From<anyhow::Error> for Cause {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<BaseError>() {
            Ok(fault) => Self::from(fault),
            Err(error) => Self::boxed(error.into()),
        }
    }
}

impl From<std::io::Error> for Cause {
    fn from(error: std::io::Error) -> Self {
        Self::error(error)
    }
}

impl From<serde_json::Error> for Cause {
    fn from(error: serde_json::Error) -> Self {
        Self::error(error)
    }
}
