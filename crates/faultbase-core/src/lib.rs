//! Faultbase Core Library
//!
//! One extensible error value, [`BaseError`], carrying:
//! - an identity name taken from its declared kind (see [`declare_error!`])
//! - the technical message and construction timestamps
//! - a filtered stack trace
//! - an optional underlying [`Cause`], serialized recursively
//! - optional user-facing messages, localized by language tag

pub mod annex;
pub mod cause;
pub mod config;
pub mod entity;
pub mod error;
pub mod ext;
mod keys;
pub mod kind;
pub mod structured;
pub mod trace;

// Re-export commonly used types
pub use annex::MessageQuery;
pub use cause::{Cause, ForeignError, OpaqueSummary};
pub use config::{CaptureMode, FaultConfig};
pub use entity::BaseError;
pub use error::{FaultError, FaultResult};
pub use ext::{OptionExt, ResultExt};
pub use kind::{ErrorKind, KindId, Lineage};
pub use structured::StructuredError;
