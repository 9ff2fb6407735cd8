//! Extension traits for wrapping failures into kinds

use crate::cause::Cause;
use crate::entity::BaseError;
use crate::kind::ErrorKind;

/// Extension trait for wrapping errors of a `Result`
pub trait ResultExt<T> {
    /// Wrap the error as the cause of a new error of kind `K`
    fn fault<K: ErrorKind>(self, message: impl Into<String>) -> Result<T, BaseError>;

    /// Like [`fault`](Self::fault), with the message built only on error
    fn with_fault<K: ErrorKind, M: Into<String>, F: FnOnce() -> M>(
        self,
        f: F,
    ) -> Result<T, BaseError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn fault<K: ErrorKind>(self, message: impl Into<String>) -> Result<T, BaseError> {
        self.map_err(|error| BaseError::of::<K>(message).with_cause(Cause::error(error)))
    }

    fn with_fault<K: ErrorKind, M: Into<String>, F: FnOnce() -> M>(
        self,
        f: F,
    ) -> Result<T, BaseError> {
        self.map_err(|error| BaseError::of::<K>(f()).with_cause(Cause::error(error)))
    }
}

/// Extension trait for turning `None` into an error
pub trait OptionExt<T> {
    /// Convert `None` into a new error of kind `K`
    fn fault_none<K: ErrorKind>(self, message: impl Into<String>) -> Result<T, BaseError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn fault_none<K: ErrorKind>(self, message: impl Into<String>) -> Result<T, BaseError> {
        self.ok_or_else(|| BaseError::of::<K>(message))
    }
}
