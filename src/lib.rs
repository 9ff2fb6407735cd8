//! Faultbase
//!
//! Extensible error base type. Declare kinds with [`declare_error!`], build
//! errors with `Kind::new(message)`, attach causes and user-facing messages,
//! then log [`BaseError::to_structured`] or show
//! [`BaseError::resolve_user_message`] to end users.
//!
//! ```
//! use faultbase::prelude::*;
//!
//! declare_error! {
//!     pub struct NotFoundError;
//!     pub struct UserNotFoundError: NotFoundError;
//! }
//!
//! fn find_user(id: u32) -> Result<String, BaseError> {
//!     Err(UserNotFoundError::new(format!("User {} not found", id))
//!         .with_user_message("That account does not exist."))
//! }
//!
//! let error = find_user(42).unwrap_err();
//! assert!(error.is::<NotFoundError>());
//! assert_eq!(error.to_string(), "[UserNotFoundError] User 42 not found");
//! ```

pub use faultbase_core::*;

/// Commonly used items
pub mod prelude {
    pub use faultbase_core::{
        BaseError, Cause, ErrorKind, FaultError, FaultResult, MessageQuery, OptionExt,
        ResultExt, declare_error,
    };
}
