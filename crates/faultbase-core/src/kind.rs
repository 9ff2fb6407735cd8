//! Fault kinds and their lineage
//!
//! A kind is a zero-sized type that names one fault variant. Kinds form a
//! single-parent hierarchy rooted at [`BaseError`]; every entity records the
//! whole chain so that [`BaseError::is`] recognizes each ancestor.

use crate::cause::Cause;
use crate::entity::BaseError;
use std::any::TypeId;
use std::fmt;

/// Identity of one kind in a lineage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindId {
    name: &'static str,
    type_id: TypeId,
}

impl KindId {
    /// Identity of kind `K`
    pub fn of<K: ErrorKind>() -> Self {
        Self {
            name: K::NAME,
            type_id: TypeId::of::<K>(),
        }
    }

    /// Declared name of the kind
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Kind chain from the most-derived kind up to the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineage(Vec<KindId>);

impl Lineage {
    /// Lineage of kind `K`
    pub fn of<K: ErrorKind>() -> Self {
        let mut chain = Vec::new();
        K::ancestry(&mut chain);
        Self(chain)
    }

    /// Most-derived kind
    pub fn leaf(&self) -> KindId {
        // ancestry() always pushes Self first, so the chain is never empty
        self.0.first().copied().unwrap_or_else(KindId::of::<BaseError>)
    }

    /// Whether `K` appears anywhere in the chain
    pub fn contains<K: ErrorKind>(&self) -> bool {
        let wanted = TypeId::of::<K>();
        self.0.iter().any(|id| id.type_id == wanted)
    }

    /// Kinds, most-derived first
    pub fn iter(&self) -> impl Iterator<Item = &KindId> {
        self.0.iter()
    }

    /// Number of kinds in the chain, root included
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

/// A declared fault variant.
///
/// Implement through [`declare_error!`](crate::declare_error) rather than by hand.
pub trait ErrorKind: Sized + 'static {
    /// Identity name reported by every error of this kind. Never empty.
    const NAME: &'static str;

    /// Push this kind followed by its ancestors onto `chain`
    fn ancestry(chain: &mut Vec<KindId>);

    /// Create an error of this kind
    fn new(message: impl Into<String>) -> BaseError {
        BaseError::of::<Self>(message)
    }

    /// Create an error of this kind caused by `cause`
    fn with_cause(message: impl Into<String>, cause: impl Into<Cause>) -> BaseError {
        BaseError::of::<Self>(message).with_cause(cause)
    }
}

impl ErrorKind for BaseError {
    const NAME: &'static str = "BaseError";

    fn ancestry(chain: &mut Vec<KindId>) {
        chain.push(KindId::of::<Self>());
    }
}

/// Declare one or more fault kinds.
///
/// ```
/// use faultbase_core::{declare_error, ErrorKind};
///
/// declare_error! {
///     /// Lookup failures
///     pub struct NotFoundError;
///     pub struct UserNotFoundError: NotFoundError;
///     pub struct LegacyLookupError: NotFoundError = "E_LOOKUP";
/// }
///
/// let error = UserNotFoundError::new("User 42 not found");
/// assert_eq!(error.name(), "UserNotFoundError");
/// assert!(error.is::<NotFoundError>());
/// assert_eq!(LegacyLookupError::NAME, "E_LOOKUP");
/// ```
///
/// A kind without a parent extends `BaseError`. A string literal after `=`
/// overrides the identity name.
#[macro_export]
macro_rules! declare_error {
    () => {};
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(: $parent:ty)? $(= $tag:literal)? ;
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::ErrorKind for $name {
            const NAME: &'static str = $crate::__kind_name!($name $(, $tag)?);

            fn ancestry(chain: &mut ::std::vec::Vec<$crate::KindId>) {
                chain.push($crate::KindId::of::<Self>());
                $crate::__kind_parent!(chain $(, $parent)?);
            }
        }

        $crate::declare_error!($($rest)*);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __kind_name {
    ($name:ident) => {
        ::std::stringify!($name)
    };
    ($name:ident, $tag:literal) => {
        $tag
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __kind_parent {
    ($chain:ident) => {
        <$crate::BaseError as $crate::ErrorKind>::ancestry($chain)
    };
    ($chain:ident, $parent:ty) => {
        <$parent as $crate::ErrorKind>::ancestry($chain)
    };
}
