//! # Error Types
//!
//! All recoverable failures in fastuple are reported through [`TupleError`].
//! Errors are returned synchronously by the call that detected them and are
//! never retried internally.
//!
//! The unchecked tier (plain [`TupleWriter`](crate::TupleWriter) /
//! [`TupleReader`](crate::TupleReader) and the `base` fixed-width functions)
//! does not construct these errors: its invariants are caller-guaranteed and
//! misuse yields silently incorrect values or an index panic, never memory
//! unsafety. The full validation taxonomy lives in the safe tier.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TupleError>;

/// Recoverable errors reported by the safe tier and by decode paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TupleError {
    /// A value's encoded size (plus any offset-table widening it would
    /// trigger) exceeds the remaining declared capacity of a safe writer.
    /// The buffer is left untouched.
    #[error("value needs {needed} bytes but only {available} are available")]
    ValueTooBig { needed: usize, available: usize },

    /// A read or write addressed a slot outside `[0, arity)`, or a write
    /// was attempted after all slots were filled.
    #[error("index {index} is out of range for a tuple of {arity} values")]
    OutOfRange { index: usize, arity: usize },

    /// A safe write was attempted before `set_tuple_length`.
    #[error("tuple length must be set before writing safely")]
    NotWriteSave,

    /// An argument is structurally invalid, e.g. a declared tuple length
    /// too small to hold the offset table.
    #[error("bad arguments: {0}")]
    BadArguments(String),

    /// Malformed encoded data: an invalid digit, an impossible value
    /// width, broken UTF-8 or an out-of-range decoded component.
    #[error("decode error: {0}")]
    Decode(String),

    /// A safe writer was sealed before all slots were written.
    #[error("tuple sealed with {written} of {arity} values written")]
    Incomplete { written: usize, arity: usize },
}

impl TupleError {
    pub(crate) fn bad_arguments(msg: impl Into<String>) -> Self {
        TupleError::BadArguments(msg.into())
    }

    pub(crate) fn decode(msg: impl Into<String>) -> Self {
        TupleError::Decode(msg.into())
    }
}
