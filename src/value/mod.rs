//! # Typed Value Codecs
//!
//! Encoders and decoders for the scalar types a tuple slot can hold. All
//! of them write into a caller-supplied buffer at offset 0 and return the
//! number of bytes produced; none of them length-prefix their output,
//! because the tuple offset table alone delimits each value region.
//!
//! ## Null Handling
//!
//! | Type              | Null representation                            |
//! |-------------------|------------------------------------------------|
//! | integers          | zero-length region                             |
//! | boolean           | zero-length region (tri-state)                 |
//! | floats, decimals  | zero-length region                             |
//! | string            | one-digit flag (`1` = null) inside the value   |
//! | binary            | one-digit sentinel (packed lengths are never 1)|
//!
//! String and binary carry their null flag in-band because their empty
//! values already claim the zero-length encoding.
//!
//! ## Tiers
//!
//! Each codec exposes an unchecked decoder (writer-guaranteed input) and,
//! where malformed input is expressible, a `_checked` variant returning
//! [`TupleError::Decode`](crate::TupleError::Decode) for the safe reader.

pub mod binary;
pub mod boolean;
pub mod decimal;
pub mod float;
pub mod int;
pub mod text;
