//! # Positional Digit Codecs
//!
//! This module provides the Base-N integer codecs underlying the tuple
//! format. A value is written big-endian as a sequence of digits in a fixed
//! base, each digit mapped through a printable alphabet chosen so that for
//! a fixed digit count, lexicographic byte order of the encodings matches
//! numeric order. That property lets encoded offsets and keys be compared
//! with a plain `memcmp`, without decoding.
//!
//! ## Bases and Alphabets
//!
//! | Base | Alphabet (ascending digit value)         | Fixed widths       |
//! |------|------------------------------------------|--------------------|
//! | 64   | `-` `0`..`9` `A`..`Z` `_` `a`..`z`       | 1,2,3,4,5,6,8,11   |
//! | 32   | `0`..`9` `A`..`V`                        | 1,2,3,4,6,7,13     |
//! | 256  | identity (raw bytes)                     | 1..=8              |
//!
//! All alphabets are ASCII-sorted, so encodings of equal width compare in
//! value order. The base-64 and base-32 alphabets are additionally
//! URL-safe.
//!
//! ## Safety Tiers
//!
//! The `write_fixed`/`read_fixed` functions are the unchecked fast tier:
//! a value that does not fit the requested width has its excess high-order
//! digits silently dropped, and invalid input bytes decode as digit 0.
//! Callers (the tuple offset table, the typed value codecs) guarantee the
//! invariants. `read_checked` validates widths and digits and reports
//! [`TupleError::Decode`](crate::TupleError::Decode) instead.

pub mod base256;
pub mod base32;
pub mod base64;
