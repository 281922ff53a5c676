//! # Tuple Container Format
//!
//! A tuple is a fixed-arity sequence of value regions behind an offset
//! table, laid out for O(1) random access:
//!
//! ```text
//! +---------------------+------------------------------+--------------+
//! | offset width header | offset table                 | value region |
//! | 1 base-64 digit     | arity x width base-64 digits | values       |
//! +---------------------+------------------------------+--------------+
//! ```
//!
//! The header digit holds the current offset element width (1..=5), so
//! a reader needs only the buffer and the arity. Table entry `i` stores
//! the cumulative value-region length through slot `i`; value `i` spans
//! `[entry[i-1], entry[i])` with an implicit `entry[-1] = 0`. Entries
//! are fixed-width, ASCII-sorted base-64, so a sealed tuple is printable
//! end to end.
//!
//! Writers start at a small offset width and widen in place when a
//! cumulative offset outgrows it; see [`TupleWriter`]. Two access tiers
//! share this layout: the unchecked [`TupleWriter`]/[`TupleReader`] pair
//! trusts its caller, while [`SafeTupleWriter`]/[`SafeTupleReader`]
//! validate capacity, slot indices and stored digits.

mod reader;
mod safe;
mod writer;

#[cfg(test)]
mod tests;

pub use reader::TupleReader;
pub use safe::{SafeTupleReader, SafeTupleWriter};
pub use writer::{TupleWriter, DEFAULT_OFFSET_WIDTH, HEADER_SIZE, MAX_OFFSET_WIDTH};
