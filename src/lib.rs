//! # fastuple - Compact Random-Access Tuple Codec
//!
//! fastuple serializes fixed-arity tuples of typed values into a compact,
//! ASCII-safe wire form with O(1) random access to every slot. This crate
//! prioritizes:
//!
//! - **Zero-copy reads**: Readers borrow the sealed buffer, no parsing pass
//! - **Zero allocation on the hot path**: Writers encode into caller buffers
//! - **Printable output**: Every sealed tuple is graphic ASCII end to end
//!
//! ## Quick Start
//!
//! ```
//! use fastuple::{TupleReader, TupleWriter};
//!
//! let mut buf = [0u8; 64];
//! let mut writer = TupleWriter::new(&mut buf, 3);
//! writer.write_u64(42);
//! writer.write_str("Alice");
//! writer.write_bool(true);
//! let len = writer.seal();
//!
//! let reader = TupleReader::new(&buf[..len], 3);
//! assert_eq!(reader.get_u64(0), 42);
//! assert_eq!(reader.get_str(1).unwrap(), Some("Alice"));
//! assert!(reader.get_bool(2));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  tuple: writer / reader / safe tier      │
//! ├──────────────────────────────────────────┤
//! │  value: int, bool, text, binary,         │
//! │         float, decimal codecs            │
//! ├──────────────────────────────────────────┤
//! │  base: base-64 / base-32 / base-256      │
//! │        fixed-width digit codecs          │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Tiers
//!
//! Every container comes in two flavors. The unchecked tier
//! ([`TupleWriter`], [`TupleReader`]) trusts its caller and skips all
//! validation; misuse yields wrong bytes or a slice panic, never memory
//! unsafety. The safe tier ([`SafeTupleWriter`], [`SafeTupleReader`])
//! validates capacity, slot indices and every decoded digit, reporting
//! failures as [`TupleError`] values.
//!
//! ## Module Overview
//!
//! - [`base`]: Fixed-width positional codecs over sortable alphabets
//! - [`value`]: Typed scalar codecs with nullable variants
//! - [`tuple`]: The offset-table container and both access tiers
//! - [`error`]: The crate-wide error taxonomy

pub mod base;
pub mod error;
pub mod tuple;
pub mod value;

pub use error::{Result, TupleError};
pub use tuple::{
    SafeTupleReader, SafeTupleWriter, TupleReader, TupleWriter, DEFAULT_OFFSET_WIDTH,
    HEADER_SIZE, MAX_OFFSET_WIDTH,
};
pub use value::decimal::{Decimal, X6Decimal};
