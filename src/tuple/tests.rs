//! Tests for the tuple container format

use super::*;
use crate::error::TupleError;
use crate::value::decimal::{Decimal, X6Decimal};

#[test]
fn writer_emits_header_table_and_values() {
    let mut buf = [0u8; 64];
    let mut writer = TupleWriter::new(&mut buf, 3);
    writer.write_u64(1);
    writer.write_u64(2);
    writer.write_u64(3);
    let len = writer.seal();

    // One header digit, three two-digit offsets, three one-digit values.
    assert_eq!(len, 1 + 3 * 2 + 3);

    let reader = TupleReader::new(&buf[..len], 3);
    assert_eq!(reader.offset_width(), 2);
    assert_eq!(reader.byte_len(), len);
    assert_eq!(reader.get_u64(0), 1);
    assert_eq!(reader.get_u64(1), 2);
    assert_eq!(reader.get_u64(2), 3);
}

#[test]
fn sealed_tuple_is_printable_ascii() {
    let mut buf = [0u8; 64];
    let mut writer = TupleWriter::new(&mut buf, 3);
    writer.write_u64(123_456);
    writer.write_str("abc");
    writer.write_bool(true);
    let len = writer.seal();

    assert!(buf[..len].iter().all(u8::is_ascii_graphic));
}

#[test]
fn indexed_reads_work_in_any_order_and_repeat() {
    let mut buf = [0u8; 128];
    let values = ["alpha", "bravo", "charlie", "delta", "echo"];
    let mut writer = TupleWriter::new(&mut buf, values.len());
    for v in values {
        writer.write_str(v);
    }
    let len = writer.seal();

    let reader = TupleReader::new(&buf[..len], values.len());
    for index in [2usize, 4, 1, 0, 3, 2, 2] {
        assert_eq!(reader.get_str(index).unwrap(), Some(values[index]));
    }
}

#[test]
fn sequential_cursor_advances_and_skips() {
    let mut buf = [0u8; 64];
    let mut writer = TupleWriter::new(&mut buf, 4);
    writer.write_u64(10);
    writer.write_u64(20);
    writer.write_u64(30);
    writer.write_u64(40);
    let len = writer.seal();

    let mut reader = TupleReader::new(&buf[..len], 4);
    assert_eq!(reader.read_u64(), 10);
    reader.skip();
    assert_eq!(reader.read_u64(), 30);
    assert_eq!(reader.read_u64(), 40);
}

#[test]
fn mixed_types_round_trip() {
    let mut buf = [0u8; 256];
    let mut writer = TupleWriter::new(&mut buf, 8);
    writer.write_i64(-42);
    writer.write_u64(u64::MAX);
    writer.write_str_nullable(None);
    writer.write_bool_nullable(Some(false));
    writer.write_bytes(&[0xDE, 0xAD, 0xBE, 0xEF]);
    writer.write_f64(-2.5);
    writer.write_decimal(Decimal::new(12345, 3, true).unwrap());
    writer.write_x6(X6Decimal::from_parts(9, 500_000).unwrap());
    let len = writer.seal();

    let reader = TupleReader::new(&buf[..len], 8);
    assert_eq!(reader.get_i64(0), -42);
    assert_eq!(reader.get_u64(1), u64::MAX);
    assert_eq!(reader.get_str(2).unwrap(), None);
    assert_eq!(reader.get_bool_nullable(3), Some(false));
    assert_eq!(
        reader.get_bytes(4).unwrap().as_deref(),
        Some(&[0xDE, 0xAD, 0xBE, 0xEF][..])
    );
    assert_eq!(reader.get_f64(5), -2.5);
    assert_eq!(reader.get_decimal(6), Decimal::new(12345, 3, true).unwrap());
    assert_eq!(reader.get_x6(7), X6Decimal::from_parts(9, 500_000).unwrap());
}

#[test]
fn widening_rewrites_the_table_in_place() {
    let mut buf = [0u8; 1024];
    // Start at width 1: offsets above 63 force a widening mid-stream.
    let mut writer = TupleWriter::with_offset_width(&mut buf, 5, 1);
    writer.write_str("0123456789012345678901234567890123456789"); // 41 bytes
    assert_eq!(writer.offset_width(), 1);
    writer.write_str("0123456789012345678901234567890123456789");
    assert_eq!(writer.offset_width(), 2);
    writer.write_u64(7);
    writer.write_str("tail");
    writer.write_u64(8);
    let len = writer.seal();

    let reader = TupleReader::new(&buf[..len], 5);
    assert_eq!(reader.offset_width(), 2);
    assert_eq!(
        reader.get_str(0).unwrap().unwrap().len(),
        40 // 41 bytes minus the null-flag digit
    );
    assert_eq!(reader.get_str(1).unwrap(), reader.get_str(0).unwrap());
    assert_eq!(reader.get_u64(2), 7);
    assert_eq!(reader.get_str(3).unwrap(), Some("tail"));
    assert_eq!(reader.get_u64(4), 8);
}

#[test]
fn nested_tuple_round_trip() {
    let mut buf = [0u8; 256];
    let mut outer = TupleWriter::new(&mut buf, 4);
    outer.write_str("Joachim");
    outer.write_str("Wester");
    let inner_len = {
        let mut inner = TupleWriter::new(outer.remaining_mut(), 2);
        inner.write_u64(1234);
        inner.write_str("070-2424472");
        inner.seal()
    };
    outer.have_written(inner_len);
    outer.write_str("Stockholm");
    let len = outer.seal();

    let reader = TupleReader::new(&buf[..len], 4);
    assert_eq!(reader.get_str(0).unwrap(), Some("Joachim"));
    assert_eq!(reader.get_str(1).unwrap(), Some("Wester"));
    let inner = reader.get_tuple(2, 2);
    assert_eq!(inner.get_u64(0), 1234);
    assert_eq!(inner.get_str(1).unwrap(), Some("070-2424472"));
    assert_eq!(reader.get_str(3).unwrap(), Some("Stockholm"));
}

#[test]
fn empty_tuple_is_just_the_header_and_table() {
    let mut buf = [0u8; 8];
    let writer = TupleWriter::new(&mut buf, 0);
    let len = writer.seal();
    assert_eq!(len, 1);

    let reader = TupleReader::new(&buf[..len], 0);
    assert_eq!(reader.byte_len(), 1);
}

#[test]
fn safe_writer_requires_a_length_before_writing() {
    let mut buf = [0u8; 64];
    let mut writer = SafeTupleWriter::new(&mut buf, 2, 2).unwrap();
    assert_eq!(writer.write_u64(1), Err(TupleError::NotWriteSave));

    writer.set_tuple_length(64).unwrap();
    writer.write_u64(1).unwrap();
    writer.write_u64(2).unwrap();
    assert!(writer.seal().is_ok());
}

#[test]
fn safe_writer_validates_its_arguments() {
    let mut buf = [0u8; 64];
    assert!(matches!(
        SafeTupleWriter::new(&mut buf, 2, 0),
        Err(TupleError::BadArguments(_))
    ));
    assert!(matches!(
        SafeTupleWriter::new(&mut buf, 2, 6),
        Err(TupleError::BadArguments(_))
    ));

    let mut tiny = [0u8; 3];
    assert!(matches!(
        SafeTupleWriter::new(&mut tiny, 4, 2),
        Err(TupleError::BadArguments(_))
    ));

    let mut writer = SafeTupleWriter::new(&mut buf, 2, 2).unwrap();
    // Smaller than the header and table.
    assert!(writer.set_tuple_length(4).is_err());
    // Larger than the buffer.
    assert!(writer.set_tuple_length(65).is_err());
    // Beyond five-digit offset addressing.
    assert!(writer.set_tuple_length(1 << 30).is_err());
    assert!(writer.set_tuple_length(64).is_ok());
}

#[test]
fn safe_writer_rejects_extra_slots() {
    let mut buf = [0u8; 64];
    let mut writer = SafeTupleWriter::new(&mut buf, 2, 2).unwrap();
    writer.set_tuple_length(64).unwrap();
    writer.write_u64(1).unwrap();
    writer.write_u64(2).unwrap();
    assert_eq!(
        writer.write_u64(3),
        Err(TupleError::OutOfRange { index: 2, arity: 2 })
    );
}

#[test]
fn safe_writer_charges_widening_against_the_budget() {
    let mut buf = [0u8; 256];
    let mut writer = SafeTupleWriter::new(&mut buf, 2, 1).unwrap();
    // Header + 2x1 table + 64 value bytes would fit, but the second
    // value pushes the cumulative offset past 63 and the widening of
    // two table entries busts the budget.
    writer.set_tuple_length(1 + 2 + 64).unwrap();
    writer.write_str(&"x".repeat(32)).unwrap();
    let before = writer.byte_len();
    assert!(matches!(
        writer.write_str(&"y".repeat(30)),
        Err(TupleError::ValueTooBig { .. })
    ));
    assert_eq!(writer.byte_len(), before);
}

#[test]
fn safe_writer_seal_demands_every_slot() {
    let mut buf = [0u8; 64];
    let mut writer = SafeTupleWriter::new(&mut buf, 3, 2).unwrap();
    writer.set_tuple_length(64).unwrap();
    writer.write_u64(1).unwrap();
    assert_eq!(
        writer.seal(),
        Err(TupleError::Incomplete {
            written: 1,
            arity: 3
        })
    );
}

#[test]
fn safe_reader_round_trips_a_safe_write() {
    let mut buf = [0u8; 128];
    let mut writer = SafeTupleWriter::new(&mut buf, 3, 2).unwrap();
    writer.set_tuple_length(128).unwrap();
    writer.write_str("hello").unwrap();
    writer.write_i64(-5).unwrap();
    writer.write_bytes(&[1, 2, 3]).unwrap();
    let len = writer.seal().unwrap();

    let reader = SafeTupleReader::new(&buf[..len], 3).unwrap();
    assert_eq!(reader.get_str(0).unwrap(), Some("hello"));
    assert_eq!(reader.get_i64(1).unwrap(), -5);
    assert_eq!(reader.get_bytes(2).unwrap(), Some(vec![1, 2, 3]));
    assert_eq!(
        reader.get_str(3),
        Err(TupleError::OutOfRange { index: 3, arity: 3 })
    );
}

#[test]
fn safe_reader_rejects_malformed_buffers() {
    assert!(SafeTupleReader::new(&[], 1).is_err());

    // Header digit 9 is not a valid offset width.
    let buf = [b'8', b'0', b'0'];
    assert!(SafeTupleReader::new(&buf, 1).is_err());

    // Table would not fit the buffer.
    let buf = [b'2', b'0'];
    assert!(SafeTupleReader::new(&buf, 4).is_err());

    // Offset points past the end of the buffer.
    let mut buf = [0u8; 16];
    let mut writer = TupleWriter::with_offset_width(&mut buf, 1, 1);
    writer.write_u64(1);
    let len = writer.seal();
    buf[1] = b'z'; // end offset 63, buffer is far shorter
    let reader = SafeTupleReader::new(&buf[..len], 1).unwrap();
    assert!(matches!(reader.value_slice(0), Err(TupleError::Decode(_))));
}

#[test]
fn safe_reader_rejects_non_monotonic_offsets() {
    let mut buf = [0u8; 32];
    let mut writer = TupleWriter::with_offset_width(&mut buf, 2, 1);
    writer.write_u64(1);
    writer.write_u64(2);
    let len = writer.seal();

    // Swap the two offset digits so entry 0 ends after entry 1.
    buf.swap(1, 2);
    let reader = SafeTupleReader::new(&buf[..len], 2).unwrap();
    assert!(matches!(reader.value_slice(1), Err(TupleError::Decode(_))));
}

#[test]
fn safe_nested_tuple_via_remaining_mut() {
    let mut buf = [0u8; 128];
    let mut outer = SafeTupleWriter::new(&mut buf, 2, 2).unwrap();
    outer.set_tuple_length(128).unwrap();
    outer.write_str("outer").unwrap();
    let inner_len = {
        let mut inner = TupleWriter::new(outer.remaining_mut().unwrap(), 1);
        inner.write_u64(99);
        inner.seal()
    };
    outer.have_written(inner_len).unwrap();
    let len = outer.seal().unwrap();

    let reader = SafeTupleReader::new(&buf[..len], 2).unwrap();
    let inner = reader.get_tuple(1, 1).unwrap();
    assert_eq!(inner.get_u64(0).unwrap(), 99);
}
