//! Typed field round trips through real files and in-memory streams.

use std::fmt::Debug;
use std::io::Cursor;

use ntest::timeout;
use tempfile::tempdir;

use typed_text_file::{FieldKind, TextField, TextFile, TextFileError};

/// Writes `value` alone, then reads it back at its own text width.
fn round_trip_in_memory<T: TextField + PartialEq + Debug>(value: T) {
    let mut file = TextFile::from_stream(Cursor::new(Vec::new()));
    file.write_field(value).unwrap();
    let len = file.position().unwrap() as usize;
    assert!(len <= T::KIND.max_width(), "{:?} wider than {}", value, T::KIND);

    file.seek_begin().unwrap();
    assert_eq!(file.read_field::<T>(len).unwrap(), value);
}

#[timeout(10000)]
#[test]
fn test_all_8_and_16_bit_values() {
    for v in i8::MIN..=i8::MAX {
        round_trip_in_memory(v);
    }
    for v in u8::MIN..=u8::MAX {
        round_trip_in_memory(v);
    }
    for v in i16::MIN..=i16::MAX {
        round_trip_in_memory(v);
    }
    for v in u16::MIN..=u16::MAX {
        round_trip_in_memory(v);
    }
}

#[timeout(5000)]
#[test]
fn test_wide_integer_samples() {
    for v in [i32::MIN, -1_000_000, -1, 0, 1, 65_536, i32::MAX] {
        round_trip_in_memory(v);
    }
    for v in [i64::MIN, -9_007_199_254_740_993, 0, 42, i64::MAX] {
        round_trip_in_memory(v);
    }
    for v in [0u32, 7, 4_000_000_000, u32::MAX] {
        round_trip_in_memory(v);
    }
    for v in [0u64, 10_000_000_000_000_000_000, u64::MAX] {
        round_trip_in_memory(v);
    }
}

#[test]
fn test_extremes_read_at_max_width_from_file() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("extremes.txt");

    let mut out = TextFile::create(&path)?;
    out.write_i8(i8::MIN)?;
    out.write_i16(i16::MIN)?;
    out.write_i32(i32::MIN)?;
    out.write_i64(i64::MIN)?;
    out.write_u8(u8::MAX)?;
    out.write_u16(u16::MAX)?;
    out.write_u32(u32::MAX)?;
    out.write_u64(u64::MAX)?;
    out.close()?;

    let mut input = TextFile::open(&path)?;
    assert_eq!(input.read_i8(FieldKind::I8.max_width())?, i8::MIN);
    assert_eq!(input.read_i16(FieldKind::I16.max_width())?, i16::MIN);
    assert_eq!(input.read_i32(FieldKind::I32.max_width())?, i32::MIN);
    assert_eq!(input.read_i64(FieldKind::I64.max_width())?, i64::MIN);
    assert_eq!(input.read_u8(FieldKind::U8.max_width())?, u8::MAX);
    assert_eq!(input.read_u16(FieldKind::U16.max_width())?, u16::MAX);
    assert_eq!(input.read_u32(FieldKind::U32.max_width())?, u32::MAX);
    assert_eq!(input.read_u64(FieldKind::U64.max_width())?, u64::MAX);
    input.close()?;
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_space_padded_fields_read_at_max_width() {
    let mut file = TextFile::from_stream(Cursor::new(Vec::new()));
    for v in [5i32, -17, 0] {
        file.write_i32(v).unwrap();
        let width = file.position().unwrap() as usize % FieldKind::I32.max_width();
        let pad = if width == 0 { 0 } else { FieldKind::I32.max_width() - width };
        file.write_text(" ".repeat(pad)).unwrap();
    }

    file.seek_begin().unwrap();
    assert_eq!(file.read_i32(100).unwrap(), 5);
    assert_eq!(file.read_i32(100).unwrap(), -17);
    assert_eq!(file.read_i32(100).unwrap(), 0);
}

#[timeout(1000)]
#[test]
fn test_concrete_scenario() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("scenario.txt");

    let mut out = TextFile::create(&path).unwrap();
    out.write_i32(-2147483647).unwrap();
    out.write_u64(18446744073709551615).unwrap();
    out.write_bool(true).unwrap();
    out.close().unwrap();

    let mut input = TextFile::open(&path).unwrap();
    assert_eq!(input.read_i32(11).unwrap(), -2147483647);
    assert_eq!(input.read_u64(20).unwrap(), 18446744073709551615);
    assert!(input.read_bool().unwrap());
    input.close().unwrap();
}

#[timeout(1000)]
#[test]
fn test_width_clamping_consumes_at_most_max_width() {
    let mut file = TextFile::from_stream(Cursor::new(b"-1281234".to_vec()));
    assert_eq!(file.read_i8(100).unwrap(), i8::MIN);
    assert_eq!(file.position().unwrap(), 4);
    assert_eq!(file.read_u16(4).unwrap(), 1234);
}

#[timeout(1000)]
#[test]
fn test_float_round_trips() {
    for v in [0.0f64, 1.5, -2.25, 3.141592653589793, 12345.678901, -0.000001] {
        let mut file = TextFile::from_stream(Cursor::new(Vec::new()));
        file.write_f64(v).unwrap();
        let len = file.position().unwrap() as usize;
        file.seek_begin().unwrap();
        let back = file.read_f64(len).unwrap();
        assert!((back - v).abs() <= 5e-7, "{} came back as {}", v, back);
    }

    for v in [0.0f32, 0.5, -7.125, 123.456, 1e-3] {
        let mut file = TextFile::from_stream(Cursor::new(Vec::new()));
        file.write_f32(v).unwrap();
        let len = file.position().unwrap() as usize;
        file.seek_begin().unwrap();
        let back = file.read_f32(len).unwrap();
        let tolerance = 5e-7f32.max(v.abs() * f32::EPSILON);
        assert!((back - v).abs() <= tolerance, "{} came back as {}", v, back);
    }
}

#[timeout(1000)]
#[test]
fn test_float_written_in_fixed_notation() {
    let mut file = TextFile::from_stream(Cursor::new(Vec::new()));
    file.write_f64(1.5).unwrap();
    file.write_text(",").unwrap();
    file.write_f32(-0.25).unwrap();
    file.write_text(",").unwrap();
    file.write_f64(1e21).unwrap();
    assert_eq!(
        file.into_inner().into_inner(),
        b"1.500000,-0.250000,1000000000000000000000.000000"
    );
}

#[timeout(1000)]
#[test]
fn test_bool_round_trip_and_rejects_other_bytes() {
    let mut file = TextFile::from_stream(Cursor::new(Vec::new()));
    file.write_bool(true).unwrap();
    file.write_bool(false).unwrap();
    file.write_text("2").unwrap();

    file.seek_begin().unwrap();
    assert!(file.read_bool().unwrap());
    assert!(!file.read_bool().unwrap());
    assert_eq!(file.read_bool().unwrap_err(), TextFileError::InvalidBool(b'2'));
    assert!(matches!(
        file.read_bool(),
        Err(TextFileError::ShortRead { expected: 1, actual: 0 })
    ));
}

#[timeout(1000)]
#[test]
fn test_non_numeric_field_fails_to_parse() {
    let mut file = TextFile::from_stream(Cursor::new(b"abc".to_vec()));
    assert!(matches!(
        file.read_u8(3),
        Err(TextFileError::Parse { kind: FieldKind::U8, .. })
    ));
}
