//! Scanf-style numeral parsing over a fixed-width field.
//!
//! Leading ASCII whitespace is skipped and the longest valid numeral prefix
//! is taken; whatever follows it in the field is ignored.

use std::str::FromStr;

use crate::error::{Result, TextFileError};
use crate::field::FieldKind;

fn skip_space(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r'))
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn starts_with_ignore_case(bytes: &[u8], word: &[u8]) -> bool {
    bytes.len() >= word.len() && bytes[..word.len()].eq_ignore_ascii_case(word)
}

/// Optional sign followed by at least one digit.
fn integer_prefix(bytes: &[u8], allow_minus: bool) -> Option<&str> {
    let bytes = skip_space(bytes);
    let sign = match bytes.first() {
        Some(b'+') => 1,
        Some(b'-') if allow_minus => 1,
        _ => 0,
    };
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return None;
    }
    std::str::from_utf8(&bytes[..sign + digits]).ok()
}

/// Decimal with optional fraction and exponent, or inf/infinity/nan.
fn float_prefix(bytes: &[u8]) -> Option<&str> {
    let bytes = skip_space(bytes);
    let mut end = match bytes.first() {
        Some(b'+' | b'-') => 1,
        _ => 0,
    };
    let rest = &bytes[end..];

    if starts_with_ignore_case(rest, b"infinity") {
        end += 8;
    } else if starts_with_ignore_case(rest, b"inf") || starts_with_ignore_case(rest, b"nan") {
        end += 3;
    } else {
        let int_digits = count_digits(rest);
        end += int_digits;
        let mut frac_digits = 0;
        if bytes.get(end) == Some(&b'.') {
            frac_digits = count_digits(&bytes[end + 1..]);
            end += 1 + frac_digits;
        }
        if int_digits + frac_digits == 0 {
            return None;
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            let exp_digits = count_digits(&bytes[exp.min(bytes.len())..]);
            if exp_digits > 0 {
                end = exp + exp_digits;
            }
        }
    }
    std::str::from_utf8(&bytes[..end]).ok()
}

fn parse_error(bytes: &[u8], kind: FieldKind) -> TextFileError {
    TextFileError::Parse {
        kind,
        text: String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Parses a decimal integer; out-of-range values are rejected.
///
/// Unsigned kinds (`signed == false`) do not accept a leading `-`.
pub fn parse_integer<T: FromStr>(bytes: &[u8], kind: FieldKind, signed: bool) -> Result<T> {
    integer_prefix(bytes, signed)
        .and_then(|text| text.parse::<T>().ok())
        .ok_or_else(|| parse_error(bytes, kind))
}

/// Parses a floating-point numeral.
pub fn parse_float<T: FromStr>(bytes: &[u8], kind: FieldKind) -> Result<T> {
    float_prefix(bytes)
        .and_then(|text| text.parse::<T>().ok())
        .ok_or_else(|| parse_error(bytes, kind))
}
