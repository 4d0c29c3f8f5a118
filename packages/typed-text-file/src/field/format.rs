//! Canonical decimal formatting.

use std::fmt::{self, Write};

/// Plain decimal, leading `-` for negatives, no padding.
pub fn format_integer<T: fmt::Display>(value: T) -> Vec<u8> {
    value.to_string().into_bytes()
}

/// Counts formatted bytes without storing them.
struct Measure(usize);

impl Write for Measure {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// Fixed notation with `precision` fractional digits (`%.Nf`).
///
/// The output length is measured first and the buffer allocated to fit,
/// since large magnitudes expand to hundreds of digits.
pub fn format_fixed(value: f64, precision: usize) -> Vec<u8> {
    if value.is_nan() {
        let text: &[u8] = if value.is_sign_negative() { b"-nan" } else { b"nan" };
        return text.to_vec();
    }
    if value.is_infinite() {
        let text: &[u8] = if value < 0.0 { b"-inf" } else { b"inf" };
        return text.to_vec();
    }

    // Neither writer can fail.
    let mut measure = Measure(0);
    let _ = write!(measure, "{:.*}", precision, value);

    let mut out = String::with_capacity(measure.0);
    let _ = write!(out, "{:.*}", precision, value);
    debug_assert_eq!(out.len(), measure.0);
    out.into_bytes()
}
