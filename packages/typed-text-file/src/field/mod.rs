//! Field kinds, the field-width table, and per-type text encoding.
//!
//! Every value is stored as its canonical ASCII form. Fields are not
//! self-delimiting: a reader asks for a byte count, which is clamped to
//! the kind's maximum width before any bytes are consumed, so contiguous
//! fixed-width fields stay aligned.

pub mod format;
pub mod parse;

use std::fmt;

use crate::config::TextFileConfig;
use crate::error::{Result, TextFileError};

/// Read cap for f32/f64 fields when no configuration overrides it.
pub const DEFAULT_FLOAT_READ_WIDTH: usize = 20;

/// Kind of a typed text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
}

impl FieldKind {
    /// Longest canonical text of this kind, sign included.
    ///
    /// Floats have no fixed width on write; the value returned for them is
    /// the default read cap.
    pub const fn max_width(self) -> usize {
        match self {
            FieldKind::I8 => 4,
            FieldKind::I16 => 6,
            FieldKind::I32 => 11,
            FieldKind::I64 => 20,
            FieldKind::U8 => 3,
            FieldKind::U16 => 5,
            FieldKind::U32 => 10,
            FieldKind::U64 => 20,
            FieldKind::F32 | FieldKind::F64 => DEFAULT_FLOAT_READ_WIDTH,
            FieldKind::Bool => 1,
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, FieldKind::F32 | FieldKind::F64)
    }

    /// Clamps a requested read length to the widest field this kind allows.
    pub fn read_width(self, requested: usize, config: &TextFileConfig) -> usize {
        let cap = if self.is_float() {
            config.float_read_width
        } else {
            self.max_width()
        };
        requested.min(cap)
    }

    pub const fn name(self) -> &'static str {
        match self {
            FieldKind::I8 => "i8",
            FieldKind::I16 => "i16",
            FieldKind::I32 => "i32",
            FieldKind::I64 => "i64",
            FieldKind::U8 => "u8",
            FieldKind::U16 => "u16",
            FieldKind::U32 => "u32",
            FieldKind::U64 => "u64",
            FieldKind::F32 => "f32",
            FieldKind::F64 => "f64",
            FieldKind::Bool => "bool",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value that can be stored as a text field.
pub trait TextField: Sized + Copy {
    /// Width-table entry for this type.
    const KIND: FieldKind;

    /// Canonical ASCII encoding of `self`.
    fn format_field(&self, config: &TextFileConfig) -> Vec<u8>;

    /// Decodes a field from the bytes read for it.
    fn parse_field(bytes: &[u8]) -> Result<Self>;
}

macro_rules! integer_field {
    ($($ty:ty => $kind:ident, $signed:expr;)*) => {
        $(
            impl TextField for $ty {
                const KIND: FieldKind = FieldKind::$kind;

                fn format_field(&self, _config: &TextFileConfig) -> Vec<u8> {
                    format::format_integer(*self)
                }

                fn parse_field(bytes: &[u8]) -> Result<Self> {
                    parse::parse_integer(bytes, Self::KIND, $signed)
                }
            }
        )*
    };
}

integer_field! {
    i8 => I8, true;
    i16 => I16, true;
    i32 => I32, true;
    i64 => I64, true;
    u8 => U8, false;
    u16 => U16, false;
    u32 => U32, false;
    u64 => U64, false;
}

impl TextField for f32 {
    const KIND: FieldKind = FieldKind::F32;

    fn format_field(&self, config: &TextFileConfig) -> Vec<u8> {
        // f32 -> f64 is exact, so the decimal expansion is unchanged.
        format::format_fixed(f64::from(*self), config.float_precision)
    }

    fn parse_field(bytes: &[u8]) -> Result<Self> {
        parse::parse_float(bytes, Self::KIND)
    }
}

impl TextField for f64 {
    const KIND: FieldKind = FieldKind::F64;

    fn format_field(&self, config: &TextFileConfig) -> Vec<u8> {
        format::format_fixed(*self, config.float_precision)
    }

    fn parse_field(bytes: &[u8]) -> Result<Self> {
        parse::parse_float(bytes, Self::KIND)
    }
}

impl TextField for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn format_field(&self, _config: &TextFileConfig) -> Vec<u8> {
        vec![if *self { b'1' } else { b'0' }]
    }

    fn parse_field(bytes: &[u8]) -> Result<Self> {
        match bytes.first() {
            Some(b'0') => Ok(false),
            Some(b'1') => Ok(true),
            Some(&other) => Err(TextFileError::InvalidBool(other)),
            None => Err(TextFileError::ShortRead {
                expected: 1,
                actual: 0,
            }),
        }
    }
}
