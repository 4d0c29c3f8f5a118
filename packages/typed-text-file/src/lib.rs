//! Typed text-mode file I/O.
//!
//! Opens, reads, writes and seeks files, and stores integers, floats,
//! booleans and raw bytes as their ASCII text. Numeric reads clamp the
//! requested width to the type's widest representation so that fixed-width
//! fields packed back to back stay aligned.

pub mod config;
pub mod error;
pub mod field;
pub mod io_utils;
pub mod text_file;

pub use config::{NewlineStyle, TextFileConfig};
pub use error::{Result, TextFileError};
pub use field::{FieldKind, TextField};
pub use text_file::{Position, TextFile};
