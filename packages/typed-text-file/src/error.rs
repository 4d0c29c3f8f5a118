//! Text file error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::field::FieldKind;

/// Text file operation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextFileError {
    /// File could not be opened (missing, permissions, invalid path)
    #[error("Failed to open '{}': {reason}", .path.display())]
    Open { path: PathBuf, reason: String },

    /// Seek was rejected by the platform or the target offset is invalid
    #[error("Seek failed: {0}")]
    Seek(String),

    /// Fewer bytes were read than requested
    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    /// Fewer bytes were written than requested
    #[error("Short write: expected {expected} bytes, wrote {actual}")]
    ShortWrite { expected: usize, actual: usize },

    /// Bytes read do not form a valid numeral of the requested kind
    #[error("Cannot parse {text:?} as {kind}")]
    Parse { kind: FieldKind, text: String },

    /// Boolean field holds something other than '0' or '1'
    #[error("Invalid boolean byte 0x{0:02x}")]
    InvalidBool(u8),

    /// Caller buffer cannot hold the requested bytes plus terminator
    #[error("Buffer too small: need {required} bytes, have {actual}")]
    BufferTooSmall { required: usize, actual: usize },

    /// Disk full while writing
    #[error("Disk full: {0}")]
    DiskFull(String),

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TextFileError>;
