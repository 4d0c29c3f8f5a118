//! I/O utilities shared by the text file handle.

use std::io::{ErrorKind, Read, Write};

use crate::error::TextFileError;

/// Classifies I/O errors into specific TextFileError variants.
pub fn classify_io_error(error: std::io::Error, context: &str) -> TextFileError {
    match error.kind() {
        ErrorKind::StorageFull | ErrorKind::OutOfMemory => {
            TextFileError::DiskFull(format!("{}: {}", context, error))
        }
        _ => TextFileError::Io(format!("{}: {}", context, error)),
    }
}

/// Reads until `buf` is full or the stream reports end-of-file.
///
/// Returns the number of bytes read. Interrupted reads are resumed; any
/// other error aborts the transfer.
pub fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Writes `buf` until done or the stream stops accepting bytes.
///
/// Returns the number of bytes written.
pub fn write_full<W: Write + ?Sized>(writer: &mut W, buf: &[u8]) -> std::io::Result<usize> {
    let mut written = 0;
    while written < buf.len() {
        match writer.write(&buf[written..]) {
            Ok(0) => break,
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(written)
}
