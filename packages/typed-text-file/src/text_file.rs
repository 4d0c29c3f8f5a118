//! Text file handle.
//!
//! A `TextFile` owns one open stream. Positioning needs `Seek`, reads need
//! `Read`, writes need `Write`, so any stream (a `File`, an `io::Cursor`)
//! can stand behind the handle. Access is through `&mut self`; sharing a
//! handle across threads requires external locking. Writable handles are
//! closed with `close`, which surfaces flush errors; read-only streams are
//! released when the handle is dropped.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::TextFileConfig;
use crate::error::{Result, TextFileError};
use crate::field::TextField;
use crate::io_utils::{classify_io_error, read_full, write_full};

/// Byte offset from the start of the file.
pub type Position = i64;

/// Typed text-mode file handle.
#[derive(Debug)]
pub struct TextFile<S = File> {
    /// Underlying stream
    stream: S,
    /// Path the stream was opened from, if any
    path: Option<PathBuf>,
    /// Field formatting settings
    config: TextFileConfig,
}

impl TextFile<File> {
    /// Creates `path` for writing, truncating existing content.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::create_with(path, TextFileConfig::default())
    }

    pub fn create_with(path: impl AsRef<Path>, config: TextFileConfig) -> Result<Self> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        Self::open_with_options(path.as_ref(), &options, config, "write-truncate")
    }

    /// Opens `path` for writing at end-of-file, creating it if absent.
    ///
    /// The handle starts positioned at the end, so `position` reports the
    /// existing length before anything is written.
    pub fn append(path: impl AsRef<Path>) -> Result<Self> {
        Self::append_with(path, TextFileConfig::default())
    }

    pub fn append_with(path: impl AsRef<Path>, config: TextFileConfig) -> Result<Self> {
        let mut options = OpenOptions::new();
        options.append(true).create(true);
        let mut file = Self::open_with_options(path.as_ref(), &options, config, "write-append")?;
        file.seek_end()?;
        Ok(file)
    }

    /// Opens an existing file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, TextFileConfig::default())
    }

    pub fn open_with(path: impl AsRef<Path>, config: TextFileConfig) -> Result<Self> {
        let mut options = OpenOptions::new();
        options.read(true);
        Self::open_with_options(path.as_ref(), &options, config, "read")
    }

    fn open_with_options(
        path: &Path,
        options: &OpenOptions,
        config: TextFileConfig,
        mode: &'static str,
    ) -> Result<Self> {
        config.validate()?;
        let file = options.open(path).map_err(|e| {
            tracing::debug!(path = %path.display(), mode, error = %e, "Failed to open text file");
            TextFileError::Open {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        tracing::debug!(path = %path.display(), mode, "Opened text file");
        Ok(Self {
            stream: file,
            path: Some(path.to_path_buf()),
            config,
        })
    }

    /// Byte length of `path`, found by seeking to its end.
    pub fn try_length(path: impl AsRef<Path>) -> Result<u64> {
        let mut file = Self::open(path)?;
        file.seek_end()?;
        let end = file.position()?;
        file.close()?;
        u64::try_from(end).map_err(|_| TextFileError::Seek(format!("Negative end offset {}", end)))
    }

    /// Byte length of `path`, or -1 if it cannot be opened or seeked.
    pub fn length(path: impl AsRef<Path>) -> i64 {
        let path = path.as_ref();
        match Self::try_length(path) {
            Ok(len) => i64::try_from(len).unwrap_or(-1),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Length query failed");
                -1
            }
        }
    }

    /// Reads the whole of `path` as raw text.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let path = path.as_ref();
        let len = Self::try_length(path)?;
        let len = usize::try_from(len)
            .map_err(|_| TextFileError::Io(format!("{} bytes do not fit in memory", len)))?;
        let mut file = Self::open(path)?;
        let text = file.read_text(len)?;
        file.close()?;
        Ok(text)
    }

    /// Copies the text of `src` into a new or truncated `dst`.
    ///
    /// Returns the number of bytes copied.
    pub fn copy_text(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<u64> {
        let text = Self::read_all(src)?;
        let mut out = Self::create(dst)?;
        out.write_text(&text)?;
        out.close()?;
        Ok(text.len() as u64)
    }

    /// Path this handle was opened from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl<S> TextFile<S> {
    /// Wraps an already-open stream using default settings.
    pub fn from_stream(stream: S) -> Self {
        Self {
            stream,
            path: None,
            config: TextFileConfig::default(),
        }
    }

    pub fn from_stream_with(stream: S, config: TextFileConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            stream,
            path: None,
            config,
        })
    }

    pub fn config(&self) -> &TextFileConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Releases the stream without flushing.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Seek> TextFile<S> {
    fn seek(&mut self, target: SeekFrom) -> Result<()> {
        self.stream
            .seek(target)
            .map(|_| ())
            .map_err(|e| TextFileError::Seek(format!("{:?}: {}", target, e)))
    }

    pub fn seek_begin(&mut self) -> Result<()> {
        self.seek(SeekFrom::Start(0))
    }

    pub fn seek_end(&mut self) -> Result<()> {
        self.seek(SeekFrom::End(0))
    }

    /// Moves to an absolute offset. Offsets past the end are not checked.
    pub fn seek_to(&mut self, position: Position) -> Result<()> {
        let target = u64::try_from(position)
            .map_err(|_| TextFileError::Seek(format!("Negative position {}", position)))?;
        self.seek(SeekFrom::Start(target))
    }

    pub fn seek_relative(&mut self, offset: i64) -> Result<()> {
        self.seek(SeekFrom::Current(offset))
    }

    /// Current offset from the start of the stream.
    pub fn position(&mut self) -> Result<Position> {
        let pos = self
            .stream
            .stream_position()
            .map_err(|e| classify_io_error(e, "Failed to query position"))?;
        Position::try_from(pos)
            .map_err(|_| TextFileError::Seek(format!("Position {} exceeds i64", pos)))
    }
}

impl<S: Read> TextFile<S> {
    /// Reads up to `max_len` bytes into `buf` and NUL-terminates them.
    ///
    /// `buf` must hold at least `max_len + 1` bytes. Reaching end-of-file
    /// early is not an error; the count of bytes read is returned.
    pub fn read_text_into(&mut self, buf: &mut [u8], max_len: usize) -> Result<usize> {
        let required = max_len.saturating_add(1);
        if buf.len() < required {
            return Err(TextFileError::BufferTooSmall {
                required,
                actual: buf.len(),
            });
        }
        let read = read_full(&mut self.stream, &mut buf[..max_len])
            .map_err(|e| classify_io_error(e, "Failed to read text"))?;
        buf[read] = 0;
        Ok(read)
    }

    /// Reads up to `max_len` bytes. Short reads at end-of-file succeed.
    ///
    /// Memory grows with the bytes actually read, so `max_len` may be any
    /// upper bound.
    pub fn read_text(&mut self, max_len: usize) -> Result<Vec<u8>> {
        let limit = u64::try_from(max_len).unwrap_or(u64::MAX);
        let mut text = Vec::new();
        (&mut self.stream)
            .take(limit)
            .read_to_end(&mut text)
            .map_err(|e| classify_io_error(e, "Failed to read text"))?;
        Ok(text)
    }

    /// Fills `buf` exactly.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        let read = read_full(&mut self.stream, buf)
            .map_err(|e| classify_io_error(e, "Failed to read bytes"))?;
        if read != buf.len() {
            return Err(TextFileError::ShortRead {
                expected: buf.len(),
                actual: read,
            });
        }
        Ok(())
    }

    pub fn read_bytes_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; len];
        self.read_bytes(&mut bytes)?;
        Ok(bytes)
    }

    /// Reads one field of type `T`.
    ///
    /// `requested_len` is clamped to the widest text `T` can have, then
    /// exactly that many bytes are consumed, whether or not they parse.
    pub fn read_field<T: TextField>(&mut self, requested_len: usize) -> Result<T> {
        let kind = T::KIND;
        let width = kind.read_width(requested_len, &self.config);
        let mut scratch = vec![0u8; width];
        let read = read_full(&mut self.stream, &mut scratch)
            .map_err(|e| classify_io_error(e, "Failed to read field"))?;
        if read < width {
            tracing::debug!(kind = %kind, width, read, "Short field read");
            return Err(TextFileError::ShortRead {
                expected: width,
                actual: read,
            });
        }
        let value = T::parse_field(&scratch);
        match &value {
            Ok(_) => tracing::trace!(kind = %kind, width, "Read field"),
            Err(e) => tracing::debug!(kind = %kind, width, error = %e, "Field parse failed"),
        }
        value
    }

    /// Reads a single `'0'` or `'1'` byte.
    pub fn read_bool(&mut self) -> Result<bool> {
        self.read_field::<bool>(1)
    }
}

impl<S: Write> TextFile<S> {
    fn write_counted(&mut self, bytes: &[u8], context: &str) -> Result<()> {
        let written =
            write_full(&mut self.stream, bytes).map_err(|e| classify_io_error(e, context))?;
        if written != bytes.len() {
            return Err(TextFileError::ShortWrite {
                expected: bytes.len(),
                actual: written,
            });
        }
        Ok(())
    }

    /// Writes `text` verbatim, without a terminator.
    pub fn write_text(&mut self, text: impl AsRef<[u8]>) -> Result<()> {
        self.write_counted(text.as_ref(), "Failed to write text")
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_counted(bytes, "Failed to write bytes")
    }

    /// Writes the configured line terminator.
    pub fn write_newline(&mut self) -> Result<()> {
        let newline = self.config.newline.as_bytes();
        self.write_counted(newline, "Failed to write newline")
    }

    /// Writes `value` in its canonical text form.
    pub fn write_field<T: TextField>(&mut self, value: T) -> Result<()> {
        let kind = T::KIND;
        let text = value.format_field(&self.config);
        tracing::trace!(kind = %kind, len = text.len(), "Write field");
        self.write_counted(&text, "Failed to write field")
    }

    /// Writes `'1'` or `'0'`.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_field(value)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stream
            .flush()
            .map_err(|e| classify_io_error(e, "Failed to flush"))
    }

    /// Flushes pending writes and releases the stream.
    ///
    /// Only writable streams have anything to flush. A read-only stream
    /// (e.g. `TextFile<&[u8]>`) is released by dropping the handle.
    pub fn close(mut self) -> Result<()> {
        self.flush()?;
        match &self.path {
            Some(path) => tracing::debug!(path = %path.display(), "Closed text file"),
            None => tracing::debug!("Closed text stream"),
        }
        Ok(())
    }
}

macro_rules! typed_methods {
    ($($ty:ty => $write:ident, $read:ident;)*) => {
        impl<S: Write> TextFile<S> {
            $(
                #[doc = concat!("Writes a `", stringify!($ty), "` as decimal text.")]
                pub fn $write(&mut self, value: $ty) -> Result<()> {
                    self.write_field(value)
                }
            )*
        }

        impl<S: Read> TextFile<S> {
            $(
                #[doc = concat!("Reads a `", stringify!($ty), "` from at most `requested_len` bytes.")]
                pub fn $read(&mut self, requested_len: usize) -> Result<$ty> {
                    self.read_field(requested_len)
                }
            )*
        }
    };
}

typed_methods! {
    i8 => write_i8, read_i8;
    i16 => write_i16, read_i16;
    i32 => write_i32, read_i32;
    i64 => write_i64, read_i64;
    u8 => write_u8, read_u8;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
    f32 => write_f32, read_f32;
    f64 => write_f64, read_f64;
}
