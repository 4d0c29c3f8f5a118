//! Text file configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TextFileError};
use crate::field::DEFAULT_FLOAT_READ_WIDTH;

/// Line terminator written by `TextFile::write_newline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewlineStyle {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl NewlineStyle {
    /// Terminator bytes for this style.
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            NewlineStyle::Lf => b"\n",
            NewlineStyle::CrLf => b"\r\n",
        }
    }
}

impl Default for NewlineStyle {
    fn default() -> Self {
        if cfg!(windows) {
            NewlineStyle::CrLf
        } else {
            NewlineStyle::Lf
        }
    }
}

/// Text file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFileConfig {
    /// Fractional digits written for f32/f64 fields
    pub float_precision: usize,
    /// Upper bound on bytes consumed by a single f32/f64 read (min 1)
    pub float_read_width: usize,
    /// Line terminator
    pub newline: NewlineStyle,
}

impl Default for TextFileConfig {
    fn default() -> Self {
        Self {
            float_precision: 6,
            float_read_width: DEFAULT_FLOAT_READ_WIDTH,
            newline: NewlineStyle::default(),
        }
    }
}

impl TextFileConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from a JSON string. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TextFileError::Config(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TextFileError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_json_str(&content)
    }

    /// Rejects settings that would make float fields unreadable.
    pub fn validate(&self) -> Result<()> {
        if self.float_read_width == 0 {
            return Err(TextFileError::Config(
                "float_read_width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
