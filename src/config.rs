//! Codec settings: output layout and decode limits.
//!
//! Settings live in an optional TOML file. Every key has a default, so a
//! missing or blank file is the same as `CodecConfig::default()`.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read codec settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Codec settings are not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// SEC-014: Settings file over `CodecConfig::MAX_FILE_SIZE`.
    #[error("Codec settings file is {size} bytes (max {max} bytes)")]
    TooLarge { size: u64, max: u64 },
}

// ============================================================================
// Settings
// ============================================================================

/// Settings shared by every decode and encode call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Spaces per nesting level in XML output; 0 writes a single line.
    /// JSON output is pretty-printed whenever this is non-zero.
    pub indent: usize,

    /// Start XML output with `<?xml version="1.0" encoding="UTF-8"?>`.
    pub xml_declaration: bool,

    /// SEC-003: Deepest element nesting a decoded document may have.
    pub max_depth: usize,

    /// SEC-014: Largest input, in bytes, a decode call accepts.
    pub max_document_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            xml_declaration: true,
            max_depth: 64,
            max_document_size: 32 * 1024 * 1024,
        }
    }
}

const KNOWN_KEYS: [&str; 4] = ["indent", "xml_declaration", "max_depth", "max_document_size"];

impl CodecConfig {
    /// SEC-014: Settings files are tiny; refuse anything over 1 MB.
    pub const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Single-line output with no XML declaration. Limits stay at their defaults.
    pub fn compact() -> Self {
        Self {
            indent: 0,
            xml_declaration: false,
            ..Self::default()
        }
    }

    /// Reads settings from `path`. A file that does not exist yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match read_settings_file(path)? {
            Some(content) => Self::from_toml_str(&content),
            None => {
                tracing::debug!(path = %path.display(), "No codec settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parses settings from TOML text. Unknown keys are logged and skipped.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let table: toml::Table = content.parse()?;
        for key in table.keys().filter(|key| !KNOWN_KEYS.contains(&key.as_str())) {
            tracing::warn!(key = %key, "Unknown codec setting, ignoring");
        }

        let config: CodecConfig = toml::from_str(content)?;
        tracing::debug!(
            indent = config.indent,
            max_depth = config.max_depth,
            max_document_size = config.max_document_size,
            "Loaded codec settings"
        );
        Ok(config)
    }
}

/// `Ok(None)` when the file does not exist (including when it disappears
/// between the size check and the read).
fn read_settings_file(path: &Path) -> Result<Option<String>, ConfigError> {
    let size = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    // SEC-014: Check the size before reading anything into memory
    if size > CodecConfig::MAX_FILE_SIZE {
        return Err(ConfigError::TooLarge {
            size,
            max: CodecConfig::MAX_FILE_SIZE,
        });
    }

    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
