use thiserror::Error;

use crate::codec::Dialect;

// ============================================================================
// Error Types
// ============================================================================

/// Errors produced while decoding or encoding a feed document.
///
/// Decoding never returns a partially populated document: any of these
/// aborts the whole call. Absent optional data is never an error.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The byte stream is not readable as the expected syntax, or it has no
    /// root element.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A field is present but its text cannot be converted to the field's
    /// declared type.
    #[error("Field `{path}` has an invalid value: {reason}")]
    FieldTypeMismatch { path: String, reason: String },

    /// The document's root does not match the dialect the caller asked for.
    #[error("Expected {expected} document, found {found}")]
    UnsupportedDialect { expected: Dialect, found: String },

    /// SEC-014: Input exceeds the configured size limit.
    #[error("Document too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: usize, max: usize },

    /// SEC-003: Element nesting exceeds the configured depth limit.
    #[error("Document nesting depth exceeds maximum of {0} levels")]
    MaxDepthExceeded(usize),

    /// The output writer failed.
    #[error("Failed to write document: {0}")]
    Encode(String),
}

impl FeedError {
    pub(crate) fn malformed(message: impl std::fmt::Display) -> Self {
        FeedError::MalformedInput(message.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
