//! Unified error types for chatzip.
//!
//! This module provides a single [`ChatzipError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Transcript parsing** is permissive: malformed header lines become
//!   continuation lines and never produce an error
//! - **Attachment resolution** fails per attachment ([`ChatzipError::AttachmentNotFound`],
//!   [`ChatzipError::Archive`]) so the rest of the chat stays usable
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatzip operations.
///
/// # Example
///
/// ```rust
/// use chatzip::error::Result;
/// use chatzip::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatzipError>;

/// The error type for all chatzip operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatzipError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output or extracted media)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The archive container itself could not be read.
    #[cfg(feature = "zip-archive")]
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when a transcript entry or output buffer is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The input doesn't match the expected structure.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// The export archive contains no root-level `.txt` transcript.
    #[error("No chat transcript (root-level .txt) found in {}", archive.display())]
    MissingTranscript {
        /// The archive that was searched
        archive: PathBuf,
    },

    /// No archive entry matches an attachment token.
    ///
    /// Callers typically render a "missing attachment" placeholder instead
    /// of failing the whole chat.
    #[error("Attachment not found in archive: {name}")]
    AttachmentNotFound {
        /// The attachment filename token as written in the transcript
        name: String,
    },

    /// An archive entry exists but could not be read or decoded.
    #[error("Failed to read archive entry '{entry}': {source}")]
    Archive {
        /// Name of the entry inside the archive
        entry: String,
        /// The underlying read error
        #[source]
        source: io::Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatzipError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatzipError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatzipError {
    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatzipError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an attachment-not-found error.
    pub fn attachment_not_found(name: impl Into<String>) -> Self {
        ChatzipError::AttachmentNotFound { name: name.into() }
    }

    /// Creates an archive read error for a specific entry.
    pub fn archive(entry: impl Into<String>, source: io::Error) -> Self {
        ChatzipError::Archive {
            entry: entry.into(),
            source,
        }
    }

    /// Creates a missing-transcript error.
    pub fn missing_transcript(archive: impl Into<PathBuf>) -> Self {
        ChatzipError::MissingTranscript {
            archive: archive.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatzipError::Io(_))
    }

    /// Returns `true` if no archive entry matched an attachment token.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChatzipError::AttachmentNotFound { .. })
    }

    /// Returns `true` if this error is local to one attachment.
    ///
    /// Both a missing entry and a failed entry read fall in this category.
    pub fn is_attachment_error(&self) -> bool {
        matches!(
            self,
            ChatzipError::AttachmentNotFound { .. } | ChatzipError::Archive { .. }
        )
    }

    /// Returns `true` if the archive had no transcript.
    pub fn is_missing_transcript(&self) -> bool {
        matches!(self, ChatzipError::MissingTranscript { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatzipError::InvalidFormat { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
