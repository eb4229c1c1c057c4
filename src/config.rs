//! Configuration types for parsing and output.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - transcript parsing settings
//! - [`TrimMode`] - how trailing whitespace is removed from message bodies
//! - [`OutputConfig`] - which messages the output writers include
//!
//! # Example
//!
//! ```rust
//! use chatzip::config::{ParserConfig, TrimMode};
//! use chatzip::parser::ChatParser;
//!
//! let config = ParserConfig::new()
//!     .with_trim_mode(TrimMode::Sentinel)
//!     .with_detect_system_messages(true);
//!
//! let parser = ChatParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// How the finalizer strips trailing whitespace from a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimMode {
    /// Plain trailing-whitespace trim.
    #[default]
    Plain,

    /// Byte-compatible with older viewer output: the trailing whitespace run
    /// is replaced by a `%` and then one trailing `%` is deleted.
    ///
    /// For a body that ends in a literal `%` with no trailing whitespace
    /// (`"100%"`) this also deletes that `%`.
    Sentinel,
}

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatzip::config::ParserConfig;
///
/// let config = ParserConfig::new().with_strip_invisible(false);
/// assert!(!config.strip_invisible);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Strip a leading byte-order mark and every LRM/RLM mark before
    /// splitting into lines (default: true)
    pub strip_invisible: bool,

    /// Trailing-whitespace policy for finalized bodies (default: plain)
    pub trim_mode: TrimMode,

    /// Mark known notification lines as system messages (default: false)
    pub detect_system_messages: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strip_invisible: true,
            trim_mode: TrimMode::Plain,
            detect_system_messages: false,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether invisible marks are stripped before parsing.
    #[must_use]
    pub fn with_strip_invisible(mut self, strip: bool) -> Self {
        self.strip_invisible = strip;
        self
    }

    /// Sets the trailing-whitespace policy.
    #[must_use]
    pub fn with_trim_mode(mut self, mode: TrimMode) -> Self {
        self.trim_mode = mode;
        self
    }

    /// Sets whether notification lines are flagged as system messages.
    #[must_use]
    pub fn with_detect_system_messages(mut self, detect: bool) -> Self {
        self.detect_system_messages = detect;
        self
    }
}

/// Configuration for output writers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Include system messages in output
    pub include_system: bool,

    /// Drop messages that have neither text nor attachments
    pub skip_empty: bool,
}

impl OutputConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Includes system messages.
    #[must_use]
    pub fn with_system(mut self) -> Self {
        self.include_system = true;
        self
    }

    /// Skips messages without text and attachments.
    #[must_use]
    pub fn with_skip_empty(mut self) -> Self {
        self.skip_empty = true;
        self
    }

    /// Returns `true` if the writer should emit this message.
    pub fn includes(&self, msg: &crate::Message) -> bool {
        if msg.system && !self.include_system {
            return false;
        }
        !(self.skip_empty && msg.is_empty() && !msg.has_attachments())
    }
}
