//! Transcript parser entry point.
//!
//! [`ChatParser`] ties the parsing pipeline together:
//!
//! ```text
//! raw text → strip BOM / bidi marks → split lines → Accumulator → ParsedChat
//! ```
//!
//! Parsing is permissive and never fails on content: lines before the first
//! header are dropped and malformed headers become continuation lines. Only
//! reading a file from disk can return an error.
//!
//! # Example
//!
//! ```rust
//! use chatzip::config::{ParserConfig, TrimMode};
//! use chatzip::parser::ChatParser;
//!
//! let parser = ChatParser::with_config(ParserConfig::new().with_trim_mode(TrimMode::Sentinel));
//! let chat = parser.parse_str("[8/20/25, 4:44:08 PM] Ann: 100%");
//!
//! assert_eq!(chat.messages[0].text, "100");
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::Message;
use crate::chat::ParsedChat;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::parsing::{Messages, split_lines, strip_invisible};

/// Parser for WhatsApp transcript text.
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: ParserConfig,
}

impl ChatParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses transcript text into messages and participants.
    pub fn parse_str(&self, content: &str) -> ParsedChat {
        ParsedChat::from_messages(self.parse_messages(content))
    }

    /// Parses transcript text into finalized messages only.
    pub fn parse_messages(&self, content: &str) -> Vec<Message> {
        let content = if self.config.strip_invisible {
            strip_invisible(content)
        } else {
            content.into()
        };

        let mut messages = Messages::new(split_lines(&content), self.config.clone());
        let collected: Vec<Message> = messages.by_ref().collect();

        debug!(
            bytes = content.len(),
            messages = collected.len(),
            dropped = messages.dropped_lines(),
            "parsed transcript"
        );

        collected
    }

    /// Reads and parses a transcript `.txt` file.
    ///
    /// # Errors
    ///
    /// [`ChatzipError::Io`](crate::ChatzipError::Io) if the file cannot be
    /// read, [`ChatzipError::Utf8`](crate::ChatzipError::Utf8) if it is not
    /// valid UTF-8.
    pub fn parse(&self, path: &Path) -> Result<ParsedChat> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8(bytes).map_err(|source| crate::ChatzipError::Utf8 {
            context: path.display().to_string(),
            source,
        })?;
        Ok(self.parse_str(&content))
    }
}

/// Parses transcript text with the default configuration.
///
/// ```
/// let chat = chatzip::parse_str("[8/20/25, 4:44:08 PM] Ann: Hello");
///
/// let msg = &chat.messages[0];
/// assert_eq!(msg.date, "8/20/25");
/// assert_eq!(msg.time, "4:44:08 PM");
/// assert_eq!(msg.sender, "Ann");
/// assert_eq!(msg.text, "Hello");
/// assert!(msg.attachments.is_empty());
/// assert!(!msg.edited);
/// ```
pub fn parse_str(content: &str) -> ParsedChat {
    ChatParser::new().parse_str(content)
}
