//! # Chatzip
//!
//! A Rust library for reading WhatsApp chat exports: the line-oriented
//! `_chat.txt` transcript and the `.zip` archive that carries it together
//! with the chat's media.
//!
//! ## Overview
//!
//! - transcript text becomes ordered [`Message`] records (multi-line bodies,
//!   `<attached: …>` markers, the "edited" flag)
//! - the distinct participants are collected and the viewer can be guessed
//! - attachment tokens are resolved to archive entries by exact name or path
//!   suffix, failing per attachment
//! - parsed chats can be written as JSON, JSONL or CSV
//!
//! ## Quick Start
//!
//! ```rust
//! let chat = chatzip::parse_str(
//!     "[8/20/25, 4:44:08 PM] Ann: Hello\n\
//!      [8/20/25, 4:45:10 PM] Bob 💕: look <attached: IMG_001.jpg>\n\
//!      second line",
//! );
//!
//! assert_eq!(chat.participants, ["Ann", "Bob 💕"]);
//! assert_eq!(chat.messages[1].attachments, ["IMG_001.jpg"]);
//! assert_eq!(chat.messages[1].text, "look \nsecond line");
//! assert_eq!(chat.guess_you(), Some("Bob 💕"));
//! ```
//!
//! ## Opening an Export
//!
//! ```rust,no_run
//! # #[cfg(feature = "zip-archive")]
//! # fn main() -> chatzip::Result<()> {
//! use chatzip::config::ParserConfig;
//! use chatzip::export::ChatExport;
//!
//! let export = ChatExport::open("WhatsApp Chat - Ann.zip", ParserConfig::default())?;
//! println!("{}", export.status_line());
//!
//! for msg in &export.chat.messages {
//!     for token in &msg.attachments {
//!         match export.resolve(token) {
//!             Ok(media) => println!("{token}: {} bytes ({})", media.bytes.len(), media.kind),
//!             Err(e) if e.is_attachment_error() => println!("Attachment missing: {token}"),
//!             Err(e) => return Err(e),
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "zip-archive"))]
//! # fn main() {}
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatParser`](parser::ChatParser) and [`parse_str`]
//! - [`parsing`] - header classifier, accumulator, finalizer, system line detector
//! - [`chat`] - [`ParsedChat`], participants, [`guess_you`](chat::guess_you), view options
//! - [`archive`] - [`Archive`](archive::Archive) trait, in-memory and zip archives
//! - [`attachment`] - attachment resolution and media classification
//! - [`export`] - loading a whole export archive
//! - [`config`] - parser and output configuration
//! - [`format`], [`output`] - JSON / JSONL / CSV writers
//! - [`error`] - [`ChatzipError`], [`Result`]
//! - [`prelude`] - convenient re-exports

pub mod archive;
pub mod attachment;
pub mod chat;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod message;
pub mod output;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use chat::ParsedChat;
pub use error::{ChatzipError, Result};
pub use message::Message;
pub use parser::parse_str;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatzip::prelude::*;
///
/// let chat = ChatParser::new().parse_str("[1/1/20, 1:00 AM] Ann: hi");
/// assert_eq!(chat.messages[0].sender, "Ann");
/// ```
pub mod prelude {
    pub use crate::Message;
    pub use crate::error::{ChatzipError, Result};

    pub use crate::chat::{ParsedChat, Side, ViewOptions, guess_you, participants};
    pub use crate::config::{OutputConfig, ParserConfig, TrimMode};
    pub use crate::parser::{ChatParser, parse_str};

    pub use crate::archive::{Archive, ArchiveEntry, MemoryArchive};
    #[cfg(feature = "zip-archive")]
    pub use crate::archive::ZipArchive;
    pub use crate::attachment::{MediaKind, ResolvedAttachment, resolve_all, resolve_attachment};
    pub use crate::export::ChatExport;

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
    #[cfg(feature = "csv-output")]
    pub use crate::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::output::{to_json, to_jsonl, write_json, write_jsonl};
}
