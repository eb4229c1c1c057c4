//! Output format writers.
//!
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of messages - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one message per line - requires `json-output` feature
//!
//! All writers filter messages through [`OutputConfig::includes`](crate::config::OutputConfig::includes).
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatzip::Result<()> {
//! use chatzip::config::OutputConfig;
//! use chatzip::output::{to_csv, write_json, write_jsonl};
//!
//! let chat = chatzip::parse_str("[1/1/20, 1:00 AM] Ann: hi <attached: a.jpg>");
//! let config = OutputConfig::new();
//!
//! write_json(&chat.messages, "chat.json", &config)?;
//! write_jsonl(&chat.messages, "chat.jsonl", &config)?;
//! let csv = to_csv(&chat.messages, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

#[cfg(feature = "json-output")]
use serde::Serialize;

#[cfg(feature = "json-output")]
use crate::Message;

/// Borrowed view of a message for JSON output.
///
/// Flags and empty lists are omitted so plain text messages stay compact.
#[cfg(feature = "json-output")]
#[derive(Serialize)]
struct MessageRecord<'a> {
    date: &'a str,
    time: &'a str,
    sender: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    attachments: &'a [String],
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    edited: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    system: bool,
}

#[cfg(feature = "json-output")]
impl<'a> From<&'a Message> for MessageRecord<'a> {
    fn from(msg: &'a Message) -> Self {
        Self {
            date: &msg.date,
            time: &msg.time,
            sender: &msg.sender,
            text: &msg.text,
            attachments: &msg.attachments,
            edited: msg.edited,
            system: msg.system,
        }
    }
}
