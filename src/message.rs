//! Message record produced by the transcript parser.
//!
//! A [`Message`] is created when a header line is matched, accumulates
//! continuation lines, and is sealed exactly once by the finalizer
//! (see [`crate::parsing::finalize`]). After that it is never mutated by
//! the library.
//!
//! # Examples
//!
//! ```
//! use chatzip::Message;
//!
//! let msg = Message::new("8/20/25", "4:44:08 PM", "Ann", "Hello")
//!     .with_attachment("IMG_001.jpg");
//!
//! assert_eq!(msg.sender(), "Ann");
//! assert!(msg.has_attachments());
//! assert!(!msg.is_edited());
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatzip::Message;
//!
//! let msg = Message::new("1/1/20", "1:00 AM", "Bob", "line1\nline2");
//! let json = serde_json::to_string(&msg)?;
//! let parsed: Message = serde_json::from_str(&json)?;
//!
//! assert_eq!(msg, parsed);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format strings tried by [`Message::timestamp`], after the clock has been
/// normalized to `"<date> <clock>[ AM|PM]"`.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
];

/// A single chat message parsed from a transcript.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `date` | `String` | Short-date token as written (`8/20/25`) |
/// | `time` | `String` | Time token as written (`4:44:08 PM`) |
/// | `sender` | `String` | Display name, trimmed |
/// | `text` | `String` | Body with attachment markers removed |
/// | `system` | `bool` | Notification line rather than a human message |
/// | `attachments` | `Vec<String>` | Filename tokens in order of appearance |
/// | `edited` | `bool` | Body carried the edited-message marker |
///
/// `date` and `time` are opaque: they are kept verbatim for display and
/// grouping. Use [`timestamp`](Self::timestamp) when a calendar value is
/// needed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    /// Short-date token in the exporting device's locale.
    pub date: String,

    /// Time token: `H:MM[:SS]` with an optional AM/PM marker.
    pub time: String,

    /// Display name of the author, trimmed of surrounding whitespace.
    pub sender: String,

    /// Message body. May contain newlines for multi-line messages.
    pub text: String,

    /// `true` for notification lines ("X joined using this group's invite
    /// link"). Only set when system detection is enabled.
    #[serde(default)]
    pub system: bool,

    /// Attachment filename tokens extracted from `<attached: ...>` markers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,

    /// `true` when the body contained `<This message was edited>`.
    #[serde(default)]
    pub edited: bool,
}

impl Message {
    /// Creates a finalized message with no attachments, not edited, not system.
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            sender: sender.into(),
            text: text.into(),
            system: false,
            attachments: Vec::new(),
            edited: false,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Appends an attachment token.
    #[must_use]
    pub fn with_attachment(mut self, name: impl Into<String>) -> Self {
        self.attachments.push(name.into());
        self
    }

    /// Sets the edited flag.
    #[must_use]
    pub fn with_edited(mut self, edited: bool) -> Self {
        self.edited = edited;
        self
    }

    /// Sets the system flag.
    #[must_use]
    pub fn with_system(mut self, system: bool) -> Self {
        self.system = system;
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the date token.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the time token.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the attachment tokens.
    pub fn attachments(&self) -> &[String] {
        &self.attachments
    }

    /// Returns `true` if this is a system/notification line.
    pub fn is_system(&self) -> bool {
        self.system
    }

    /// Returns `true` if the message was edited.
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns `true` if the message references at least one attachment.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }

    /// Returns `true` if the body is empty or whitespace-only.
    ///
    /// A media-only message is empty but still has attachments.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Best-effort conversion of `date` + `time` into a calendar value.
    ///
    /// Understands the US short form (`M/D/YY`) with either a 12-hour clock
    /// and AM/PM marker or a 24-hour clock. Returns `None` for anything else;
    /// the raw tokens are still available through [`date`](Self::date) and
    /// [`time`](Self::time).
    ///
    /// ```
    /// use chatzip::Message;
    /// use chrono::Timelike;
    ///
    /// let msg = Message::new("8/20/25", "4:44:08 PM", "Ann", "Hello");
    /// let ts = msg.timestamp().unwrap();
    /// assert_eq!(ts.hour(), 16);
    /// ```
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let candidate = format!("{} {}", self.date.trim(), normalize_clock(&self.time));

        TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&candidate, fmt).ok())
    }
}

/// Rewrites `"4:44:08\u{202f}pm"` / `"4:44PM"` as `"4:44:08 PM"` / `"4:44 PM"`.
fn normalize_clock(time: &str) -> String {
    let time = time.trim();
    let upper = time.to_ascii_uppercase();

    for marker in ["AM", "PM"] {
        if upper.ends_with(marker) {
            let clock = time[..time.len() - marker.len()].trim_end();
            return format!("{clock} {marker}");
        }
    }

    time.to_string()
}
