//! Per-message text finalization.
//!
//! Runs once for every completed message, before it is emitted:
//!
//! 1. every `<attached: FILENAME>` marker contributes `FILENAME` (trimmed) to
//!    [`Message::attachments`], in order of appearance;
//! 2. [`Message::edited`] is set when `<This message was edited>` appears
//!    anywhere in the body, before or after attachment markers are removed;
//! 3. attachment markers are removed (repeatedly, until none are left) and
//!    trailing whitespace is stripped according to the [`TrimMode`].
//!
//! Tags are matched case-insensitively.

use std::sync::LazyLock;

use regex::Regex;

use crate::Message;
use crate::config::TrimMode;

static ATTACHED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<attached:\s*([^>]+?)>").expect("attachment marker regex"));

static EDITED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<This message was edited>").expect("edited marker regex"));

/// Placeholder used by [`TrimMode::Sentinel`].
const SENTINEL: char = '%';

/// Seals a message: extracts attachments, detects the edited marker and
/// cleans the body.
///
/// Markers are stripped until none remain, so a marker that only appears once
/// another is removed (`<attached<attached: a.jpg>: b.jpg>`) is extracted too.
/// The edited marker is checked before and after each removal.
///
/// Attachment tokens are appended to any already present on the message and
/// `edited` is only ever raised, never cleared. With [`TrimMode::Plain`],
/// applying `finalize` to its own output returns it unchanged.
/// [`TrimMode::Sentinel`] drops one trailing `%` per call and is therefore
/// meant to run once.
///
/// # Example
///
/// ```
/// use chatzip::Message;
/// use chatzip::config::TrimMode;
/// use chatzip::parsing::finalize;
///
/// let raw = Message::new("1/1/20", "1:00 AM", "Ann", "see <attached: photo.jpg> now  ");
/// let msg = finalize(raw, TrimMode::Plain);
///
/// assert_eq!(msg.attachments, ["photo.jpg"]);
/// assert_eq!(msg.text, "see  now");
/// ```
pub fn finalize(mut msg: Message, mode: TrimMode) -> Message {
    let mut text = std::mem::take(&mut msg.text);

    loop {
        msg.edited |= is_edited(&text);
        let found = extract_attachments(&text);
        if found.is_empty() {
            break;
        }
        msg.attachments.extend(found);
        text = ATTACHED_RE.replace_all(&text, "").into_owned();
    }

    msg.text = trim_trailing(&text, mode);
    msg
}

/// Returns the attachment filename tokens found in `text`, in order.
pub fn extract_attachments(text: &str) -> Vec<String> {
    ATTACHED_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Returns `true` if `text` carries the edited-message marker.
pub fn is_edited(text: &str) -> bool {
    EDITED_RE.is_match(text)
}

/// Strips trailing whitespace per `mode`.
pub fn trim_trailing(text: &str, mode: TrimMode) -> String {
    match mode {
        TrimMode::Plain => text.trim_end().to_string(),
        TrimMode::Sentinel => {
            let trimmed = text.trim_end();
            let mut out = String::with_capacity(text.len());
            out.push_str(trimmed);
            if trimmed.len() < text.len() {
                out.push(SENTINEL);
            }
            if out.ends_with(SENTINEL) {
                out.pop();
            }
            out
        }
    }
}
