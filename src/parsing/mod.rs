//! Transcript parsing building blocks.
//!
//! - [`header`] - header line classification
//! - [`accumulator`] - line → message state machine
//! - [`finalize`] - attachment extraction, edited flag, trailing trim
//! - [`system`] - notification line detection
//!
//! Most callers want [`crate::parser::ChatParser`] or [`crate::parse_str`];
//! these pieces are public for streaming and custom pipelines.

pub mod accumulator;
pub mod finalize;
pub mod header;
pub mod system;

use std::borrow::Cow;

pub use accumulator::{Accumulator, Messages};
pub use finalize::{extract_attachments, finalize, is_edited, trim_trailing};
pub use header::{HeaderLine, classify_line, is_header_line};
pub use system::is_system_message;

const BOM: char = '\u{feff}';
const LRM: char = '\u{200e}';
const RLM: char = '\u{200f}';

/// Strips a leading byte-order mark and every LRM/RLM mark.
///
/// Borrows the input when there is nothing to strip.
///
/// ```
/// use chatzip::parsing::strip_invisible;
///
/// assert_eq!(strip_invisible("\u{feff}[1/1/20, 1:00 AM] A: \u{200e}x"), "[1/1/20, 1:00 AM] A: x");
/// ```
pub fn strip_invisible(text: &str) -> Cow<'_, str> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    if text.contains([LRM, RLM]) {
        Cow::Owned(text.chars().filter(|&c| c != LRM && c != RLM).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Splits on `\n`, dropping a `\r` that precedes it.
///
/// Unlike [`str::lines`], a trailing newline yields a final empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}
