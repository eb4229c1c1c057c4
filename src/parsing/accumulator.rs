//! Single-pass accumulation of transcript lines into messages.
//!
//! The accumulator is a two-state machine:
//!
//! | State | Header line | Continuation line | End of input |
//! |-------|-------------|-------------------|--------------|
//! | `Idle` | start pending → `Accumulating` | dropped | nothing |
//! | `Accumulating` | emit pending, start new | append to pending | emit pending → `Idle` |
//!
//! Emitted messages are finalized (see [`finalize`](super::finalize)) and
//! come out in input order.

use std::iter::Fuse;

use tracing::trace;

use super::finalize::finalize;
use super::header::{HeaderLine, classify_line};
use super::system::is_system_message;
use crate::Message;
use crate::config::ParserConfig;

/// A message whose body is still being accumulated.
#[derive(Debug)]
struct PendingMessage {
    date: String,
    time: String,
    sender: String,
    text: String,
}

impl PendingMessage {
    fn from_header(header: HeaderLine<'_>) -> Self {
        Self {
            date: header.date.to_string(),
            time: header.time.to_string(),
            sender: header.sender.to_string(),
            text: header.content.to_string(),
        }
    }

    fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Accumulating(PendingMessage),
}

/// Push-style accumulator: feed lines, collect finalized messages.
///
/// # Example
///
/// ```
/// use chatzip::config::ParserConfig;
/// use chatzip::parsing::Accumulator;
///
/// let mut acc = Accumulator::new(ParserConfig::default());
/// assert!(acc.push("[1/1/20, 1:00 AM] Bob: line1").is_none());
/// assert!(acc.push("line2").is_none());
///
/// let msg = acc.finish().unwrap();
/// assert_eq!(msg.text, "line1\nline2");
/// ```
#[derive(Debug)]
pub struct Accumulator {
    state: State,
    config: ParserConfig,
    dropped: usize,
}

impl Accumulator {
    /// Creates an idle accumulator.
    pub fn new(config: ParserConfig) -> Self {
        Self {
            state: State::Idle,
            config,
            dropped: 0,
        }
    }

    /// Feeds one physical line. Returns the previous message when `line`
    /// starts a new one.
    ///
    /// Trailing whitespace is trimmed from `line` before it is classified.
    pub fn push(&mut self, line: &str) -> Option<Message> {
        let line = line.trim_end();

        let Some(header) = classify_line(line) else {
            match &mut self.state {
                State::Accumulating(pending) => pending.push_line(line),
                State::Idle => {
                    trace!(line, "dropping line before first header");
                    self.dropped += 1;
                }
            }
            return None;
        };

        let next = State::Accumulating(PendingMessage::from_header(header));
        match std::mem::replace(&mut self.state, next) {
            State::Accumulating(done) => Some(self.seal(done)),
            State::Idle => None,
        }
    }

    /// Ends the input, emitting the in-progress message if there is one.
    ///
    /// The accumulator is `Idle` afterwards and may be reused.
    pub fn finish(&mut self) -> Option<Message> {
        match std::mem::take(&mut self.state) {
            State::Accumulating(pending) => Some(self.seal(pending)),
            State::Idle => None,
        }
    }

    /// Returns `true` while a message is being accumulated.
    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, State::Accumulating(_))
    }

    /// Number of lines dropped because no header had been seen yet.
    pub fn dropped_lines(&self) -> usize {
        self.dropped
    }

    fn seal(&self, pending: PendingMessage) -> Message {
        let raw = Message::new(pending.date, pending.time, pending.sender, pending.text);
        let mut msg = finalize(raw, self.config.trim_mode);

        if self.config.detect_system_messages {
            msg.system = is_system_message(&msg.sender, &msg.text);
        }

        msg
    }
}

/// Iterator adapter yielding finalized messages from a line iterator.
///
/// Holds at most one message in progress; lines are pulled lazily.
///
/// # Example
///
/// ```
/// use chatzip::config::ParserConfig;
/// use chatzip::parsing::Messages;
///
/// let lines = ["[1/1/20, 1:00 AM] Ann: hi", "[1/1/20, 1:01 AM] Bob: hey"];
/// let senders: Vec<_> = Messages::new(lines.iter(), ParserConfig::default())
///     .map(|m| m.sender)
///     .collect();
///
/// assert_eq!(senders, ["Ann", "Bob"]);
/// ```
pub struct Messages<I: Iterator> {
    lines: Fuse<I>,
    acc: Accumulator,
}

impl<I> Messages<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// Wraps a line iterator.
    pub fn new(lines: I, config: ParserConfig) -> Self {
        Self {
            lines: lines.fuse(),
            acc: Accumulator::new(config),
        }
    }

    /// Number of leading lines dropped so far.
    pub fn dropped_lines(&self) -> usize {
        self.acc.dropped_lines()
    }
}

impl<I> Iterator for Messages<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Message;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            if let Some(msg) = self.acc.push(line.as_ref()) {
                return Some(msg);
            }
        }
        self.acc.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrimMode;

    fn collect(lines: &[&str]) -> Vec<Message> {
        Messages::new(lines.iter(), ParserConfig::default()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(collect(&[]).is_empty());
        assert!(collect(&[""]).is_empty());
    }

    #[test]
    fn test_leading_garbage_dropped() {
        let mut messages = Messages::new(
            ["garbage", "", "[1/1/20, 1:00 AM] Ann: hi"].iter(),
            ParserConfig::default(),
        );
        let msg = messages.next().unwrap();
        assert_eq!(msg.text, "hi");
        assert!(messages.next().is_none());
        assert_eq!(messages.dropped_lines(), 2);
    }

    #[test]
    fn test_continuation_lines() {
        let msgs = collect(&["[1/1/20, 1:00 AM] Bob: line1", "line2", "line3"]);
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].text, "line1\nline2\nline3");
    }

    #[test]
    fn test_blank_line_inside_message() {
        let msgs = collect(&["[1/1/20, 1:00 AM] Bob: a", "", "b"]);
        assert_eq!(msgs[0].text, "a\n\nb");
    }

    #[test]
    fn test_empty_header_content_then_continuation() {
        // no separator is inserted while the body is still empty
        let msgs = collect(&["[1/1/20, 1:00 AM] Bob:", "first real line"]);
        assert_eq!(msgs[0].text, "first real line");
    }

    #[test]
    fn test_lines_are_trimmed_at_end() {
        let msgs = collect(&["[1/1/20, 1:00 AM] Bob: a   ", "b\t", "\r"]);
        assert_eq!(msgs[0].text, "a\nb");
    }

    #[test]
    fn test_order_preserved() {
        let msgs = collect(&[
            "[1/1/20, 1:00 AM] C: 1",
            "[1/1/20, 1:01 AM] A: 2",
            "more",
            "[1/1/20, 1:02 AM] B: 3",
        ]);
        let texts: Vec<_> = msgs.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["1", "2\nmore", "3"]);
    }

    #[test]
    fn test_push_and_finish() {
        let mut acc = Accumulator::new(ParserConfig::default());
        assert!(!acc.is_accumulating());
        assert!(acc.push("[1/1/20, 1:00 AM] Ann: one").is_none());
        assert!(acc.is_accumulating());

        let first = acc.push("[1/1/20, 1:01 AM] Bob: two").unwrap();
        assert_eq!(first.sender, "Ann");

        let second = acc.finish().unwrap();
        assert_eq!(second.sender, "Bob");
        assert!(acc.finish().is_none());
        assert!(!acc.is_accumulating());
    }

    #[test]
    fn test_finalizes_with_config() {
        let config = ParserConfig::new()
            .with_trim_mode(TrimMode::Sentinel)
            .with_detect_system_messages(true);
        let msgs: Vec<_> = Messages::new(
            [
                "[1/1/20, 1:00 AM] Ann: 100%",
                "[1/1/20, 1:01 AM] Family: Carol joined using this group's invite link",
            ]
            .iter(),
            config,
        )
        .collect();

        assert_eq!(msgs[0].text, "100");
        assert!(!msgs[0].system);
        assert!(msgs[1].system);
    }

    #[test]
    fn test_iterator_is_fused_after_end() {
        let mut it = Messages::new(["[1/1/20, 1:00 AM] Ann: x"].iter(), ParserConfig::default());
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }
}
