//! Parsed chat, participants and viewer placement.
//!
//! [`ParsedChat`] is what the parser returns: the ordered messages plus the
//! distinct participants. [`guess_you`] implements the "which participant is
//! the viewer" hint, and [`ViewOptions`] carries the view state a renderer
//! passes in explicitly to decide on which side a message goes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::Message;

/// Heart characters used by [`guess_you`].
const HEARTS: &[char] = &['❤', '💕', '💖', '💘'];

/// The result of parsing a transcript.
///
/// # Example
///
/// ```
/// let chat = chatzip::parse_str(
///     "[1/1/20, 1:00 AM] Ann: hi\n[1/1/20, 1:01 AM] Bob: hey\n[1/1/20, 1:02 AM] Ann: ok",
/// );
///
/// assert_eq!(chat.messages.len(), 3);
/// assert_eq!(chat.participants, ["Ann", "Bob"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedChat {
    /// Messages in transcript order.
    pub messages: Vec<Message>,
    /// Distinct non-system senders in order of first appearance.
    pub participants: Vec<String>,
}

impl ParsedChat {
    /// Builds a chat from finalized messages, deriving the participants.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        let participants = participants(&messages);
        Self {
            messages,
            participants,
        }
    }

    /// Returns `true` if no message was parsed.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Heuristic viewer identity, see [`guess_you`].
    pub fn guess_you(&self) -> Option<&str> {
        guess_you(&self.participants)
    }

    /// Iterates over every attachment token in message order.
    pub fn attachments(&self) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .flat_map(|m| m.attachments.iter().map(String::as_str))
    }
}

/// Distinct `sender` values of non-system messages, first appearance first.
///
/// ```
/// use chatzip::Message;
/// use chatzip::chat::participants;
///
/// let msgs = [
///     Message::new("1/1/20", "1:00 AM", "C", "1"),
///     Message::new("1/1/20", "1:00 AM", "A", "2"),
///     Message::new("1/1/20", "1:00 AM", "C", "3"),
///     Message::new("1/1/20", "1:00 AM", "B", "4"),
/// ];
/// assert_eq!(participants(&msgs), ["C", "A", "B"]);
/// ```
pub fn participants(messages: &[Message]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut ordered = Vec::new();

    for msg in messages.iter().filter(|m| !m.system) {
        if seen.insert(msg.sender.as_str()) {
            ordered.push(msg.sender.clone());
        }
    }

    ordered
}

/// Guesses which participant is the viewer.
///
/// Only for one-to-one chats: with exactly two participants, if exactly one
/// name contains a heart (❤ 💕 💖 💘) that name is returned. Otherwise
/// there is no guess. Callers must handle `None`.
///
/// ```
/// use chatzip::chat::guess_you;
///
/// let names = vec!["Ann ❤️".to_string(), "Bob".to_string()];
/// assert_eq!(guess_you(&names), Some("Ann ❤️"));
///
/// let names = vec!["Ann".to_string(), "Bob".to_string()];
/// assert_eq!(guess_you(&names), None);
/// ```
pub fn guess_you(participants: &[String]) -> Option<&str> {
    let [a, b] = participants else {
        return None;
    };

    match (has_heart(a), has_heart(b)) {
        (true, false) => Some(a.as_str()),
        (false, true) => Some(b.as_str()),
        _ => None,
    }
}

fn has_heart(name: &str) -> bool {
    name.contains(HEARTS)
}

/// Splits messages into runs of consecutive messages sharing a `date`.
///
/// A date that reappears later starts a new run; renderers put one date
/// separator in front of each run.
///
/// ```
/// use chatzip::Message;
/// use chatzip::chat::date_runs;
///
/// let msgs = [
///     Message::new("1/1/20", "1:00 AM", "A", "1"),
///     Message::new("1/1/20", "2:00 AM", "B", "2"),
///     Message::new("1/2/20", "1:00 AM", "A", "3"),
/// ];
/// let runs: Vec<_> = date_runs(&msgs).map(|(date, run)| (date, run.len())).collect();
/// assert_eq!(runs, [("1/1/20", 2), ("1/2/20", 1)]);
/// ```
pub fn date_runs(messages: &[Message]) -> impl Iterator<Item = (&str, &[Message])> {
    messages
        .chunk_by(|a, b| a.date == b.date)
        .map(|run| (run[0].date.as_str(), run))
}

/// Horizontal placement of a message bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// View state owned by the rendering layer and passed in per call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOptions {
    /// The participant shown on the right.
    pub you: Option<String>,
    /// Swap left and right.
    pub flip_sides: bool,
}

impl ViewOptions {
    /// Creates options with no viewer and no flip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the viewer identity.
    #[must_use]
    pub fn with_you(mut self, you: impl Into<String>) -> Self {
        self.you = Some(you.into());
        self
    }

    /// Sets the flip flag.
    #[must_use]
    pub fn with_flip_sides(mut self, flip: bool) -> Self {
        self.flip_sides = flip;
        self
    }

    /// Returns the side for `msg`: right iff it was sent by `you`, inverted
    /// when `flip_sides` is set.
    pub fn side_for(&self, msg: &Message) -> Side {
        let mine = self.you.as_deref() == Some(msg.sender.as_str());
        if mine ^ self.flip_sides {
            Side::Right
        } else {
            Side::Left
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(sender: &str) -> Message {
        Message::new("1/1/20", "1:00 AM", sender, "x")
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_participants_first_appearance_order() {
        let msgs = vec![msg("C"), msg("A"), msg("C"), msg("B"), msg("A")];
        assert_eq!(participants(&msgs), ["C", "A", "B"]);
    }

    #[test]
    fn test_participants_skip_system() {
        let msgs = vec![msg("Family").with_system(true), msg("Ann"), msg("Bob")];
        assert_eq!(participants(&msgs), ["Ann", "Bob"]);
    }

    #[test]
    fn test_participants_large_group() {
        let msgs: Vec<Message> = (0..20_000)
            .map(|i| msg(&format!("member{}", i % 500)))
            .collect();
        let result = participants(&msgs);
        assert_eq!(result.len(), 500);
        assert_eq!(result[0], "member0");
        assert_eq!(result[499], "member499");
    }

    #[test]
    fn test_participants_empty() {
        assert!(participants(&[]).is_empty());
    }

    #[test]
    fn test_guess_you_exactly_one_heart() {
        assert_eq!(guess_you(&names(&["Bob", "Ann 💕"])), Some("Ann 💕"));
        assert_eq!(guess_you(&names(&["💘 Ann", "Bob"])), Some("💘 Ann"));
    }

    #[test]
    fn test_guess_you_none() {
        assert_eq!(guess_you(&names(&[])), None);
        assert_eq!(guess_you(&names(&["Ann ❤"])), None);
        assert_eq!(guess_you(&names(&["Ann", "Bob"])), None);
        assert_eq!(guess_you(&names(&["Ann ❤", "Bob 💖"])), None);
        assert_eq!(guess_you(&names(&["Ann ❤", "Bob", "Carol"])), None);
    }

    #[test]
    fn test_parsed_chat_from_messages() {
        let chat = ParsedChat::from_messages(vec![
            msg("Ann").with_attachment("a.jpg"),
            msg("Bob 💖").with_attachment("b.mp4").with_attachment("c.pdf"),
        ]);
        assert_eq!(chat.len(), 2);
        assert!(!chat.is_empty());
        assert_eq!(chat.participants, ["Ann", "Bob 💖"]);
        assert_eq!(chat.guess_you(), Some("Bob 💖"));
        assert_eq!(
            chat.attachments().collect::<Vec<_>>(),
            ["a.jpg", "b.mp4", "c.pdf"]
        );
    }

    #[test]
    fn test_date_runs_restart_on_repeat() {
        let mut a = msg("A");
        a.date = "1/1/20".into();
        let mut b = msg("B");
        b.date = "1/2/20".into();

        let msgs = vec![a.clone(), b, a];
        let dates: Vec<_> = date_runs(&msgs).map(|(d, _)| d).collect();
        assert_eq!(dates, ["1/1/20", "1/2/20", "1/1/20"]);
        assert_eq!(date_runs(&[]).count(), 0);
    }

    #[test]
    fn test_side_for() {
        let view = ViewOptions::new().with_you("Ann");
        assert_eq!(view.side_for(&msg("Ann")), Side::Right);
        assert_eq!(view.side_for(&msg("Bob")), Side::Left);

        let flipped = view.with_flip_sides(true);
        assert_eq!(flipped.side_for(&msg("Ann")), Side::Left);
        assert_eq!(flipped.side_for(&msg("Bob")), Side::Right);

        let nobody = ViewOptions::new();
        assert_eq!(nobody.side_for(&msg("Ann")), Side::Left);
        assert_eq!(nobody.with_flip_sides(true).side_for(&msg("Ann")), Side::Right);
    }
}
