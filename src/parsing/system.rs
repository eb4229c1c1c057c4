//! Detection of WhatsApp notification lines.
//!
//! iOS exports write group notifications with the same header shape as
//! ordinary messages, using the group name as sender:
//!
//! ```text
//! [1/15/24, 10:30:00 AM] Family: Messages and calls are end-to-end encrypted.
//! [1/15/24, 10:31:00 AM] Family: Ann joined using this group's invite link
//! ```
//!
//! The header grammar alone cannot tell these apart from human messages, so
//! detection is phrase based and opt-in through
//! [`ParserConfig::detect_system_messages`](crate::config::ParserConfig).

/// Phrases that only appear in notification lines (matched case-insensitively).
const SYSTEM_PHRASES: &[&str] = &[
    "messages and calls are end-to-end encrypted",
    "created group",
    "created this group",
    "joined using this group's invite link",
    "changed the subject",
    "changed this group's icon",
    "changed the group description",
    "deleted this group's icon",
    "changed their phone number",
    "security code changed",
    "your security code with",
    "you're now an admin",
    "is now an admin",
    "turned on disappearing messages",
    "turned off disappearing messages",
    "changed the group settings",
];

/// Body prefixes for membership changes performed by the viewer.
const SYSTEM_PREFIXES: &[&str] = &["you added ", "you removed ", "you joined", "you left"];

/// Returns `true` if a message looks like a notification line.
///
/// # Example
///
/// ```
/// use chatzip::parsing::is_system_message;
///
/// assert!(is_system_message("Family", "Ann joined using this group's invite link"));
/// assert!(!is_system_message("Ann", "I left my keys at home"));
/// ```
pub fn is_system_message(sender: &str, text: &str) -> bool {
    if sender.trim().is_empty() || sender.to_lowercase().contains("whatsapp") {
        return true;
    }

    let body = text.trim();
    // notifications are always single-line
    if body.contains('\n') {
        return false;
    }

    let lower = body.to_lowercase();

    if SYSTEM_PHRASES.iter().any(|p| lower.contains(p)) {
        return true;
    }

    if SYSTEM_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return true;
    }

    // "Ann left" / "Ann was removed"
    let words = lower.split_whitespace().count();
    words <= 3 && (lower.ends_with(" left") || lower.ends_with(" was removed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encryption_notice() {
        assert!(is_system_message(
            "Family",
            "Messages and calls are end-to-end encrypted. No one outside of this chat, not even WhatsApp, can read or listen to them."
        ));
    }

    #[test]
    fn test_group_events() {
        assert!(is_system_message("Family", "Ann created group \"Family\""));
        assert!(is_system_message("Family", "Bob changed the subject to \"Trip\""));
        assert!(is_system_message("Family", "You added Carol"));
        assert!(is_system_message("Family", "Carol left"));
        assert!(is_system_message("Family", "Dan is now an admin"));
        assert!(is_system_message(
            "Ann",
            "Your security code with Ann changed. Tap to learn more."
        ));
    }

    #[test]
    fn test_sender_based() {
        assert!(is_system_message("", "anything"));
        assert!(is_system_message("   ", "anything"));
        assert!(is_system_message("WhatsApp", "anything"));
    }

    #[test]
    fn test_human_messages_not_flagged() {
        assert!(!is_system_message("Ann", "Hello everyone!"));
        assert!(!is_system_message("Ann", "I left my keys at home"));
        assert!(!is_system_message("Ann", "<attached: photo.jpg>"));
        assert!(!is_system_message("Ann", "I think he left"));
        assert!(!is_system_message(
            "Ann",
            "he created group chats for everything\nso annoying"
        ));
    }
}
