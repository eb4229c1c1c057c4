//! Edge cases of the transcript grammar and text cleanup.

use chatzip::config::{ParserConfig, TrimMode};
use chatzip::parser::ChatParser;
use chatzip::parse_str;
use chatzip::parsing::{classify_line, is_header_line};

// ============================================================================
// Header grammar
// ============================================================================

#[test]
fn test_header_variants_accepted() {
    for line in [
        "[1/2/20, 3:04 AM] Ann: x",
        "[12/31/99, 11:59:59 PM] Ann: x",
        "[1/2/20,   3:04 AM] Ann: x",
        "[1/2/20, 3:04AM] Ann: x",
        "[1/2/20, 3:04 pm] Ann: x",
        "[1/2/20, 15:04] Ann: x",
        "[1/2/20, 3:04\u{202f}PM] Ann: x",
        "[1/2/20, 3:04 AM] Ann:",
    ] {
        assert!(is_header_line(line), "expected header: {line:?}");
    }
}

#[test]
fn test_header_variants_rejected() {
    for line in [
        "",
        "1/2/20, 3:04 AM - Ann: x",
        "[1/2/2020, 3:04 AM] Ann: x",
        "[123/2/20, 3:04 AM] Ann: x",
        "[1/2/20 3:04 AM] Ann: x",
        "[1/2/20,3:04 AM] Ann: x",
        "[1/2/20, 3:4 AM] Ann: x",
        "[1/2/20, 3:04 AM]Ann: x",
        "[1/2/20, 3:04 AM] Ann x",
        "[1/2/20, 3:04 AM] Ann:x",
        "[1/2/20, 3:04 AM] : x",
        "[1/2/20, 3:04 AM]  : x",
        " [1/2/20, 3:04 AM] Ann: x",
    ] {
        assert!(!is_header_line(line), "expected continuation: {line:?}");
    }
}

#[test]
fn test_sender_ends_at_first_colon() {
    let header = classify_line("[1/2/20, 3:04 AM] Ann: re: meeting at 10:30").unwrap();
    assert_eq!(header.sender, "Ann");
    assert_eq!(header.content, "re: meeting at 10:30");
}

#[test]
fn test_sender_is_trimmed() {
    let header = classify_line("[1/2/20, 3:04 AM] Ann Lee   : hi").unwrap();
    assert_eq!(header.sender, "Ann Lee");
}

#[test]
fn test_sender_with_phone_number_and_emoji() {
    let header = classify_line("[1/2/20, 3:04 AM] +1 (555) 010-9999 🌸: hi").unwrap();
    assert_eq!(header.sender, "+1 (555) 010-9999 🌸");
}

#[test]
fn test_malformed_header_becomes_continuation() {
    let chat = parse_str("[1/1/20, 1:00 AM] Ann: one\n[1/1/20, 1:00] Bob x\n[13/45/99, 1:00 AM] Cy: two");
    // the second line has no sender colon; the third is syntactically valid
    assert_eq!(chat.len(), 2);
    assert_eq!(chat.messages[0].text, "one\n[1/1/20, 1:00] Bob x");
    assert_eq!(chat.messages[1].sender, "Cy");
}

// ============================================================================
// Accumulation
// ============================================================================

#[test]
fn test_leading_lines_before_first_header_are_dropped() {
    let chat = parse_str("exported from WhatsApp\n\n[1/1/20, 1:00 AM] Ann: hi");
    assert_eq!(chat.len(), 1);
    assert_eq!(chat.messages[0].text, "hi");
}

#[test]
fn test_header_with_empty_content_then_continuation() {
    let chat = parse_str("[1/1/20, 1:00 AM] Ann:\nbody starts here");
    assert_eq!(chat.messages[0].text, "body starts here");
}

#[test]
fn test_trailing_whitespace_lines_trimmed() {
    let chat = parse_str("[1/1/20, 1:00 AM] Ann: a \t\r\n  b  \r\n\r\n");
    assert_eq!(chat.messages[0].text, "a\n  b");
}

#[test]
fn test_only_whitespace_input() {
    assert!(parse_str("\n\n   \r\n\t").is_empty());
}

#[test]
fn test_unicode_content() {
    let chat = parse_str("[1/1/20, 1:00 AM] Иван: Привет 👋\n日本語の行");
    assert_eq!(chat.messages[0].sender, "Иван");
    assert_eq!(chat.messages[0].text, "Привет 👋\n日本語の行");
}

// ============================================================================
// Finalization
// ============================================================================

#[test]
fn test_attachment_marker_case_insensitive() {
    let chat = parse_str("[1/1/20, 1:00 AM] Ann: <ATTACHED:IMG.JPG>");
    assert_eq!(chat.messages[0].attachments, ["IMG.JPG"]);
    assert_eq!(chat.messages[0].text, "");
}

#[test]
fn test_attachment_on_continuation_line() {
    let chat = parse_str("[1/1/20, 1:00 AM] Ann: caption\n<attached: a.jpg>\n<attached: b.jpg>");
    assert_eq!(chat.messages[0].attachments, ["a.jpg", "b.jpg"]);
    assert_eq!(chat.messages[0].text, "caption");
}

#[test]
fn test_unclosed_marker_is_left_alone() {
    let chat = parse_str("[1/1/20, 1:00 AM] Ann: <attached: a.jpg");
    assert!(chat.messages[0].attachments.is_empty());
    assert_eq!(chat.messages[0].text, "<attached: a.jpg");
}

#[test]
fn test_edited_marker_case_insensitive() {
    let chat = parse_str("[1/1/20, 1:00 AM] Ann: ok <this MESSAGE was edited>");
    assert!(chat.messages[0].edited);
}

#[test]
fn test_sentinel_quirk_only_in_legacy_mode() {
    let legacy = ChatParser::with_config(ParserConfig::new().with_trim_mode(TrimMode::Sentinel));

    let chat = legacy.parse_str("[1/1/20, 1:00 AM] Ann: discount 20%\n[1/1/20, 1:01 AM] Ann: 20%%");
    assert_eq!(chat.messages[0].text, "discount 20");
    assert_eq!(chat.messages[1].text, "20%");

    let chat = parse_str("[1/1/20, 1:00 AM] Ann: discount 20%");
    assert_eq!(chat.messages[0].text, "discount 20%");
}

#[test]
fn test_bidi_marks_inside_header() {
    let chat = parse_str("\u{200e}[1/1/20, 1:00 AM] Ann: \u{200f}hi");
    assert_eq!(chat.len(), 1);
    assert_eq!(chat.messages[0].text, "hi");
}
