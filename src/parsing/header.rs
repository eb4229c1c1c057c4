//! Header line classification.
//!
//! A header line starts a new message:
//!
//! ```text
//! [8/20/25, 4:44:08 PM] Ann: Hello
//!  ^^^^^^^  ^^^^^^^^^^  ^^^  ^^^^^
//!  date     time        |    content (verbatim, may contain ':')
//!                       sender (up to the first ':')
//! ```
//!
//! Field contract:
//!
//! | Field | Shape |
//! |-------|-------|
//! | date | `D{1,2}/D{1,2}/D{2}` |
//! | time | `H{1,2}:MM[:SS]` then optional whitespace and `AM`/`PM` (any case) |
//! | sender | one or more non-`:` characters, non-empty once trimmed |
//! | content | everything after `": "`; empty when the line ends at the colon |
//!
//! Separators: `[`, then `,` followed by one or more whitespace characters
//! between date and time, `]` followed by exactly one whitespace character
//! before the sender. "Whitespace" is any Unicode whitespace, which covers
//! the U+202F narrow no-break space iOS exports put before AM/PM.
//!
//! The match is anchored at both ends of the line; anything else is a
//! continuation line.

/// The four fields of a matched header line, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLine<'a> {
    /// Short-date token, e.g. `8/20/25`.
    pub date: &'a str,
    /// Time token including any AM/PM marker, e.g. `4:44:08 PM`.
    pub time: &'a str,
    /// Sender with surrounding whitespace trimmed.
    pub sender: &'a str,
    /// Remainder of the line after `": "`.
    pub content: &'a str,
}

/// Returns the header fields if `line` is a header line.
///
/// The caller is expected to have trimmed trailing whitespace from the line.
///
/// # Example
///
/// ```
/// use chatzip::parsing::classify_line;
///
/// let header = classify_line("[8/20/25, 4:44:08 PM] Ann: Hello").unwrap();
/// assert_eq!(header.date, "8/20/25");
/// assert_eq!(header.time, "4:44:08 PM");
/// assert_eq!(header.sender, "Ann");
/// assert_eq!(header.content, "Hello");
///
/// assert!(classify_line("just a continuation").is_none());
/// ```
pub fn classify_line(line: &str) -> Option<HeaderLine<'_>> {
    let mut cur = Cursor::new(line);

    cur.expect('[')?;

    let date_start = cur.pos;
    cur.digits(1, 2)?;
    cur.expect('/')?;
    cur.digits(1, 2)?;
    cur.expect('/')?;
    cur.digits(2, 2)?;
    let date = &line[date_start..cur.pos];

    cur.expect(',')?;
    if cur.skip_whitespace() == 0 {
        return None;
    }

    let time_start = cur.pos;
    cur.digits(1, 2)?;
    cur.expect(':')?;
    cur.digits(2, 2)?;
    if cur.peek() == Some(':') {
        cur.bump();
        cur.digits(2, 2)?;
    }
    cur.meridiem();
    let time = &line[time_start..cur.pos];

    cur.expect(']')?;
    cur.whitespace_char()?;

    let rest = cur.rest();
    let colon = rest.find(':')?;
    if colon == 0 {
        return None;
    }
    let sender = rest[..colon].trim();
    if sender.is_empty() {
        return None;
    }

    let after = &rest[colon + 1..];
    let content = match after.chars().next() {
        None => "",
        Some(c) if c.is_whitespace() => &after[c.len_utf8()..],
        Some(_) => return None,
    };

    Some(HeaderLine {
        date,
        time,
        sender,
        content,
    })
}

/// Returns `true` if `line` is a header line.
pub fn is_header_line(line: &str) -> bool {
    classify_line(line).is_some()
}

/// Byte cursor over a single line.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn expect(&mut self, want: char) -> Option<()> {
        if self.peek()? == want {
            self.bump();
            Some(())
        } else {
            None
        }
    }

    /// Consumes between `min` and `max` ASCII digits.
    fn digits(&mut self, min: usize, max: usize) -> Option<()> {
        let count = self
            .rest()
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if count < min {
            return None;
        }
        self.pos += count;
        Some(())
    }

    /// Consumes exactly one whitespace character.
    fn whitespace_char(&mut self) -> Option<()> {
        match self.peek() {
            Some(c) if c.is_whitespace() => {
                self.pos += c.len_utf8();
                Some(())
            }
            _ => None,
        }
    }

    /// Consumes a whitespace run and returns how many characters it had.
    fn skip_whitespace(&mut self) -> usize {
        let mut n = 0;
        while self.whitespace_char().is_some() {
            n += 1;
        }
        n
    }

    /// Consumes an optional `[ws]AM` / `[ws]PM` marker, or nothing at all.
    fn meridiem(&mut self) {
        let saved = self.pos;
        let _ = self.whitespace_char();

        let marker = self.rest().as_bytes();
        if marker.len() >= 2
            && matches!(marker[0].to_ascii_uppercase(), b'A' | b'P')
            && marker[1].eq_ignore_ascii_case(&b'M')
        {
            self.pos += 2;
        } else {
            self.pos = saved;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_header() {
        let h = classify_line("[8/20/25, 4:44:08 PM] Ann: Hello").unwrap();
        assert_eq!(
            h,
            HeaderLine {
                date: "8/20/25",
                time: "4:44:08 PM",
                sender: "Ann",
                content: "Hello",
            }
        );
    }

    #[test]
    fn test_two_digit_fields_without_seconds() {
        let h = classify_line("[12/31/99, 11:59 AM] Bob Smith: Bye").unwrap();
        assert_eq!(h.date, "12/31/99");
        assert_eq!(h.time, "11:59 AM");
        assert_eq!(h.sender, "Bob Smith");
    }

    #[test]
    fn test_meridiem_variants() {
        assert_eq!(classify_line("[1/1/20, 1:00 am] A: x").unwrap().time, "1:00 am");
        assert_eq!(classify_line("[1/1/20, 1:00PM] A: x").unwrap().time, "1:00PM");
        assert_eq!(
            classify_line("[1/1/20, 1:00\u{202f}PM] A: x").unwrap().time,
            "1:00\u{202f}PM"
        );
        // 24-hour exports carry no marker
        assert_eq!(classify_line("[1/1/20, 13:00] A: x").unwrap().time, "13:00");
    }

    #[test]
    fn test_whitespace_before_bracket_without_marker_rejected() {
        assert!(classify_line("[1/1/20, 1:00 ] A: x").is_none());
    }

    #[test]
    fn test_multiple_spaces_after_comma() {
        let h = classify_line("[1/1/20,   1:00 AM] A: x").unwrap();
        assert_eq!(h.time, "1:00 AM");
    }

    #[test]
    fn test_content_keeps_colons() {
        let h = classify_line("[1/1/20, 1:00 AM] Ann: meet at 10:30: ok?").unwrap();
        assert_eq!(h.sender, "Ann");
        assert_eq!(h.content, "meet at 10:30: ok?");
    }

    #[test]
    fn test_empty_content() {
        let h = classify_line("[1/1/20, 1:00 AM] Ann:").unwrap();
        assert_eq!(h.sender, "Ann");
        assert_eq!(h.content, "");
    }

    #[test]
    fn test_sender_is_trimmed() {
        let h = classify_line("[1/1/20, 1:00 AM]  Ann : hi").unwrap();
        assert_eq!(h.sender, "Ann");
    }

    #[test]
    fn test_sender_with_emoji() {
        let h = classify_line("[1/1/20, 1:00 AM] Ann ❤️: hi").unwrap();
        assert_eq!(h.sender, "Ann ❤️");
    }

    #[test]
    fn test_rejects_malformed() {
        // year must be two digits
        assert!(classify_line("[1/1/2020, 1:00 AM] A: x").is_none());
        // three-digit month
        assert!(classify_line("[100/1/20, 1:00 AM] A: x").is_none());
        // missing space after comma
        assert!(classify_line("[1/1/20,1:00 AM] A: x").is_none());
        // minutes must be two digits
        assert!(classify_line("[1/1/20, 1:0 AM] A: x").is_none());
        // no space after bracket
        assert!(classify_line("[1/1/20, 1:00 AM]A: x").is_none());
        // colon not followed by whitespace
        assert!(classify_line("[1/1/20, 1:00 AM] A:x").is_none());
        // no sender
        assert!(classify_line("[1/1/20, 1:00 AM] : x").is_none());
        assert!(classify_line("[1/1/20, 1:00 AM]   : x").is_none());
        // no colon at all
        assert!(classify_line("[1/1/20, 1:00 AM] Ann joined").is_none());
        // not anchored at the start
        assert!(classify_line(" [1/1/20, 1:00 AM] A: x").is_none());
        // EU export shape
        assert!(classify_line("[15.01.24, 10:30:45] A: x").is_none());
        assert!(classify_line("").is_none());
    }

    #[test]
    fn test_is_header_line() {
        assert!(is_header_line("[1/1/20, 1:00 AM] A: x"));
        assert!(!is_header_line("line2"));
    }
}
