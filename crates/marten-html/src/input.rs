//! The input stream the tokenizer reads from.
//!
//! [§ 13.2.3 The input byte stream](https://html.spec.whatwg.org/multipage/parsing.html#the-input-byte-stream)
//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)

use marten_common::SourcePosition;

/// Decoded, newline-normalized characters with a read cursor.
///
/// "Before the tokenization stage, the input stream must be preprocessed by
/// normalizing newlines." CR LF pairs and lone CRs both become LF, so the
/// tokenizer never sees U+000D.
#[derive(Debug, Clone)]
pub struct InputStream {
    chars: Vec<char>,
    index: usize,
    /// Position of the next unread character.
    next_position: SourcePosition,
    /// Position of the most recently consumed character.
    current_position: SourcePosition,
}

impl InputStream {
    /// Wrap already-decoded text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self::from_chars(text.chars())
    }

    /// Decode `bytes` as UTF-8 (invalid sequences become U+FFFD) or, when
    /// `is_utf8` is false, as windows-1252.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], is_utf8: bool) -> Self {
        if is_utf8 {
            let decoded = String::from_utf8_lossy(bytes);
            Self::new(decoded.strip_prefix('\u{FEFF}').unwrap_or(&*decoded))
        } else {
            Self::from_chars(bytes.iter().map(|&b| decode_windows_1252(b)))
        }
    }

    fn from_chars(chars: impl Iterator<Item = char>) -> Self {
        let mut normalized = Vec::new();
        let mut previous_was_cr = false;
        for c in chars {
            match c {
                '\r' => {
                    normalized.push('\n');
                    previous_was_cr = true;
                }
                '\n' if previous_was_cr => previous_was_cr = false,
                c => {
                    normalized.push(c);
                    previous_was_cr = false;
                }
            }
        }
        Self {
            chars: normalized,
            index: 0,
            next_position: SourcePosition::START,
            current_position: SourcePosition::START,
        }
    }

    /// "Consume the next input character". Returns `None` at EOF.
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.chars.get(self.index).copied();
        self.current_position = self.next_position;
        if let Some(c) = c {
            self.index += 1;
            self.next_position = self.next_position.advance(c);
        }
        c
    }

    /// Look ahead `offset` characters past the current one without consuming.
    #[must_use]
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).copied()
    }

    /// "If the next few characters are..." (exact match).
    #[must_use]
    pub fn starts_with(&self, target: &str) -> bool {
        target
            .chars()
            .enumerate()
            .all(|(i, t)| self.peek(i) == Some(t))
    }

    /// "... an ASCII case-insensitive match for ..."
    #[must_use]
    pub fn starts_with_ignore_ascii_case(&self, target: &str) -> bool {
        target
            .chars()
            .enumerate()
            .all(|(i, t)| self.peek(i).is_some_and(|c| c.eq_ignore_ascii_case(&t)))
    }

    /// Consume `count` characters, e.g. after a successful lookahead.
    pub fn skip(&mut self, count: usize) {
        for _ in 0..count {
            if self.next_char().is_none() {
                break;
            }
        }
    }

    /// Position of the character most recently consumed.
    #[must_use]
    pub const fn current_position(&self) -> SourcePosition {
        self.current_position
    }

    /// Whether every character has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.index >= self.chars.len()
    }
}

/// The 0x80..=0x9F block of windows-1252, which differs from Latin-1.
///
/// Shared with [§ 13.2.5.80](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state),
/// whose replacement table is the same mapping. Unassigned slots map to `None`.
#[must_use]
pub const fn windows_1252_c1(code: u32) -> Option<char> {
    Some(match code {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => return None,
    })
}

fn decode_windows_1252(byte: u8) -> char {
    windows_1252_c1(u32::from(byte)).unwrap_or(char::from(byte))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut input: InputStream) -> String {
        let mut out = String::new();
        while let Some(c) = input.next_char() {
            out.push(c);
        }
        out
    }

    #[test]
    fn newlines_are_normalized() {
        assert_eq!(drain(InputStream::new("a\r\nb\rc\n\r\nd")), "a\nb\nc\n\nd");
    }

    #[test]
    fn windows_1252_bytes_decode() {
        let input = InputStream::from_bytes(&[b'a', 0x80, 0xE9, 0x81], false);
        assert_eq!(drain(input), "a\u{20AC}\u{E9}\u{81}");
    }

    #[test]
    fn utf8_bom_is_dropped() {
        let input = InputStream::from_bytes("\u{FEFF}<p>".as_bytes(), true);
        assert_eq!(drain(input), "<p>");
    }

    #[test]
    fn positions_follow_consumption() {
        let mut input = InputStream::new("a\nb");
        let _ = input.next_char();
        let _ = input.next_char();
        let _ = input.next_char();
        assert_eq!(input.current_position().line, 2);
        assert_eq!(input.current_position().column, 1);
        assert!(input.is_at_end());
    }
}
