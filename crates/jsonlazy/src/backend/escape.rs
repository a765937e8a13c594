//! JSON string escape decoding.
//!
//! The [`UnicodeEscapeBuffer`] type accumulates exactly four ASCII hexadecimal
//! digits (`0-9`, `A-F`, `a-f`) into a UTF-16 code unit as they arrive. The
//! decoder pairs high and low surrogates into a single `char`.
//!
//! # Errors
//!
//! - In strict mode, an unknown escape, a non-hexadecimal digit, an unpaired
//!   surrogate, or a trailing backslash is reported as a [`FormatError`].
//! - In lenient mode the offending bytes are copied through verbatim.

use alloc::{borrow::Cow, string::String};
use core::str::Chars;

use crate::error::FormatError;

#[derive(Debug)]
/// Accumulates up to four hexadecimal digits into a UTF-16 code unit.
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    /// Creates a new, empty `UnicodeEscapeBuffer`.
    pub fn new() -> Self {
        Self { acc: 0, len: 0 }
    }

    /// Clears any accumulated digits, returning the buffer to its initial
    /// state.
    pub fn reset(&mut self) {
        self.acc = 0;
        self.len = 0;
    }

    /// Convert a single ASCII hex digit into its 0..=15 value.
    #[inline]
    fn hex_val(c: char) -> Option<u16> {
        c.to_digit(16).and_then(|d| u16::try_from(d).ok())
    }

    /// Feeds a single ASCII hexadecimal digit into the buffer.
    ///
    /// - Returns `Ok(None)` if fewer than four digits have been provided so
    ///   far.
    /// - Returns `Ok(Some(unit))` once four digits have been accumulated, and
    ///   resets the buffer.
    /// - Returns `Err` if `c` is not an ASCII hex digit.
    pub fn feed(&mut self, c: char) -> Result<Option<u16>, FormatError> {
        let d = Self::hex_val(c).ok_or(FormatError::InvalidUnicodeEscapeChar(c))?;

        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.reset();
        Ok(Some(unit))
    }
}

fn read_unit(chars: &mut Chars<'_>) -> Result<u16, FormatError> {
    let mut buf = UnicodeEscapeBuffer::new();
    loop {
        let c = chars.next().ok_or(FormatError::UnexpectedEnd)?;
        if let Some(unit) = buf.feed(c)? {
            return Ok(unit);
        }
    }
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..0xDC00).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..0xE000).contains(&unit)
}

/// Decodes the `XXXX` of a `\uXXXX` escape, consuming a following low
/// surrogate escape when `XXXX` is a high surrogate.
fn read_unicode_escape(chars: &mut Chars<'_>) -> Result<char, FormatError> {
    let unit = read_unit(chars)?;
    if is_low_surrogate(unit) {
        return Err(FormatError::LoneSurrogate(unit));
    }
    if !is_high_surrogate(unit) {
        return char::from_u32(u32::from(unit)).ok_or(FormatError::LoneSurrogate(unit));
    }

    let mut lookahead = chars.clone();
    if lookahead.next() != Some('\\') || lookahead.next() != Some('u') {
        return Err(FormatError::LoneSurrogate(unit));
    }
    let low = read_unit(&mut lookahead)?;
    if !is_low_surrogate(low) {
        return Err(FormatError::LoneSurrogate(unit));
    }
    *chars = lookahead;
    let code = 0x1_0000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code).ok_or(FormatError::LoneSurrogate(unit))
}

fn read_escape(chars: &mut Chars<'_>) -> Result<char, FormatError> {
    match chars.next().ok_or(FormatError::UnexpectedEnd)? {
        '"' => Ok('"'),
        '\\' => Ok('\\'),
        '/' => Ok('/'),
        'b' => Ok('\u{0008}'),
        'f' => Ok('\u{000C}'),
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        't' => Ok('\t'),
        'u' => read_unicode_escape(chars),
        other => Err(FormatError::InvalidEscape(other)),
    }
}

fn decode(text: &str, strict: bool) -> Result<String, FormatError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let before = chars.clone();
        match read_escape(&mut chars) {
            Ok(decoded) => out.push(decoded),
            Err(err) if strict => return Err(err),
            Err(_) => {
                // Keep the backslash and resume right after it.
                out.push('\\');
                chars = before;
            }
        }
    }
    Ok(out)
}

/// Decodes every escape in `text`, failing on the first malformed one.
pub(crate) fn decode_strict(text: &str) -> Result<String, FormatError> {
    decode(text, true)
}

/// Decodes escapes when there are any, copying malformed escapes verbatim.
pub(crate) fn decode_lenient(text: &str) -> Cow<'_, str> {
    if !text.contains('\\') {
        return Cow::Borrowed(text);
    }
    match decode(text, false) {
        Ok(decoded) => Cow::Owned(decoded),
        Err(_) => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_decoding() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed('0').unwrap(), None);
        assert_eq!(buf.feed('0').unwrap(), None);
        assert_eq!(buf.feed('4').unwrap(), None);
        assert_eq!(buf.feed('1').unwrap(), Some(0x41));
    }

    #[test]
    fn reset_clears_buffer() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert!(buf.feed('F').unwrap().is_none());
        buf.reset();
        for ch in "004".chars() {
            assert!(buf.feed(ch).unwrap().is_none());
        }
        assert_eq!(buf.feed('2').unwrap(), Some(0x42));
    }

    #[test]
    fn invalid_hex_error() {
        let mut buf = UnicodeEscapeBuffer::new();
        let err = buf.feed('G').unwrap_err();
        assert!(matches!(err, FormatError::InvalidUnicodeEscapeChar('G')));
    }

    #[test]
    fn decodes_simple_escapes() {
        assert_eq!(
            decode_strict(r#"a\"b\\c\/d\be\ff\ng\rh\ti"#).unwrap(),
            "a\"b\\c/d\u{8}e\u{c}f\ng\rh\ti"
        );
    }

    #[test]
    fn decodes_surrogate_pair() {
        assert_eq!(decode_strict(r"\ud83d\ude00!").unwrap(), "\u{1F600}!");
        assert_eq!(decode_strict(r"\u00e9t\u00E9").unwrap(), "\u{e9}t\u{e9}");
    }

    #[test]
    fn strict_rejects_malformed() {
        assert!(matches!(
            decode_strict(r"\q"),
            Err(FormatError::InvalidEscape('q'))
        ));
        assert!(matches!(
            decode_strict(r"\ud83d"),
            Err(FormatError::LoneSurrogate(0xD83D))
        ));
        assert!(matches!(
            decode_strict(r"\ude00"),
            Err(FormatError::LoneSurrogate(0xDE00))
        ));
        assert!(matches!(decode_strict("abc\\"), Err(FormatError::UnexpectedEnd)));
        assert!(matches!(decode_strict(r"\u12"), Err(FormatError::UnexpectedEnd)));
    }

    #[test]
    fn lenient_borrows_without_backslash() {
        assert!(matches!(decode_lenient("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn lenient_keeps_bad_escapes() {
        assert_eq!(decode_lenient(r"a\qb\n"), "a\\qb\n");
        assert_eq!(decode_lenient(r"\ud83d x"), "\\ud83d x");
    }
}
