//! Single IRC lines and the text hygiene applied to them.

use std::fmt;

use serde::Serialize;

/// Maximum length of a commit message in bytes (before the suffix).
pub const MAX_MESSAGE_LEN: usize = 300;

/// Maximum length of a name, branch or tag in bytes.
pub const MAX_FIELD_LEN: usize = 100;

/// Longest link placed in a line, in bytes. Longer links are dropped.
pub const MAX_LINK_LEN: usize = 400;

const TRUNCATION_SUFFIX: &str = "...";

const COLOR: u8 = 0x03;

/// Formatting control bytes other than colour: bold, monospace, reset,
/// reverse, italic, strikethrough, underline.
const FORMATTING: [u8; 7] = [0x02, 0x11, 0x0f, 0x16, 0x1d, 0x1e, 0x1f];

/// One message ready for an IRC channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FormattedLine(String);

impl FormattedLine {
    /// Wraps finished text, removing all colour and formatting codes when
    /// `strip` is set.
    pub fn new(text: impl Into<String>, strip: bool) -> Self {
        let text = text.into();
        if strip {
            FormattedLine(strip_colors(&text))
        } else {
            FormattedLine(text)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FormattedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Removes mIRC colour and formatting codes.
///
/// A colour code is `\x03` optionally followed by a one- or two-digit
/// foreground and, only if a foreground is present, `,` and a one- or
/// two-digit background.
///
/// # Examples
///
/// ```
/// use hook_relay::message::strip_colors;
///
/// assert_eq!(strip_colors("\x03[\x0302proj\x03]"), "[proj]");
/// assert_eq!(strip_colors("\x0304,12red on blue\x03"), "red on blue");
/// assert_eq!(strip_colors("\x02bold\x02"), "bold");
/// assert_eq!(strip_colors("plain"), "plain");
/// ```
pub fn strip_colors(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == COLOR {
            out.push_str(&text[start..i]);
            i += 1;
            let fg = leading_digits(&bytes[i..]);
            i += fg;
            if fg > 0
                && bytes.get(i) == Some(&b',')
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
            {
                i += 1;
                i += leading_digits(&bytes[i..]);
            }
            start = i;
        } else if FORMATTING.contains(&bytes[i]) {
            out.push_str(&text[start..i]);
            i += 1;
            start = i;
        } else {
            i += 1;
        }
    }

    out.push_str(&text[start..]);
    out
}

/// Counts up to two leading ASCII digits.
fn leading_digits(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take(2)
        .take_while(|b| b.is_ascii_digit())
        .count()
}

/// Cleans provider-supplied text for inclusion in a line.
///
/// Tabs become spaces, every other control character (CR, LF, NUL, colour
/// and formatting codes) is dropped, surrounding whitespace is trimmed, and
/// the result is capped at `max_len` bytes. Returns `None` if nothing is left.
pub fn clean_field(text: &str, max_len: usize) -> Option<String> {
    let cleaned: String = text
        .chars()
        .map(|c| if c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect();
    let trimmed = cleaned.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(truncate_with_suffix(trimmed, max_len))
    }
}

/// Cleans a link for inclusion in a line.
///
/// A truncated URL points nowhere, so a link over [`MAX_LINK_LEN`] bytes is
/// dropped instead of shortened.
pub fn clean_link(url: &str) -> Option<String> {
    clean_field(url, usize::MAX).filter(|url| url.len() <= MAX_LINK_LEN)
}

/// Reduces a commit message to its first line, cleaned and bounded.
pub fn commit_subject(message: &str) -> String {
    let first = message.trim_start().lines().next().unwrap_or_default();
    clean_field(first, MAX_MESSAGE_LEN).unwrap_or_default()
}

/// Truncates a string to at most `max_len` bytes, ending in "...".
fn truncate_with_suffix(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let content_len = max_len.saturating_sub(TRUNCATION_SUFFIX.len());

    let mut end = content_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}{}", s[..end].trim_end(), TRUNCATION_SUFFIX)
}
