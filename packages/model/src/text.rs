//! Text helpers
//!
//! Plain-text offsets are counted in UTF-16 code units, the unit the remote
//! document API addresses content in. These helpers convert between those
//! offsets and Rust byte offsets.

/// Trim, collapse internal whitespace runs to one space, lowercase
pub fn normalize_heading_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Byte offset of a UTF-16 offset, `None` when out of range or inside a surrogate pair
pub fn utf16_to_byte(text: &str, offset: usize) -> Option<usize> {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        if units == offset {
            return Some(byte);
        }
        if units > offset {
            return None;
        }
        units += ch.len_utf16();
    }
    (units == offset).then_some(text.len())
}

/// UTF-16 offset of a byte offset that lies on a char boundary
pub fn byte_to_utf16(text: &str, byte: usize) -> usize {
    utf16_len(&text[..byte.min(text.len())])
}

/// Slice `[start, end)` in UTF-16 units
pub fn slice_utf16(text: &str, start: usize, end: usize) -> Option<&str> {
    let from = utf16_to_byte(text, start)?;
    let to = utf16_to_byte(text, end)?;
    text.get(from..to)
}

/// Truncate to `max` chars, ending in `...` when cut
pub fn truncate_snippet(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
