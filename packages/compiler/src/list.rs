//! Text normalization for inserted content

use crate::requests::{BULLET_PRESET, NUMBERED_PRESET};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFamily {
    Bullet,
    Numbered,
}

impl ListFamily {
    pub fn preset(&self) -> &'static str {
        match self {
            ListFamily::Bullet => BULLET_PRESET,
            ListFamily::Numbered => NUMBERED_PRESET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub text: String,
    pub list: Option<ListFamily>,
}

/// Append a trailing newline unless the text is empty or already ends in one
pub fn normalize_insert_text(text: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{}\n", text)
    }
}

/// Split a list marker off a line
pub fn strip_list_marker(line: &str) -> Option<(&str, ListFamily)> {
    for marker in ["• ", "- ", "* "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some((rest, ListFamily::Bullet));
        }
    }
    strip_numbered_marker(line).map(|rest| (rest, ListFamily::Numbered))
}

/// `digits ('.' | ')') whitespace+`, optionally indented
fn strip_numbered_marker(line: &str) -> Option<&str> {
    let rest = line.trim_start();
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = rest[digits..].strip_prefix(['.', ')'])?;
    let body = rest.trim_start();
    if body.len() == rest.len() {
        return None;
    }
    Some(body)
}

/// Detect a uniform list in replacement text.
///
/// Only when every non-blank line carries a marker of the same family are
/// the markers stripped; otherwise the text is kept verbatim.
pub fn normalize_list_text(text: &str) -> NormalizedText {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        return NormalizedText {
            text: String::new(),
            list: None,
        };
    }

    let mut family = None;
    let mut stripped = Vec::new();
    for line in trimmed.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            stripped.push(line);
            continue;
        }
        match strip_list_marker(line) {
            Some((rest, found)) if family.map_or(true, |f| f == found) => {
                family = Some(found);
                stripped.push(rest);
            }
            _ => {
                return NormalizedText {
                    text: normalize_insert_text(text),
                    list: None,
                }
            }
        }
    }

    NormalizedText {
        text: normalize_insert_text(&stripped.join("\n")),
        list: family,
    }
}
