//! Plain-text offset to API index translation for one paragraph

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Maps `[text_start, text_end)` of the plain text onto `[doc_start, doc_end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSegment {
    pub text_start: usize,
    pub text_end: usize,
    pub doc_start: usize,
    pub doc_end: usize,
}

impl RangeSegment {
    pub fn len(&self) -> usize {
        self.text_end - self.text_start
    }

    pub fn is_empty(&self) -> bool {
        self.text_end == self.text_start
    }
}

/// Segments partition `[0, text_length]` in order, with no gaps or overlaps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeMap {
    pub segments: Vec<RangeSegment>,
    pub text_length: usize,
}

impl RangeMap {
    /// API index for a plain-text offset.
    ///
    /// An offset sitting exactly on a segment boundary maps to the end of the
    /// earlier segment. `fallback` is returned when there are no segments.
    pub fn map_offset(&self, offset: usize, fallback: usize) -> ModelResult<usize> {
        if offset > self.text_length {
            return Err(ModelError::offset_out_of_bounds(offset, self.text_length));
        }
        let Some(last) = self.segments.last() else {
            return Ok(fallback);
        };

        for segment in &self.segments {
            if offset < segment.text_start || offset > segment.text_end {
                continue;
            }
            if offset == segment.text_end {
                return Ok(segment.doc_end);
            }
            return Ok(segment.doc_start + (offset - segment.text_start));
        }

        Ok(last.doc_end)
    }

    /// End of the paragraph's content in API space.
    ///
    /// Trailing-newline trimming can leave the last segment behind the stored
    /// end, and inline objects after the last run can push the stored end
    /// past it, so the larger of the two wins.
    pub fn end_index(&self, api_end: usize) -> usize {
        match self.segments.last() {
            Some(last) => api_end.max(last.doc_end),
            None => api_end,
        }
    }
}

/// Accumulates segments while walking inline elements left to right
#[derive(Debug, Default)]
pub struct RangeMapBuilder {
    text: String,
    cursor: usize,
    segments: Vec<RangeSegment>,
}

impl RangeMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A text run advances both the text cursor and the API index
    pub fn push_text(&mut self, content: &str, doc_start: usize) {
        let length = crate::text::utf16_len(content);
        self.segments.push(RangeSegment {
            text_start: self.cursor,
            text_end: self.cursor + length,
            doc_start,
            doc_end: doc_start + length,
        });
        self.cursor += length;
        self.text.push_str(content);
    }

    /// Drop trailing newlines from the text and shrink or remove the trailing
    /// segments by the same amount
    pub fn finish(mut self) -> (String, RangeMap) {
        let mut remaining = 0;
        while self.text.ends_with('\n') {
            self.text.pop();
            remaining += 1;
        }

        while remaining > 0 {
            let Some(segment) = self.segments.last_mut() else {
                break;
            };
            let length = segment.len();
            if length <= remaining {
                remaining -= length;
                self.segments.pop();
            } else {
                segment.text_end -= remaining;
                segment.doc_end -= remaining;
                remaining = 0;
            }
        }

        let text_length = crate::text::utf16_len(&self.text);
        (
            self.text,
            RangeMap {
                segments: self.segments,
                text_length,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello_world() -> RangeMap {
        let mut builder = RangeMapBuilder::new();
        builder.push_text("Hello ", 8);
        builder.push_text("world\n", 14);
        builder.finish().1
    }

    #[test]
    fn test_finish_trims_trailing_newline() {
        let mut builder = RangeMapBuilder::new();
        builder.push_text("Hello world\n", 8);
        let (text, map) = builder.finish();
        assert_eq!(text, "Hello world");
        assert_eq!(map.text_length, 11);
        assert_eq!(map.segments[0].doc_end, 19);
    }

    #[test]
    fn test_finish_removes_newline_only_segment() {
        let mut builder = RangeMapBuilder::new();
        builder.push_text("Title", 1);
        builder.push_text("\n", 6);
        let (text, map) = builder.finish();
        assert_eq!(text, "Title");
        assert_eq!(map.segments.len(), 1);
        assert_eq!(map.segments[0].text_end, 5);
    }

    #[test]
    fn test_map_offset_within_and_at_boundaries() {
        let map = hello_world();
        assert_eq!(map.map_offset(0, 0).unwrap(), 8);
        assert_eq!(map.map_offset(6, 0).unwrap(), 14);
        assert_eq!(map.map_offset(8, 0).unwrap(), 16);
        assert_eq!(map.map_offset(11, 0).unwrap(), 19);
    }

    #[test]
    fn test_map_offset_skips_inline_object_gap() {
        let mut builder = RangeMapBuilder::new();
        builder.push_text("ab", 1);
        // an inline object occupies index 3
        builder.push_text("cd\n", 4);
        let (_, map) = builder.finish();
        assert_eq!(map.map_offset(1, 0).unwrap(), 2);
        assert_eq!(map.map_offset(2, 0).unwrap(), 3);
        assert_eq!(map.map_offset(3, 0).unwrap(), 5);
    }

    #[test]
    fn test_map_offset_out_of_bounds() {
        let map = hello_world();
        assert!(matches!(
            map.map_offset(12, 0),
            Err(ModelError::OffsetOutOfBounds { offset: 12, length: 11 })
        ));
    }

    #[test]
    fn test_empty_map_uses_fallback() {
        let map = RangeMap::default();
        assert_eq!(map.map_offset(0, 42).unwrap(), 42);
        assert_eq!(map.end_index(43), 43);
    }

    #[test]
    fn test_end_index_takes_larger_bound() {
        let map = hello_world();
        assert_eq!(map.end_index(22), 22);
        assert_eq!(map.end_index(15), 19);
    }
}
