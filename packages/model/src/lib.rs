//! # Docsel document model
//!
//! Turns the nested document tree returned by the remote API into a flat,
//! ordered list of [`Block`]s plus lookup tables (heading text, heading
//! nesting, positions). Each paragraph carries a [`RangeMap`] translating
//! plain-text offsets into API indices.
//!
//! A model is built once per fetched snapshot and never mutated.

pub mod block;
pub mod builder;
pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod inline_objects;
pub mod model;
pub mod range_map;
pub mod raw;
pub mod text;
pub mod views;

pub use block::{
    is_monospace_family, ApiRange, Block, BlockContent, BlockFlags, BlockType, HeadingRef, InlineRun, InlineSource,
    Paragraph, ParagraphStyle, TextStyle, CODE_FONT_FAMILY,
};
pub use builder::build_document_model;
pub use error::{ModelError, ModelResult};
pub use inline_objects::{inline_image_blocks, inline_image_node_id, INLINE_IMAGE_KIND};
pub use model::{DocumentModel, ModelIndex};
pub use range_map::{RangeMap, RangeMapBuilder, RangeSegment};
pub use raw::{RawDocument, RgbColor};
pub use text::{normalize_heading_text, slice_utf16, utf16_len};
pub use views::{ListEntry, ObjectCounts, OutlineEntry};
