//! Flattens the nested document tree into blocks and index tables
//!
//! One linear pass over the body content. Heading nesting is tracked with a
//! stack: a heading of level `L` first drops every open heading of level
//! `>= L`, so each block's heading path is the innermost active chain.

use crate::block::{
    is_monospace_family, ApiRange, Block, BlockContent, BlockFlags, HeadingRef, InlineRun, Paragraph,
    ParagraphStyle, TextStyle,
};
use crate::model::{DocumentModel, ModelIndex};
use crate::range_map::RangeMapBuilder;
use crate::raw::{
    RawDocument, RawEmbeddedObject, RawParagraph, RawParagraphElement, RawParagraphStyle, RawStructuralElement,
    RawTable, RawTextStyle,
};
use crate::text::normalize_heading_text;
use tracing::{debug, info, instrument};

const BODY_CONTAINER_ID: &str = "body";
const HEADING_STYLE_PREFIX: &str = "HEADING_";

#[instrument(skip(raw), fields(document_id = %raw.document_id, elements = raw.content().len()))]
pub fn build_document_model(raw: &RawDocument) -> DocumentModel {
    info!("Building document model");

    let mut builder = ModelBuilder::default();
    for element in raw.content() {
        builder.add_element(element);
    }

    let body_range = match (builder.blocks.first(), builder.blocks.last()) {
        (Some(first), Some(last)) => ApiRange::new(first.api_range.start, last.api_range.end),
        _ => ApiRange::default(),
    };

    info!(
        blocks = builder.blocks.len(),
        headings = builder.index.headings_in_order.len(),
        "Document model built"
    );

    DocumentModel {
        doc_id: raw.document_id.clone(),
        revision_id: raw.revision_id.clone().unwrap_or_default(),
        title: raw.title.clone(),
        body_range,
        blocks: builder.blocks,
        index: builder.index,
    }
}

#[derive(Default)]
struct ModelBuilder {
    blocks: Vec<Block>,
    index: ModelIndex,
    heading_stack: Vec<HeadingRef>,
    node_counter: usize,
}

impl ModelBuilder {
    fn next_node_id(&mut self) -> String {
        self.node_counter += 1;
        format!("node-{}", self.node_counter)
    }

    fn add_element(&mut self, element: &RawStructuralElement) {
        let start = element.start_index.unwrap_or(0);
        let end = element.end_index.unwrap_or(start);
        let api_range = ApiRange::new(start, end);
        let node_id = self.next_node_id();

        if let Some(paragraph) = &element.paragraph {
            self.add_paragraph(node_id, api_range, paragraph);
        } else if let Some(table) = &element.table {
            let (rows, columns) = table_dimensions(table);
            self.add_structural(node_id, api_range, BlockFlags::atomic(), BlockContent::Table { rows, columns });
        } else if element.horizontal_rule.is_some() {
            self.add_structural(node_id, api_range, BlockFlags::atomic(), BlockContent::HorizontalRule);
        } else if element.section_break.is_some() {
            self.add_structural(node_id, api_range, BlockFlags::default(), BlockContent::SectionBreak);
        } else if element.page_break.is_some() {
            self.add_structural(node_id, api_range, BlockFlags::default(), BlockContent::PageBreak);
        } else if let Some(embed) = &element.embedded_object {
            let content = BlockContent::Embed {
                object_kind: embed_kind(embed),
                inline: None,
            };
            self.add_structural(node_id, api_range, BlockFlags::atomic(), content);
        } else {
            debug!(node_id = %node_id, start, end, "Skipping element with no recognised payload");
        }
    }

    fn add_structural(&mut self, node_id: String, api_range: ApiRange, flags: BlockFlags, content: BlockContent) {
        let block = Block {
            node_id,
            parent_container_id: BODY_CONTAINER_ID.to_string(),
            api_range,
            heading_path: self.heading_stack.clone(),
            flags,
            content,
        };
        self.push_block(block);
    }

    fn add_paragraph(&mut self, node_id: String, api_range: ApiRange, raw: &RawParagraph) {
        let (paragraph, contains_inline_atomic) = build_paragraph(raw);
        let heading_level = paragraph
            .style
            .named_style_type
            .as_deref()
            .and_then(parse_heading_level);
        let is_heading = paragraph
            .style
            .named_style_type
            .as_deref()
            .is_some_and(|style| style.starts_with(HEADING_STYLE_PREFIX));

        let flags = BlockFlags {
            is_atomic: false,
            contains_inline_atomic,
            is_heading,
            heading_level,
            is_list_item: raw.bullet.is_some(),
            is_code_paragraph: is_code_paragraph(&paragraph.runs),
        };

        let heading_ref = heading_level.map(|level| HeadingRef {
            node_id: node_id.clone(),
            text: paragraph.plain_text.clone(),
            normalized_text: normalize_heading_text(&paragraph.plain_text),
            level,
        });

        if let Some(heading) = &heading_ref {
            self.heading_stack.retain(|open| open.level < heading.level);
            self.heading_stack.push(heading.clone());
        }

        let block = Block {
            node_id,
            parent_container_id: BODY_CONTAINER_ID.to_string(),
            api_range,
            heading_path: self.heading_stack.clone(),
            flags,
            content: BlockContent::Paragraph(paragraph),
        };
        self.push_block(block);

        if let Some(heading) = heading_ref {
            self.register_heading(heading);
        }
    }

    fn register_heading(&mut self, heading: HeadingRef) {
        debug!(node_id = %heading.node_id, level = heading.level, text = %heading.text, "Registering heading");
        self.index.headings_in_order.push(heading.node_id.clone());
        self.index
            .heading_text_to_nodes
            .entry(heading.normalized_text)
            .or_default()
            .push(heading.node_id.clone());
        self.index.blocks_under_heading.entry(heading.node_id).or_default();
    }

    fn push_block(&mut self, block: Block) {
        for heading in &block.heading_path {
            if heading.node_id == block.node_id {
                continue;
            }
            self.index
                .blocks_under_heading
                .entry(heading.node_id.clone())
                .or_default()
                .push(block.node_id.clone());
        }
        self.index
            .position_by_id
            .insert(block.node_id.clone(), self.blocks.len());
        self.blocks.push(block);
    }
}

fn build_paragraph(raw: &RawParagraph) -> (Paragraph, bool) {
    let mut range_map = RangeMapBuilder::new();
    let mut runs = Vec::with_capacity(raw.elements.len());
    let mut contains_inline_atomic = false;

    for element in &raw.elements {
        let start = element.start_index.unwrap_or(0);
        let end = element.end_index.unwrap_or(start);
        let api_range = ApiRange::new(start, end);

        if let Some(text_run) = &element.text_run {
            let content = text_run.content.clone().unwrap_or_default();
            range_map.push_text(&content, start);
            runs.push(InlineRun::Text {
                text: content,
                style: parse_text_style(text_run.text_style.as_ref()),
                api_range,
            });
        } else if let Some(object) = &element.inline_object_element {
            contains_inline_atomic = true;
            runs.push(InlineRun::InlineImage {
                object_id: object.inline_object_id.clone(),
                api_range,
            });
        } else if let Some((chip_type, display_text)) = smart_chip(element) {
            contains_inline_atomic = true;
            runs.push(InlineRun::SmartChip {
                chip_type,
                display_text,
                api_range,
            });
        }
    }

    let (plain_text, range_map) = range_map.finish();
    let paragraph = Paragraph {
        plain_text,
        runs,
        style: parse_paragraph_style(raw.paragraph_style.as_ref()),
        range_map,
    };
    (paragraph, contains_inline_atomic)
}

fn smart_chip(element: &RawParagraphElement) -> Option<(String, String)> {
    if let Some(person) = &element.person {
        let props = person.person_properties.as_ref();
        let display = props
            .and_then(|p| p.name.clone().or_else(|| p.email.clone()))
            .unwrap_or_default();
        return Some(("person".to_string(), display));
    }
    if let Some(link) = &element.rich_link {
        let props = link.rich_link_properties.as_ref();
        let display = props
            .and_then(|p| p.title.clone().or_else(|| p.uri.clone()))
            .unwrap_or_default();
        return Some(("richLink".to_string(), display));
    }
    None
}

fn parse_heading_level(named_style: &str) -> Option<u8> {
    named_style
        .strip_prefix(HEADING_STYLE_PREFIX)?
        .parse::<u8>()
        .ok()
        .filter(|level| *level > 0)
}

/// At least one non-blank text run, and every non-blank run set in a monospace family
fn is_code_paragraph(runs: &[InlineRun]) -> bool {
    let mut seen = false;
    for run in runs {
        let InlineRun::Text { text, style, .. } = run else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }
        match &style.font_family {
            Some(family) if is_monospace_family(family) => seen = true,
            _ => return false,
        }
    }
    seen
}

fn parse_paragraph_style(raw: Option<&RawParagraphStyle>) -> ParagraphStyle {
    let Some(raw) = raw else {
        return ParagraphStyle::default();
    };
    ParagraphStyle {
        named_style_type: raw.named_style_type.clone(),
        alignment: raw.alignment.clone(),
        indent_start: raw.indent_start.as_ref().and_then(|d| d.magnitude),
        indent_end: raw.indent_end.as_ref().and_then(|d| d.magnitude),
        line_spacing: raw.line_spacing,
        shading: raw
            .shading
            .as_ref()
            .and_then(|s| s.background_color.as_ref())
            .and_then(|c| c.color.as_ref())
            .and_then(|c| c.rgb_color),
    }
}

fn parse_text_style(raw: Option<&RawTextStyle>) -> TextStyle {
    let Some(raw) = raw else {
        return TextStyle::default();
    };
    TextStyle {
        bold: raw.bold,
        italic: raw.italic,
        underline: raw.underline,
        link: raw.link.as_ref().and_then(|l| l.url.clone()),
        font_family: raw
            .weighted_font_family
            .as_ref()
            .and_then(|w| w.font_family.clone())
            .or_else(|| raw.font_family.clone()),
        font_size: raw.font_size.as_ref().and_then(|d| d.magnitude),
    }
}

/// Rows from the row list, columns from row 0, falling back to the declared counts
fn table_dimensions(table: &RawTable) -> (usize, usize) {
    match table.table_rows.first() {
        Some(first) => (table.table_rows.len(), first.table_cells.len()),
        None => (table.rows.unwrap_or(0), table.columns.unwrap_or(0)),
    }
}

fn embed_kind(embed: &RawEmbeddedObject) -> String {
    embed
        .description
        .clone()
        .or_else(|| embed.title.clone())
        .unwrap_or_else(|| "embedded".to_string())
}
