use crate::block::{ApiRange, Block};
use crate::error::ModelResult;
use crate::raw::RawDocument;
use crate::text::normalize_heading_text;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Lookup tables built alongside the flat block list.
///
/// Blocks are addressed by node id; positions index into
/// [`DocumentModel::blocks`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelIndex {
    pub headings_in_order: Vec<String>,
    pub heading_text_to_nodes: BTreeMap<String, Vec<String>>,
    pub blocks_under_heading: BTreeMap<String, Vec<String>>,
    pub position_by_id: BTreeMap<String, usize>,
}

/// Immutable snapshot of one fetched document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentModel {
    pub doc_id: String,
    pub revision_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body_range: ApiRange,
    pub blocks: Vec<Block>,
    pub index: ModelIndex,
}

impl DocumentModel {
    pub fn from_raw(raw: &RawDocument) -> Self {
        crate::builder::build_document_model(raw)
    }

    /// Build from the document JSON returned by the fetch collaborator
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let raw: RawDocument = serde_json::from_str(json)?;
        Ok(Self::from_raw(&raw))
    }

    pub fn from_value(value: serde_json::Value) -> ModelResult<Self> {
        let raw: RawDocument = serde_json::from_value(value)?;
        Ok(Self::from_raw(&raw))
    }

    pub fn block(&self, node_id: &str) -> Option<&Block> {
        self.position(node_id).and_then(|pos| self.blocks.get(pos))
    }

    pub fn position(&self, node_id: &str) -> Option<usize> {
        self.index.position_by_id.get(node_id).copied()
    }

    /// Heading blocks whose normalized text equals the normalized `title`
    pub fn headings_with_text(&self, title: &str) -> Vec<&Block> {
        self.index
            .heading_text_to_nodes
            .get(&normalize_heading_text(title))
            .map(|ids| ids.iter().filter_map(|id| self.block(id)).collect())
            .unwrap_or_default()
    }

    pub fn headings(&self) -> impl Iterator<Item = &Block> {
        self.index.headings_in_order.iter().filter_map(|id| self.block(id))
    }

    /// Blocks nested under a heading, in document order, never the heading itself
    pub fn blocks_under(&self, heading_id: &str) -> Vec<&Block> {
        self.index
            .blocks_under_heading
            .get(heading_id)
            .map(|ids| {
                ids.iter()
                    .filter(|id| id.as_str() != heading_id)
                    .filter_map(|id| self.block(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|block| block.is_paragraph())
    }

    /// All paragraph texts joined with newlines, in document order
    pub fn document_text(&self) -> String {
        self.paragraphs()
            .filter_map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// First heading paragraph strictly after the given block
    pub fn next_heading_after(&self, node_id: &str) -> Option<&Block> {
        let pos = self.position(node_id)?;
        self.blocks[pos + 1..]
            .iter()
            .find(|block| block.flags.is_heading && block.is_paragraph())
    }

    /// Model blocks whose ids appear in `ids`, deduplicated and in document order
    pub fn blocks_in_order<'a, I>(&self, ids: I) -> Vec<&Block>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let wanted: HashSet<&str> = ids.into_iter().collect();
        self.blocks
            .iter()
            .filter(|block| wanted.contains(block.node_id.as_str()))
            .collect()
    }
}
