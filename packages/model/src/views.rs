//! Read-only projections of the model for outline and list output

use crate::block::{ApiRange, Block, BlockContent, BlockFlags, BlockType};
use crate::model::DocumentModel;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectCounts {
    pub tables: usize,
    pub horizontal_rules: usize,
    pub embeds: usize,
    pub atomic: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineEntry {
    pub node_id: String,
    pub level: Option<u8>,
    pub text: String,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<ObjectCounts>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    pub index: usize,
    pub node_id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub heading_path: Vec<String>,
    pub snippet: String,
    pub api_range: ApiRange,
    pub flags: BlockFlags,
}

impl DocumentModel {
    /// Headings in document order, optionally with object counts beneath each
    pub fn outline(&self, include_objects: bool) -> Vec<OutlineEntry> {
        self.headings()
            .filter_map(|heading| {
                let text = heading.plain_text()?.to_string();
                Some(OutlineEntry {
                    node_id: heading.node_id.clone(),
                    level: heading.heading_level(),
                    text,
                    path: heading.heading_path_texts(),
                    objects: include_objects.then(|| self.object_counts_under(&heading.node_id)),
                })
            })
            .collect()
    }

    fn object_counts_under(&self, heading_id: &str) -> ObjectCounts {
        let mut counts = ObjectCounts::default();
        for block in self.blocks_under(heading_id) {
            if block.flags.is_atomic {
                counts.atomic += 1;
            }
            match block.content {
                BlockContent::Table { .. } => counts.tables += 1,
                BlockContent::HorizontalRule => counts.horizontal_rules += 1,
                BlockContent::Embed { .. } => counts.embeds += 1,
                _ => {}
            }
        }
        counts
    }

    /// One entry per block, limited to `only` when given
    pub fn list(&self, only: Option<&[Block]>) -> Vec<ListEntry> {
        let allow: Option<HashSet<&str>> = only.map(|blocks| blocks.iter().map(|b| b.node_id.as_str()).collect());

        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| {
                allow
                    .as_ref()
                    .map_or(true, |ids| ids.contains(block.node_id.as_str()))
            })
            .map(|(index, block)| ListEntry {
                index,
                node_id: block.node_id.clone(),
                block_type: block.block_type(),
                heading_path: block.heading_path_texts(),
                snippet: block.snippet(),
                api_range: block.api_range,
                flags: block.flags.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> DocumentModel {
        DocumentModel::from_value(json!({
            "documentId": "d",
            "body": { "content": [
                { "startIndex": 1, "endIndex": 7, "paragraph": {
                    "elements": [{ "startIndex": 1, "endIndex": 7, "textRun": { "content": "Intro\n" } }],
                    "paragraphStyle": { "namedStyleType": "HEADING_1" }
                } },
                { "startIndex": 7, "endIndex": 20, "table": { "tableRows": [{ "tableCells": [{}] }] } },
                { "startIndex": 20, "endIndex": 21, "horizontalRule": {} },
                { "startIndex": 21, "endIndex": 28, "paragraph": {
                    "elements": [{ "startIndex": 21, "endIndex": 28, "textRun": { "content": "Usage\n" } }],
                    "paragraphStyle": { "namedStyleType": "HEADING_2" }
                } }
            ] }
        }))
        .unwrap()
    }

    #[test]
    fn test_outline_with_objects() {
        let outline = sample().outline(true);
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[0].text, "Intro");
        assert_eq!(outline[0].level, Some(1));
        assert_eq!(
            outline[0].objects,
            Some(ObjectCounts {
                tables: 1,
                horizontal_rules: 1,
                embeds: 0,
                atomic: 2
            })
        );
        assert_eq!(outline[1].path, vec!["Intro", "Usage"]);
    }

    #[test]
    fn test_outline_without_objects_omits_counts() {
        let outline = sample().outline(false);
        let json = serde_json::to_value(&outline).unwrap();
        assert!(json[0].get("objects").is_none());
    }

    #[test]
    fn test_list_filters_to_given_blocks() {
        let model = sample();
        let only = vec![model.blocks[2].clone()];
        let list = model.list(Some(&only));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].index, 2);
        assert_eq!(list[0].snippet, "Horizontal rule");
        assert_eq!(serde_json::to_value(&list[0]).unwrap()["type"], "horizontalRule");
        assert_eq!(model.list(None).len(), 4);
    }
}
