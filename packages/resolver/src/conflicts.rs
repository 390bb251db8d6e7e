use crate::target::ResolvedTarget;
use docsel_model::Block;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflicts {
    pub atomic_blocks: Vec<String>,
    pub inline_atomic: Vec<String>,
}

impl Conflicts {
    pub fn is_empty(&self) -> bool {
        self.atomic_blocks.is_empty() && self.inline_atomic.is_empty()
    }

    /// `atomic:<id>` tags first, then `inline:<id>`, each in block order
    pub fn tags(&self) -> Vec<String> {
        self.atomic_blocks
            .iter()
            .map(|id| format!("atomic:{}", id))
            .chain(self.inline_atomic.iter().map(|id| format!("inline:{}", id)))
            .collect()
    }
}

pub fn detect_block_conflicts<'a>(blocks: impl IntoIterator<Item = &'a Block>) -> Conflicts {
    let mut conflicts = Conflicts::default();
    for block in blocks {
        if block.flags.is_atomic {
            conflicts.atomic_blocks.push(block.node_id.clone());
        }
        if block.is_paragraph() && block.flags.contains_inline_atomic {
            conflicts.inline_atomic.push(block.node_id.clone());
        }
    }
    conflicts
}

pub fn detect_conflicts(target: &ResolvedTarget) -> Conflicts {
    detect_block_conflicts(target.member_blocks())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{TargetContext, TargetSelection};
    use docsel_model::DocumentModel;
    use serde_json::json;

    fn model() -> DocumentModel {
        DocumentModel::from_value(json!({
            "documentId": "d",
            "body": { "content": [
                { "startIndex": 1, "endIndex": 5, "paragraph": { "elements": [
                    { "startIndex": 1, "endIndex": 2, "inlineObjectElement": {} },
                    { "startIndex": 2, "endIndex": 5, "textRun": { "content": "ab\n" } }
                ] } },
                { "startIndex": 5, "endIndex": 9, "table": { "tableRows": [] } },
                { "startIndex": 9, "endIndex": 12, "paragraph": { "elements": [
                    { "startIndex": 9, "endIndex": 12, "textRun": { "content": "cd\n" } }
                ] } }
            ] }
        }))
        .unwrap()
    }

    #[test]
    fn test_tags_are_atomic_then_inline() {
        let model = model();
        let target = ResolvedTarget {
            selection: TargetSelection::BlockRange {
                blocks: model.blocks.clone(),
            },
            context: TargetContext::default(),
        };
        let conflicts = detect_conflicts(&target);
        assert_eq!(conflicts.tags(), vec!["atomic:node-2", "inline:node-1"]);
    }

    #[test]
    fn test_text_range_checks_owning_paragraph() {
        let model = model();
        let target = ResolvedTarget {
            selection: TargetSelection::TextRange {
                paragraph: model.blocks[2].clone(),
                start_offset: 0,
                end_offset: 1,
            },
            context: TargetContext::default(),
        };
        assert!(detect_conflicts(&target).is_empty());
    }
}
