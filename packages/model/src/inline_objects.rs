use crate::block::{Block, BlockContent, BlockFlags, InlineRun, InlineSource};

/// Object kind reported for embeds synthesized from inline images
pub const INLINE_IMAGE_KIND: &str = "inlineImage";

pub fn inline_image_node_id(paragraph_node_id: &str, run_index: usize) -> String {
    format!("inline-{}-{}", paragraph_node_id, run_index)
}

/// Atomic pseudo-blocks for every inline image in a paragraph.
///
/// These never enter the model's block list; they only exist so object
/// queries can address inline images alongside top-level embeds.
pub fn inline_image_blocks(paragraph: &Block) -> Vec<Block> {
    let Some(content) = paragraph.as_paragraph() else {
        return Vec::new();
    };

    content
        .runs
        .iter()
        .enumerate()
        .filter(|(_, run)| run.is_inline_image())
        .map(|(run_index, run)| Block {
            node_id: inline_image_node_id(&paragraph.node_id, run_index),
            parent_container_id: paragraph.parent_container_id.clone(),
            api_range: InlineRun::api_range(run),
            heading_path: paragraph.heading_path.clone(),
            flags: BlockFlags::atomic(),
            content: BlockContent::Embed {
                object_kind: INLINE_IMAGE_KIND.to_string(),
                inline: Some(InlineSource {
                    paragraph_node_id: paragraph.node_id.clone(),
                    run_index,
                }),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentModel;
    use serde_json::json;

    #[test]
    fn test_inline_images_become_pseudo_blocks() {
        let model = DocumentModel::from_value(json!({
            "documentId": "d",
            "body": { "content": [{
                "startIndex": 1,
                "endIndex": 6,
                "paragraph": { "elements": [
                    { "startIndex": 1, "endIndex": 3, "textRun": { "content": "ab" } },
                    { "startIndex": 3, "endIndex": 4, "inlineObjectElement": {} },
                    { "startIndex": 4, "endIndex": 6, "textRun": { "content": "c\n" } }
                ] }
            }] }
        }))
        .unwrap();

        let blocks = inline_image_blocks(&model.blocks[0]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].node_id, "inline-node-1-1");
        assert_eq!(blocks[0].api_range.start, 3);
        assert!(blocks[0].flags.is_atomic);
        assert!(matches!(&blocks[0].content, BlockContent::Embed { inline: Some(_), .. }));
    }
}
