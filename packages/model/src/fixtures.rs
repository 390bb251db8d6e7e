//! Document fixtures for tests
//!
//! Lays elements out contiguously in API index space starting at 1, the way
//! the remote API numbers a fresh body.

use crate::model::DocumentModel;
use serde_json::{json, Value};

pub struct DocBuilder {
    document_id: String,
    revision_id: String,
    cursor: usize,
    content: Vec<Value>,
}

impl Default for DocBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocBuilder {
    pub fn new() -> Self {
        Self {
            document_id: "doc-1".to_string(),
            revision_id: "rev-1".to_string(),
            cursor: 1,
            content: Vec::new(),
        }
    }

    pub fn revision(mut self, revision_id: &str) -> Self {
        self.revision_id = revision_id.to_string();
        self
    }

    pub fn heading(self, text: &str, level: u8) -> Self {
        self.styled(text, &format!("HEADING_{}", level))
    }

    pub fn para(self, text: &str) -> Self {
        self.styled(text, "NORMAL_TEXT")
    }

    pub fn styled(mut self, text: &str, named_style: &str) -> Self {
        let start = self.cursor;
        let run = self.text_run(&format!("{}\n", text), json!({}));
        self.push_paragraph(start, vec![run], json!({ "paragraphStyle": { "namedStyleType": named_style } }))
    }

    pub fn code(mut self, text: &str) -> Self {
        let start = self.cursor;
        let style = json!({ "weightedFontFamily": { "fontFamily": "Courier New" } });
        let run = self.text_run(&format!("{}\n", text), style);
        self.push_paragraph(start, vec![run], json!({ "paragraphStyle": { "namedStyleType": "NORMAL_TEXT" } }))
    }

    pub fn list_item(mut self, text: &str) -> Self {
        let start = self.cursor;
        let run = self.text_run(&format!("{}\n", text), json!({}));
        self.push_paragraph(start, vec![run], json!({ "bullet": { "listId": "list-1" } }))
    }

    /// Paragraph with an inline image between two text runs
    pub fn para_with_image(mut self, before: &str, after: &str) -> Self {
        let start = self.cursor;
        let first = self.text_run(before, json!({}));
        let image = json!({
            "startIndex": self.cursor,
            "endIndex": self.cursor + 1,
            "inlineObjectElement": { "inlineObjectId": format!("kix.{}", start) }
        });
        self.cursor += 1;
        let second = self.text_run(&format!("{}\n", after), json!({}));
        self.push_paragraph(start, vec![first, image, second], json!({}))
    }

    pub fn table(mut self, rows: usize, columns: usize) -> Self {
        let row = json!({ "tableCells": vec![json!({}); columns] });
        let span = 1 + rows * (columns + 1);
        self.push_element(span, json!({ "table": { "rows": rows, "columns": columns, "tableRows": vec![row; rows] } }));
        self
    }

    pub fn horizontal_rule(mut self) -> Self {
        self.push_element(1, json!({ "horizontalRule": {} }));
        self
    }

    pub fn embed(mut self, description: &str) -> Self {
        self.push_element(1, json!({ "embeddedObject": { "description": description } }));
        self
    }

    pub fn page_break(mut self) -> Self {
        self.push_element(1, json!({ "pageBreak": {} }));
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "documentId": self.document_id,
            "revisionId": self.revision_id,
            "title": "Fixture",
            "body": { "content": self.content }
        })
    }

    pub fn build(self) -> DocumentModel {
        let raw = serde_json::from_value(self.to_json()).unwrap_or_default();
        DocumentModel::from_raw(&raw)
    }

    fn text_run(&mut self, content: &str, text_style: Value) -> Value {
        let len = content.encode_utf16().count();
        let run = json!({
            "startIndex": self.cursor,
            "endIndex": self.cursor + len,
            "textRun": { "content": content, "textStyle": text_style }
        });
        self.cursor += len;
        run
    }

    fn push_paragraph(mut self, start: usize, elements: Vec<Value>, extra: Value) -> Self {
        let end = elements
            .iter()
            .filter_map(|e| e["endIndex"].as_u64())
            .max()
            .map(|end| end as usize)
            .unwrap_or(start);
        let mut paragraph = json!({ "elements": elements });
        if let (Some(target), Some(source)) = (paragraph.as_object_mut(), extra.as_object()) {
            target.extend(source.clone());
        }
        self.content.push(json!({ "startIndex": start, "endIndex": end, "paragraph": paragraph }));
        self.cursor = end;
        self
    }

    fn push_element(&mut self, span: usize, payload: Value) {
        let mut element = json!({ "startIndex": self.cursor, "endIndex": self.cursor + span });
        if let (Some(target), Some(source)) = (element.as_object_mut(), payload.as_object()) {
            target.extend(source.clone());
        }
        self.content.push(element);
        self.cursor += span;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_contiguous() {
        let model = DocBuilder::new()
            .heading("Title", 1)
            .para_with_image("ab", "cd")
            .table(2, 2)
            .para("after")
            .build();
        assert_eq!(model.blocks[0].api_range.start, 1);
        assert_eq!(model.blocks[0].api_range.end, 7);
        assert_eq!(model.blocks[1].api_range.start, 7);
        assert_eq!(model.blocks[1].api_range.end, 13);
        assert_eq!(model.blocks[1].plain_text(), Some("abcd"));
        assert_eq!(model.blocks[2].api_range.start, 13);
        assert_eq!(model.blocks[3].api_range.start, 20);
    }
}
