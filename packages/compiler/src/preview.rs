//! Before/after text preview of an edit, for dry runs

use crate::intent::InsertPosition;
use docsel_resolver::ResolvedTarget;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DiffIntent {
    Insert { position: InsertPosition, text: String },
    Replace { text: String },
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffPreview {
    pub before: String,
    pub after: String,
}

pub fn preview(target: &ResolvedTarget, intent: &DiffIntent) -> DiffPreview {
    let before = target.text();
    let after = match intent {
        DiffIntent::Insert {
            position: InsertPosition::Before,
            text,
        } => format!("{}\n{}", text, before).trim_end().to_string(),
        DiffIntent::Insert {
            position: InsertPosition::After,
            text,
        } => format!("{}\n{}", before, text).trim_end().to_string(),
        DiffIntent::Replace { text } => text.clone(),
        DiffIntent::Delete => String::new(),
    };
    DiffPreview { before, after }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsel_model::fixtures::DocBuilder;
    use docsel_resolver::{resolve_str, ResolveOptions};

    fn resolve(selector: &str) -> ResolvedTarget {
        let doc = DocBuilder::new()
            .heading("Title", 1)
            .para("Hello world")
            .table(2, 2)
            .build();
        resolve_str(&doc, selector, None, ResolveOptions::default()).unwrap()
    }

    #[test]
    fn test_replace_preview_uses_range_text() {
        let preview = preview(
            &resolve(r#"match("Hello", occurrence=1)"#),
            &DiffIntent::Replace { text: "Hi".to_string() },
        );
        assert_eq!(preview.before, "Hello");
        assert_eq!(preview.after, "Hi");
    }

    #[test]
    fn test_insert_preview_places_text_around_paragraph() {
        let target = resolve(r#"heading("Title")"#);
        let after = preview(
            &target,
            &DiffIntent::Insert {
                position: InsertPosition::After,
                text: "Intro".to_string(),
            },
        );
        assert_eq!(after.after, "Title\nIntro");

        let before = preview(
            &target,
            &DiffIntent::Insert {
                position: InsertPosition::Before,
                text: "Intro\n".to_string(),
            },
        );
        assert_eq!(before.after, "Intro\n\nTitle");
    }

    #[test]
    fn test_delete_preview_of_non_paragraph_uses_snippet() {
        let preview = preview(&resolve(r#"objects(type="table")"#), &DiffIntent::Delete);
        assert_eq!(preview.before, "table");
        assert_eq!(preview.after, "");
    }
}
