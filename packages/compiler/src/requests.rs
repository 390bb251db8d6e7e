//! Wire types for the index-addressed batch-update protocol
//!
//! Each [`Request`] serializes externally tagged, e.g.
//! `{"insertText": {"location": {"index": 8}, "text": "Hi"}}`. Style
//! updates carry a `fields` mask naming exactly the keys that are set.

use docsel_model::{RgbColor, CODE_FONT_FAMILY};
use serde::{Deserialize, Serialize};

pub const BULLET_PRESET: &str = "BULLET_DISC_CIRCLE_SQUARE";
pub const NUMBERED_PRESET: &str = "NUMBERED_DECIMAL";
pub const CODE_SHADE: f64 = 0.96;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_index: usize,
    pub end_index: usize,
}

impl Range {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self { start_index, end_index }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    InsertText(InsertText),
    DeleteContentRange(DeleteContentRange),
    UpdateTextStyle(UpdateTextStyle),
    UpdateParagraphStyle(UpdateParagraphStyle),
    InsertInlineImage(InsertInlineImage),
    InsertTable(InsertTable),
    InsertHorizontalRule(InsertHorizontalRule),
    CreateParagraphBullets(CreateParagraphBullets),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertText {
    pub location: Location,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteContentRange {
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyle {
    pub range: Range,
    pub text_style: TextStyleUpdate,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParagraphStyle {
    pub range: Range,
    pub paragraph_style: ParagraphStyleUpdate,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertInlineImage {
    pub location: Location,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertTable {
    pub rows: u32,
    pub columns: u32,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertHorizontalRule {
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParagraphBullets {
    pub range: Range,
    pub bullet_preset: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedFontFamily {
    pub font_family: String,
}

/// Text style attributes to set; unset attributes are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_font_family: Option<WeightedFontFamily>,
}

impl TextStyleUpdate {
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            link: Some(Link { url: url.into() }),
            ..Self::default()
        }
    }

    pub fn code() -> Self {
        Self {
            weighted_font_family: Some(WeightedFontFamily {
                font_family: CODE_FONT_FAMILY.to_string(),
            }),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    pub fn fields(&self) -> String {
        let mut fields = Vec::new();
        if self.bold.is_some() {
            fields.push("bold");
        }
        if self.italic.is_some() {
            fields.push("italic");
        }
        if self.underline.is_some() {
            fields.push("underline");
        }
        if self.link.is_some() {
            fields.push("link");
        }
        if self.weighted_font_family.is_some() {
            fields.push("weightedFontFamily");
        }
        fields.join(",")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    #[serde(rename = "rgbColor")]
    pub rgb_color: RgbColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionalColor {
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shading {
    pub background_color: OptionalColor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub named_style_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shading: Option<Shading>,
}

impl ParagraphStyleUpdate {
    pub fn named(style: impl Into<String>) -> Self {
        Self {
            named_style_type: Some(style.into()),
            ..Self::default()
        }
    }

    pub fn normal_text() -> Self {
        Self::named("NORMAL_TEXT")
    }

    /// Light grey background used for code paragraphs
    pub fn code() -> Self {
        let shade = RgbColor {
            red: CODE_SHADE,
            green: CODE_SHADE,
            blue: CODE_SHADE,
        };
        Self {
            shading: Some(Shading {
                background_color: OptionalColor {
                    color: Color { rgb_color: shade },
                },
            }),
            ..Self::default()
        }
    }

    pub fn fields(&self) -> String {
        let mut fields = Vec::new();
        if self.named_style_type.is_some() {
            fields.push("namedStyleType");
        }
        if self.shading.is_some() {
            fields.push("shading");
        }
        fields.join(",")
    }
}

impl Request {
    pub fn insert_text(index: usize, text: impl Into<String>) -> Self {
        Request::InsertText(InsertText {
            location: Location { index },
            text: text.into(),
        })
    }

    pub fn delete_range(start: usize, end: usize) -> Self {
        Request::DeleteContentRange(DeleteContentRange {
            range: Range::new(start, end),
        })
    }

    pub fn update_text_style(start: usize, end: usize, style: TextStyleUpdate) -> Self {
        let fields = style.fields();
        Request::UpdateTextStyle(UpdateTextStyle {
            range: Range::new(start, end),
            text_style: style,
            fields,
        })
    }

    pub fn update_paragraph_style(start: usize, end: usize, style: ParagraphStyleUpdate) -> Self {
        let fields = style.fields();
        Request::UpdateParagraphStyle(UpdateParagraphStyle {
            range: Range::new(start, end),
            paragraph_style: style,
            fields,
        })
    }

    pub fn insert_inline_image(index: usize, uri: impl Into<String>, alt_text: Option<&str>) -> Self {
        let alt_text = alt_text.filter(|alt| !alt.is_empty()).map(str::to_string);
        Request::InsertInlineImage(InsertInlineImage {
            location: Location { index },
            uri: uri.into(),
            alt_text_title: alt_text.clone(),
            alt_text_description: alt_text,
        })
    }

    pub fn insert_table(index: usize, rows: u32, columns: u32) -> Self {
        Request::InsertTable(InsertTable {
            rows,
            columns,
            location: Location { index },
        })
    }

    pub fn insert_horizontal_rule(index: usize) -> Self {
        Request::InsertHorizontalRule(InsertHorizontalRule {
            location: Location { index },
        })
    }

    pub fn create_paragraph_bullets(start: usize, end: usize, preset: &str) -> Self {
        Request::CreateParagraphBullets(CreateParagraphBullets {
            range: Range::new(start, end),
            bullet_preset: preset.to_string(),
        })
    }

    /// Wire name of the operation
    pub fn kind(&self) -> &'static str {
        match self {
            Request::InsertText(_) => "insertText",
            Request::DeleteContentRange(_) => "deleteContentRange",
            Request::UpdateTextStyle(_) => "updateTextStyle",
            Request::UpdateParagraphStyle(_) => "updateParagraphStyle",
            Request::InsertInlineImage(_) => "insertInlineImage",
            Request::InsertTable(_) => "insertTable",
            Request::InsertHorizontalRule(_) => "insertHorizontalRule",
            Request::CreateParagraphBullets(_) => "createParagraphBullets",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_requests_are_externally_tagged() {
        let value = serde_json::to_value(Request::insert_text(8, "Hi")).unwrap();
        assert_eq!(value, json!({ "insertText": { "location": { "index": 8 }, "text": "Hi" } }));

        let value = serde_json::to_value(Request::delete_range(8, 13)).unwrap();
        assert_eq!(
            value,
            json!({ "deleteContentRange": { "range": { "startIndex": 8, "endIndex": 13 } } })
        );
    }

    #[test]
    fn test_fields_mask_lists_set_keys_only() {
        let style = TextStyleUpdate {
            bold: Some(true),
            underline: Some(false),
            ..TextStyleUpdate::default()
        };
        assert_eq!(style.fields(), "bold,underline");
        assert_eq!(TextStyleUpdate::link("https://x.test").fields(), "link");
        assert!(TextStyleUpdate::default().is_empty());

        let value = serde_json::to_value(Request::update_text_style(1, 4, style)).unwrap();
        assert_eq!(
            value,
            json!({ "updateTextStyle": {
                "range": { "startIndex": 1, "endIndex": 4 },
                "textStyle": { "bold": true, "underline": false },
                "fields": "bold,underline"
            } })
        );
    }

    #[test]
    fn test_code_styles() {
        let value = serde_json::to_value(Request::update_paragraph_style(3, 9, ParagraphStyleUpdate::code())).unwrap();
        assert_eq!(
            value["updateParagraphStyle"]["paragraphStyle"],
            json!({ "shading": { "backgroundColor": { "color": { "rgbColor": { "red": 0.96, "green": 0.96, "blue": 0.96 } } } } })
        );
        assert_eq!(value["updateParagraphStyle"]["fields"], "shading");

        let value = serde_json::to_value(Request::update_text_style(3, 9, TextStyleUpdate::code())).unwrap();
        assert_eq!(
            value["updateTextStyle"]["textStyle"],
            json!({ "weightedFontFamily": { "fontFamily": "Courier New" } })
        );
    }

    #[test]
    fn test_inline_image_alt_text_sets_title_and_description() {
        let value = serde_json::to_value(Request::insert_inline_image(5, "https://img.test/a.png", Some("Alt"))).unwrap();
        assert_eq!(
            value,
            json!({ "insertInlineImage": {
                "location": { "index": 5 },
                "uri": "https://img.test/a.png",
                "altTextTitle": "Alt",
                "altTextDescription": "Alt"
            } })
        );

        let value = serde_json::to_value(Request::insert_inline_image(5, "u", None)).unwrap();
        assert!(value["insertInlineImage"].get("altTextTitle").is_none());
    }
}
