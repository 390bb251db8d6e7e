//! Wire shapes of the fetched document tree
//!
//! Every field is optional on the wire; missing values fall back to the same
//! defaults the builder would pick for an empty element.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDocument {
    pub document_id: String,
    pub revision_id: Option<String>,
    pub title: Option<String>,
    pub body: Option<RawBody>,
}

impl RawDocument {
    pub fn content(&self) -> &[RawStructuralElement] {
        self.body.as_ref().map(|body| body.content.as_slice()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBody {
    pub content: Vec<RawStructuralElement>,
}

/// Top-level body element: an API range plus exactly one payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStructuralElement {
    pub start_index: Option<usize>,
    pub end_index: Option<usize>,
    pub paragraph: Option<RawParagraph>,
    pub table: Option<RawTable>,
    pub horizontal_rule: Option<serde_json::Value>,
    pub section_break: Option<serde_json::Value>,
    pub page_break: Option<serde_json::Value>,
    pub embedded_object: Option<RawEmbeddedObject>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawParagraph {
    pub elements: Vec<RawParagraphElement>,
    pub paragraph_style: Option<RawParagraphStyle>,
    pub bullet: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawParagraphElement {
    pub start_index: Option<usize>,
    pub end_index: Option<usize>,
    pub text_run: Option<RawTextRun>,
    pub inline_object_element: Option<RawInlineObjectElement>,
    pub person: Option<RawPerson>,
    pub rich_link: Option<RawRichLink>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTextRun {
    pub content: Option<String>,
    pub text_style: Option<RawTextStyle>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInlineObjectElement {
    pub inline_object_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPerson {
    pub person_properties: Option<RawPersonProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPersonProperties {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRichLink {
    pub rich_link_properties: Option<RawRichLinkProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRichLinkProperties {
    pub title: Option<String>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDimension {
    pub magnitude: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawParagraphStyle {
    pub named_style_type: Option<String>,
    pub alignment: Option<String>,
    pub indent_start: Option<RawDimension>,
    pub indent_end: Option<RawDimension>,
    pub line_spacing: Option<f64>,
    pub shading: Option<RawShading>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawShading {
    pub background_color: Option<RawOptionalColor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOptionalColor {
    pub color: Option<RawColor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawColor {
    pub rgb_color: Option<RgbColor>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RgbColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTextStyle {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub link: Option<RawLink>,
    pub weighted_font_family: Option<RawWeightedFontFamily>,
    pub font_family: Option<String>,
    pub font_size: Option<RawDimension>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLink {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawWeightedFontFamily {
    pub font_family: Option<String>,
    pub weight: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTable {
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub table_rows: Vec<RawTableRow>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTableRow {
    pub table_cells: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEmbeddedObject {
    pub title: Option<String>,
    pub description: Option<String>,
}
