use crate::report::usage;
use anyhow::{Context as _, Result};
use docsel_model::DocumentModel;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read a document snapshot from a file, or stdin when the path is absent or `-`
pub fn load_model(path: Option<&Path>) -> Result<DocumentModel> {
    let json = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read document snapshot {}", path.display()))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Cannot read document snapshot from stdin")?;
            buffer
        }
    };
    debug!(bytes = json.len(), "Loaded document snapshot");
    Ok(DocumentModel::from_json(&json)?)
}

/// Inline text flag, or the contents of `--file`
pub fn text_or_file(text: Option<&str>, file: Option<&Path>, flag: &str) -> Result<String> {
    if let Some(file) = file {
        return std::fs::read_to_string(file).with_context(|| format!("Cannot read {}", file.display()));
    }
    match text {
        Some(text) => Ok(text.to_string()),
        None => Err(usage(format!("Provide --{} or --file.", flag))),
    }
}

/// `on`/`true` or `off`/`false`, case-insensitive
pub fn parse_toggle(value: Option<&str>) -> Result<Option<bool>> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.to_lowercase().as_str() {
        "on" | "true" => Ok(Some(true)),
        "off" | "false" => Ok(Some(false)),
        _ => Err(usage(format!("Invalid toggle value: {}", value))),
    }
}
