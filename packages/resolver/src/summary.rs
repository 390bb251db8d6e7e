use crate::target::ResolvedTarget;
use docsel_parser::quote;

/// Compose the convenience guard inputs into one guard expression.
///
/// Parts are ordered revision check, expected text, raw guard; more than one
/// part is wrapped in `all(...)`.
pub fn build_guard_expression(guard: Option<&str>, if_revision: Option<&str>, expect: Option<&str>) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(revision) = if_revision.filter(|s| !s.is_empty()) {
        parts.push(format!("ifRevision({})", quote(revision)));
    }
    if let Some(expected) = expect.filter(|s| !s.is_empty()) {
        parts.push(format!("expectContains({})", quote(expected)));
    }
    if let Some(guard) = guard.filter(|s| !s.trim().is_empty()) {
        parts.push(guard.to_string());
    }

    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(format!("all({})", parts.join(", "))),
    }
}

pub fn format_heading_path(path: &[String]) -> String {
    if path.is_empty() {
        "(top)".to_string()
    } else {
        path.join(" > ")
    }
}

/// `<kind> <heading path>[ :: <snippet>]`
pub fn format_target_summary(target: &ResolvedTarget) -> String {
    let heading = format_heading_path(&target.context.heading_path);
    if target.context.snippet.is_empty() {
        format!("{} {}", target.kind(), heading)
    } else {
        format!("{} {} :: {}", target.kind(), heading, target.context.snippet)
    }
}
