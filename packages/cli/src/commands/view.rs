use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use docsel_model::{ListEntry, ObjectCounts, OutlineEntry};
use docsel_resolver::format_heading_path;

#[derive(Args, Debug)]
pub struct OutlineArgs {
    /// Count tables, rules and embeds under each heading
    #[arg(long)]
    pub objects: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {}

pub fn outline(args: OutlineArgs, ctx: &Context) -> Result<()> {
    let model = ctx.load_model()?;
    let entries = model.outline(args.objects);
    if ctx.json {
        return ctx.print_json(&entries);
    }
    for entry in &entries {
        println!("{}", outline_line(entry));
    }
    Ok(())
}

pub fn list(_args: ListArgs, ctx: &Context) -> Result<()> {
    let model = ctx.load_model()?;
    let entries = model.list(None);
    if ctx.json {
        return ctx.print_json(&entries);
    }
    for entry in &entries {
        println!("{}", list_line(entry));
    }
    Ok(())
}

fn outline_line(entry: &OutlineEntry) -> String {
    let depth = entry.level.unwrap_or(1).saturating_sub(1) as usize;
    let mut line = format!("{}{}", "  ".repeat(depth), entry.text.bold());
    if let Some(objects) = &entry.objects {
        if let Some(counts) = object_summary(objects) {
            line.push_str(&format!(" {}", counts.dimmed()));
        }
    }
    line
}

fn object_summary(objects: &ObjectCounts) -> Option<String> {
    let parts: Vec<String> = [
        (objects.tables, "table"),
        (objects.horizontal_rules, "hr"),
        (objects.embeds, "embed"),
    ]
    .iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, name)| format!("{} {}", count, name))
    .collect();
    if parts.is_empty() {
        None
    } else {
        Some(format!("[{}]", parts.join(", ")))
    }
}

fn list_line(entry: &ListEntry) -> String {
    format!(
        "{:>4}  {:<10} {:<15} {} :: {}",
        entry.index,
        entry.node_id,
        entry.block_type.as_str(),
        format_heading_path(&entry.heading_path),
        entry.snippet
    )
}
