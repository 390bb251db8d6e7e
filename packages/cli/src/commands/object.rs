use super::{run_edit, Context, PlanArgs, SelectArgs};
use crate::input::text_or_file;
use crate::report::usage;
use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use docsel_compiler::{EditIntent, ObjectInsert};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ObjectCommand {
    /// Insert an image, embed, table or horizontal rule after a paragraph
    Insert(InsertArgs),

    /// Delete a selected table, rule, embed or image
    Delete(DeleteArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Image,
    Embed,
    Table,
    Hr,
}

#[derive(Args, Debug)]
pub struct InsertArgs {
    #[arg(value_enum)]
    pub object_type: ObjectType,

    #[command(flatten)]
    pub select: SelectArgs,

    #[command(flatten)]
    pub plan: PlanArgs,

    /// File holding the public URL of the image or embed
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Alt text for images and embeds
    #[arg(long)]
    pub alt: Option<String>,

    /// Table rows (defaults to the config value)
    #[arg(long)]
    pub rows: Option<u32>,

    /// Table columns (defaults to the config value)
    #[arg(long)]
    pub cols: Option<u32>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    #[command(flatten)]
    pub plan: PlanArgs,
}

pub fn object(command: ObjectCommand, ctx: &Context) -> Result<()> {
    match command {
        ObjectCommand::Insert(args) => {
            let object = object_insert(&args, ctx)?;
            run_edit(
                ctx,
                "objectInsert",
                &args.select,
                &args.plan,
                EditIntent::ObjectInsert { object },
                None,
            )
        }
        ObjectCommand::Delete(args) => run_edit(ctx, "objectDelete", &args.select, &args.plan, EditIntent::ObjectDelete, None),
    }
}

fn object_insert(args: &InsertArgs, ctx: &Context) -> Result<ObjectInsert> {
    let object = match args.object_type {
        ObjectType::Image | ObjectType::Embed => {
            if args.file.is_none() {
                return Err(usage("Provide --file with a public image URL."));
            }
            let uri = text_or_file(None, args.file.as_deref(), "file")?.trim().to_string();
            if uri.is_empty() {
                return Err(usage("Image URL file is empty."));
            }
            let alt_text = args.alt.clone();
            if args.object_type == ObjectType::Image {
                ObjectInsert::Image { uri, alt_text }
            } else {
                ObjectInsert::Embed { uri, alt_text }
            }
        }
        ObjectType::Table => ObjectInsert::Table {
            rows: args.rows.unwrap_or(ctx.config.table.rows),
            columns: args.cols.unwrap_or(ctx.config.table.columns),
        },
        ObjectType::Hr => ObjectInsert::HorizontalRule,
    };
    Ok(object)
}
