use super::{run_edit, Context, PlanArgs, SelectArgs};
use crate::input::text_or_file;
use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use docsel_compiler::{DiffIntent, EditIntent, InsertPosition};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum EditCommand {
    /// Insert a paragraph before or after the selected paragraph
    Insert(InsertArgs),

    /// Replace a matched text range or a whole section
    Replace(ReplaceArgs),

    /// Delete the selected block or block range
    Delete(DeleteArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Before,
    After,
}

impl From<Position> for InsertPosition {
    fn from(position: Position) -> Self {
        match position {
            Position::Before => InsertPosition::Before,
            Position::After => InsertPosition::After,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceMode {
    Match,
    Section,
}

#[derive(Args, Debug)]
pub struct InsertArgs {
    #[arg(value_enum)]
    pub position: Position,

    #[command(flatten)]
    pub select: SelectArgs,

    #[command(flatten)]
    pub plan: PlanArgs,

    /// Text to insert
    #[arg(long)]
    pub text: Option<String>,

    /// Read the text to insert from a file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReplaceArgs {
    #[arg(value_enum)]
    pub mode: ReplaceMode,

    #[command(flatten)]
    pub select: SelectArgs,

    #[command(flatten)]
    pub plan: PlanArgs,

    /// Replacement text
    #[arg(long = "with")]
    pub with: Option<String>,

    /// Read the replacement text from a file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    #[command(flatten)]
    pub plan: PlanArgs,
}

pub fn edit(command: EditCommand, ctx: &Context) -> Result<()> {
    match command {
        EditCommand::Insert(args) => {
            let text = text_or_file(args.text.as_deref(), args.file.as_deref(), "text")?;
            let position = InsertPosition::from(args.position);
            let diff = DiffIntent::Insert {
                position,
                text: text.clone(),
            };
            run_edit(
                ctx,
                "editInsert",
                &args.select,
                &args.plan,
                EditIntent::Insert { position, text },
                Some(diff),
            )
        }
        EditCommand::Replace(args) => {
            let text = text_or_file(args.with.as_deref(), args.file.as_deref(), "with")?;
            let diff = DiffIntent::Replace { text: text.clone() };
            let intent = match args.mode {
                ReplaceMode::Match => EditIntent::ReplaceMatch { text },
                ReplaceMode::Section => EditIntent::ReplaceSection { text },
            };
            run_edit(ctx, "editReplace", &args.select, &args.plan, intent, Some(diff))
        }
        EditCommand::Delete(args) => run_edit(
            ctx,
            "editDelete",
            &args.select,
            &args.plan,
            EditIntent::Delete,
            Some(DiffIntent::Delete),
        ),
    }
}
