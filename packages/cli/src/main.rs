mod commands;
mod config;
mod input;
mod report;

use clap::{Parser, Subcommand};
use commands::{
    edit, list, object, outline, resolve, style, Context, EditCommand, ListArgs, ObjectCommand, OutlineArgs,
    ResolveArgs, StyleCommand,
};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// docsel - address and edit rich documents with selector expressions
#[derive(Parser, Debug)]
#[command(name = "docsel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Document snapshot (API JSON); reads stdin when omitted or `-`
    #[arg(short, long, global = true)]
    doc: Option<PathBuf>,

    /// Config file (defaults to ./docsel.config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Machine-readable output, including errors
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a selector and print the target
    Resolve(ResolveArgs),

    /// Print the heading outline
    Outline(OutlineArgs),

    /// List every block with its path and flags
    List(ListArgs),

    /// Insert, replace or delete content
    Edit {
        #[command(subcommand)]
        command: EditCommand,
    },

    /// Text, paragraph and code styling
    Style {
        #[command(subcommand)]
        command: StyleCommand,
    },

    /// Insert or delete tables, rules, images and embeds
    Object {
        #[command(subcommand)]
        command: ObjectCommand,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd, cli.config.as_deref())?;
    let ctx = Context {
        config,
        json: cli.json,
        document: cli.doc,
    };

    match cli.command {
        Command::Resolve(args) => resolve(args, &ctx),
        Command::Outline(args) => outline(args, &ctx),
        Command::List(args) => list(args, &ctx),
        Command::Edit { command } => edit(command, &ctx),
        Command::Style { command } => style(command, &ctx),
        Command::Object { command } => object(command, &ctx),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json = cli.json;

    if let Err(err) = run(cli) {
        if json {
            let report = report::error_report(&err);
            match serde_json::to_string(&report) {
                Ok(rendered) => println!("{}", rendered),
                Err(_) => eprintln!("{}", err),
            }
        } else {
            eprintln!();
            eprintln!("{}", report::render_error(&err));
            eprintln!();
        }
        std::process::exit(1);
    }
}
