use super::{resolve_selection, Context, SelectArgs};
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub select: SelectArgs,
}

pub fn resolve(args: ResolveArgs, ctx: &Context) -> Result<()> {
    let model = ctx.load_model()?;
    let resolution = resolve_selection(ctx, &model, &args.select)?;

    if ctx.json {
        return ctx.print_json(&resolution);
    }
    println!("{}", resolution.target_summary);
    Ok(())
}
