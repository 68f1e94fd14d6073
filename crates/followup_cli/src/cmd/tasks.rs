use super::{load_document, Context};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct TasksArgs {
    /// Meeting form or stored document JSON (`-` for stdin)
    #[arg(long)]
    pub input: PathBuf,
}

pub fn run(ctx: &Context, args: TasksArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.input)?;
    let resolver = ctx.resolver(ctx.history_participants()?);
    let tasks = resolver.resolve_document_tasks(&doc);
    println!("{}", serde_json::to_string_pretty(&tasks)?);
    Ok(())
}
