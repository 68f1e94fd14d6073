//! `followup` command-line front end.
//!
//! # Responsibility
//! - Parse global options and dispatch to one subcommand.
//! - Keep all business rules in `followup_core`.

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "followup")]
#[command(about = "Meeting protocol builder: normalize notes, extract tasks, render protocols", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: cmd::GlobalArgs,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a meeting form into protocol text, Markdown or HTML
    Render(cmd::render::RenderArgs),

    /// Print the resolved task list of a meeting form as JSON
    Tasks(cmd::tasks::TasksArgs),

    /// Deadline and assignee report over saved documents
    Report(cmd::report::ReportArgs),

    /// Print a blank meeting form as JSON
    New,

    /// Save a meeting form to the document store
    Save(cmd::store::SaveArgs),

    /// List saved documents, or the trash
    List(cmd::store::ListArgs),

    /// Move a saved document to the trash
    Trash(cmd::store::IdArgs),

    /// Bring a document back from the trash
    Restore(cmd::store::IdArgs),

    /// Permanently delete a trashed document
    Purge(cmd::store::IdArgs),

    /// Write a saved document to a protocol file
    Export(cmd::export::ExportArgs),

    /// Mention candidates for `@` completion
    Names(cmd::store::NamesArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let ctx = cmd::Context::from_args(&cli.global)?;

    match cli.cmd {
        Commands::Render(args) => cmd::render::run(&ctx, args),
        Commands::Tasks(args) => cmd::tasks::run(&ctx, args),
        Commands::Report(args) => cmd::report::run(&ctx, args),
        Commands::New => cmd::store::new_form(&ctx),
        Commands::Save(args) => cmd::store::save(&ctx, args),
        Commands::List(args) => cmd::store::list(&ctx, args),
        Commands::Trash(args) => cmd::store::trash(&ctx, args),
        Commands::Restore(args) => cmd::store::restore(&ctx, args),
        Commands::Purge(args) => cmd::store::purge(&ctx, args),
        Commands::Export(args) => cmd::export::run(&ctx, args),
        Commands::Names(args) => cmd::store::names(&ctx, args),
    }
}
