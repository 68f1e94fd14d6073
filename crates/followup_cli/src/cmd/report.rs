use super::{load_document, Context};
use clap::Args;
use followup_core::{Document, DocumentService, SqliteDocRepository, TaskReport};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Unsaved draft to include ahead of saved documents
    #[arg(long)]
    pub draft: Option<PathBuf>,
}

pub fn run(ctx: &Context, args: ReportArgs) -> anyhow::Result<()> {
    let conn = ctx.open_store()?;
    let service = DocumentService::new(SqliteDocRepository::new(&conn));

    let docs: Vec<Document> = match &args.draft {
        Some(path) => service.report_documents(&load_document(path)?)?,
        None => service.list_documents()?,
    };
    let resolver = ctx.resolver(service.history_participants()?);
    let report = TaskReport::build(&docs, &resolver, ctx.today);

    for line in report.deadline_lines(&ctx.catalog, ctx.locale) {
        println!("{line}");
    }
    println!();
    for line in report.assignee_lines(&ctx.catalog) {
        println!("{line}");
    }
    Ok(())
}
