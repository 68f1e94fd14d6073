use super::render::{render, RenderFormat};
use super::Context;
use anyhow::{bail, Context as _};
use clap::{Args, ValueEnum};
use followup_core::{export_file_name, DocumentService, SqliteDocRepository};
use log::info;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Md,
    Html,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Saved document id
    pub id: String,

    #[arg(long, value_enum, default_value_t = ExportFormat::Md)]
    pub format: ExportFormat,

    /// Target directory
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

pub fn run(ctx: &Context, args: ExportArgs) -> anyhow::Result<()> {
    let conn = ctx.open_store()?;
    let service = DocumentService::new(SqliteDocRepository::new(&conn));
    let Some(doc) = service.get_document(&args.id)? else {
        bail!("document not found: {}", args.id);
    };

    let (extension, format) = match args.format {
        ExportFormat::Txt => ("txt", RenderFormat::Text),
        ExportFormat::Md => ("md", RenderFormat::Markdown),
        ExportFormat::Html => ("html", RenderFormat::Clipboard),
    };
    let body = render(ctx, &doc, format)?;
    let path = args.dir.join(export_file_name(&doc, extension, &ctx.catalog));
    std::fs::write(&path, body)
        .with_context(|| format!("failed to write export `{}`", path.display()))?;

    info!("event=doc_export module=cli status=ok doc_id={} format={extension}", doc.id);
    println!("{}", path.display());
    Ok(())
}
