use super::{load_document, Context};
use anyhow::bail;
use clap::Args;
use followup_core::{
    Document, DocumentService, DocumentServiceError, SqliteDocRepository, Translator,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Meeting form or stored document JSON (`-` for stdin)
    #[arg(long)]
    pub input: PathBuf,

    /// Store a copy under a fresh id
    #[arg(long)]
    pub as_new: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show the trash instead of saved documents
    #[arg(long)]
    pub trash: bool,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct NamesArgs {
    /// Participants text of the meeting being edited
    #[arg(default_value = "")]
    pub participants: String,
}

pub fn new_form(ctx: &Context) -> anyhow::Result<()> {
    let conn = ctx.open_store()?;
    let service = DocumentService::new(SqliteDocRepository::new(&conn));
    let form = match service.get_draft()? {
        Some(draft) if service.has_local_edits(&draft)? => draft.to_form(),
        _ => service.blank_form()?,
    };
    println!("{}", serde_json::to_string_pretty(&form)?);
    Ok(())
}

pub fn save(ctx: &Context, args: SaveArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.input)?;
    let conn = ctx.open_store()?;
    let service = DocumentService::new(SqliteDocRepository::new(&conn));
    service.set_draft(&doc)?;

    let result = if args.as_new {
        service.save_as_new(&doc)
    } else {
        service.save(&doc)
    };
    match result {
        Ok(saved) => {
            println!("{}", saved.id);
            Ok(())
        }
        Err(DocumentServiceError::MissingDateOrTitle) => {
            bail!("{}", ctx.catalog.t("alerts.fillDateAndTitle", &[]))
        }
        Err(err) => Err(err.into()),
    }
}

pub fn list(ctx: &Context, args: ListArgs) -> anyhow::Result<()> {
    let conn = ctx.open_store()?;
    let service = DocumentService::new(SqliteDocRepository::new(&conn));
    if args.trash {
        for trashed in service.list_trash()? {
            println!(
                "{}\t{}\t{}",
                trashed.document.id,
                trashed.deleted_at,
                summary(ctx, &trashed.document)
            );
        }
        return Ok(());
    }
    for doc in service.list_documents()? {
        println!("{}\t{}", doc.id, summary(ctx, &doc));
    }
    Ok(())
}

pub fn trash(ctx: &Context, args: IdArgs) -> anyhow::Result<()> {
    with_service(ctx, |service| service.trash(&args.id))
}

pub fn restore(ctx: &Context, args: IdArgs) -> anyhow::Result<()> {
    with_service(ctx, |service| service.restore(&args.id))
}

pub fn purge(ctx: &Context, args: IdArgs) -> anyhow::Result<()> {
    with_service(ctx, |service| service.purge(&args.id))
}

pub fn names(ctx: &Context, args: NamesArgs) -> anyhow::Result<()> {
    let conn = ctx.open_store()?;
    let service = DocumentService::new(SqliteDocRepository::new(&conn));
    for name in service.participant_candidates(&args.participants)? {
        println!("@{name}");
    }
    Ok(())
}

fn with_service(
    ctx: &Context,
    action: impl FnOnce(&DocumentService<SqliteDocRepository<'_>>) -> Result<(), DocumentServiceError>,
) -> anyhow::Result<()> {
    let conn = ctx.open_store()?;
    let service = DocumentService::new(SqliteDocRepository::new(&conn));
    action(&service)?;
    Ok(())
}

fn summary(ctx: &Context, doc: &Document) -> String {
    let title = if doc.meeting_title.is_empty() {
        ctx.catalog.t("common.untitled", &[])
    } else {
        doc.meeting_title.clone()
    };
    format!("{} {title}", doc.meeting_date)
}
