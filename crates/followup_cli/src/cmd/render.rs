use super::{load_document, Context};
use clap::{Args, ValueEnum};
use followup_core::{build_clipboard_html, render_preview_text, Document, ProtocolRenderer};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderFormat {
    /// Plain protocol text with `*`/`**`/`~~` markup
    Text,
    /// Markdown-safe text
    Markdown,
    /// Escaped HTML preview fragment
    Html,
    /// HTML wrapped for rich clipboard paste
    Clipboard,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Meeting form or stored document JSON (`-` for stdin)
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = RenderFormat::Text)]
    pub format: RenderFormat,
}

pub fn run(ctx: &Context, args: RenderArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.input)?;
    println!("{}", render(ctx, &doc, args.format)?);
    Ok(())
}

pub fn render(ctx: &Context, doc: &Document, format: RenderFormat) -> anyhow::Result<String> {
    let resolver = ctx.resolver(ctx.history_participants()?);
    let renderer = ProtocolRenderer::new(&ctx.catalog, ctx.locale, &resolver);
    let out = match format {
        RenderFormat::Text => renderer.generate_text(doc),
        RenderFormat::Markdown => renderer.generate_markdown_text(doc),
        RenderFormat::Html => render_preview_text(&renderer.generate_text(doc)),
        RenderFormat::Clipboard => build_clipboard_html(&renderer.generate_text(doc)),
    };
    Ok(out)
}
