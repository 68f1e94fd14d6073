//! HTML preview of rendered protocol text.
//!
//! Markup is converted strike first, then strong, then emphasis, so `**`
//! pairs are consumed before single `*` markers are considered.

use once_cell::sync::Lazy;
use regex::Regex;

static STRIKE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"~~([^~\n]+)~~").expect("valid strike markup regex"));
static STRONG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").expect("valid strong markup regex"));
static EMPHASIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").expect("valid emphasis markup regex"));

/// Escapes `&`, `<` and `>`.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escaped text with `~~`, `**` and `*` markup turned into HTML tags.
pub fn render_preview_text(text: &str) -> String {
    let escaped = escape_html(text);
    let struck = STRIKE_RE.replace_all(&escaped, "<s>$1</s>");
    let strong = STRONG_RE.replace_all(&struck, "<strong>$1</strong>");
    EMPHASIS_RE
        .replace_all(&strong, "<em>$1</em>")
        .into_owned()
}

/// Rich clipboard payload preserving line breaks.
pub fn build_clipboard_html(text: &str) -> String {
    format!(
        "<div style=\"white-space: pre-wrap;\">{}</div>",
        render_preview_text(text)
    )
}

#[cfg(test)]
mod tests {
    use super::{build_clipboard_html, escape_html, render_preview_text};

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn converts_markers_in_fixed_order() {
        assert_eq!(
            render_preview_text("3.1. **Ship it!!**\n- *Wow!*\n4.1. ~~[v] Done~~"),
            "3.1. <strong>Ship it!!</strong>\n- <em>Wow!</em>\n4.1. <s>[v] Done</s>"
        );
    }

    #[test]
    fn markers_do_not_span_lines() {
        assert_eq!(render_preview_text("*a\nb*"), "*a\nb*");
    }

    #[test]
    fn clipboard_wraps_in_pre_wrap_div() {
        assert_eq!(
            build_clipboard_html("<b>"),
            "<div style=\"white-space: pre-wrap;\">&lt;b&gt;</div>"
        );
    }
}
