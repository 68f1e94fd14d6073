//! Free-text normalizers for the participants, topics and decisions fields.
//!
//! # Responsibility
//! - Turn one raw textarea string into an ordered list of structured items.
//! - Provide inverse renderers used to repopulate inputs for older records.
//!
//! # Invariants
//! - Normalizers are total: any input yields a (possibly empty) list.
//! - No emitted item consists only of whitespace or `.:;,-`.
//! - Output order follows input order.

pub mod decisions;
pub mod participants;
pub mod topics;

use once_cell::sync::Lazy;
use regex::Regex;

static USER_CONTENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\s.:;,\-]").expect("valid user content regex"));
static COMMA_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*\n\s*").expect("valid comma break regex"));
pub(crate) static BULLET_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*•\s]+").expect("valid bullet prefix regex"));
pub(crate) static NUMERIC_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+[.)]\s*").expect("valid numeric prefix regex"));

/// Returns whether `text` has at least one character outside `[\s.:;,-]`.
pub fn has_user_content(text: &str) -> bool {
    USER_CONTENT_RE.is_match(text)
}

/// Collapses a line break that follows a comma into `", "`.
///
/// Lets users wrap long comma-separated lists without splitting items.
pub fn stitch_comma_breaks(text: &str) -> String {
    COMMA_BREAK_RE.replace_all(text, ", ").into_owned()
}

/// Strips carriage returns and surrounding whitespace.
pub fn normalize_raw_text(value: &str) -> String {
    value.replace('\r', "").trim().to_string()
}

pub(crate) fn strip_list_prefix(value: &str) -> String {
    let without_bullet = BULLET_PREFIX_RE.replace(value, "");
    NUMERIC_PREFIX_RE.replace(&without_bullet, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::{has_user_content, normalize_raw_text, stitch_comma_breaks, strip_list_prefix};

    #[test]
    fn user_content_ignores_separators() {
        assert!(!has_user_content(" .:;,- "));
        assert!(!has_user_content(""));
        assert!(has_user_content("- a"));
    }

    #[test]
    fn stitches_breaks_after_commas_only() {
        assert_eq!(stitch_comma_breaks("a,\n  b\nc"), "a, b\nc");
        assert_eq!(stitch_comma_breaks("a ,  \n\n b"), "a , b");
    }

    #[test]
    fn raw_text_drops_carriage_returns() {
        assert_eq!(normalize_raw_text("  a\r\nb \r\n"), "a\nb");
    }

    #[test]
    fn list_prefix_strips_bullet_then_number() {
        assert_eq!(strip_list_prefix("- 2) item"), "item");
        assert_eq!(strip_list_prefix("• 10. item"), "item");
        assert_eq!(strip_list_prefix("2024 plan"), "2024 plan");
    }
}
