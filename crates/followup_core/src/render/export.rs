//! Export file naming.

use crate::i18n::Translator;
use crate::model::document::Document;

/// `"{meeting date or fileBase}-{id}.{ext}"`.
pub fn export_file_name(doc: &Document, extension: &str, translator: &dyn Translator) -> String {
    let base = if doc.meeting_date.is_empty() {
        translator.t("common.fileBase", &[])
    } else {
        doc.meeting_date.clone()
    };
    format!("{base}-{}.{extension}", doc.id)
}

#[cfg(test)]
mod tests {
    use super::export_file_name;
    use crate::i18n::{Catalog, Locale};
    use crate::model::document::Document;

    #[test]
    fn uses_meeting_date_or_localized_base() {
        let catalog = Catalog::new(Locale::En);
        let mut doc = Document {
            id: "abc".to_string(),
            ..Document::default()
        };
        assert_eq!(export_file_name(&doc, "md", &catalog), "protocol-abc.md");

        doc.meeting_date = "2024-05-01".to_string();
        assert_eq!(export_file_name(&doc, "txt", &catalog), "2024-05-01-abc.txt");
    }
}
