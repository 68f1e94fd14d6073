//! Localization: locale selection, message catalogs and date display.
//!
//! # Responsibility
//! - Resolve the active locale from override and environment preferences.
//! - Provide the `t(key, params)` string-template lookup consumed by renderers.
//! - Format due dates the way each locale displays them.
//!
//! # Invariants
//! - Lookup never fails: missing keys fall back to English, then to the key.
//! - Unknown `{placeholders}` are left verbatim.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static EN_MESSAGES: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("locales/en.json")).expect("valid en message catalog")
});
static RU_MESSAGES: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("locales/ru.json")).expect("valid ru message catalog")
});
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-zA-Z0-9_]+)\}").expect("valid placeholder regex"));

const EN_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const RU_MONTHS_GENITIVE_SHORT: [&str; 12] = [
    "янв.", "февр.", "мар.", "апр.", "мая", "июн.", "июл.", "авг.", "сент.", "окт.", "нояб.",
    "дек.",
];

/// Supported UI/protocol locales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    /// English; slash dates read month-first.
    #[default]
    En,
    /// Russian; slash dates read day-first.
    Ru,
}

impl Locale {
    /// Parses a language tag such as `en`, `ru-RU` or `ru_RU.UTF-8`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let language = tag
            .trim()
            .to_ascii_lowercase()
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_string();
        match language.as_str() {
            "en" => Some(Self::En),
            "ru" => Some(Self::Ru),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }

    /// BCP 47 tag used for date display.
    pub fn intl_tag(self) -> &'static str {
        match self {
            Self::En => "en-US",
            Self::Ru => "ru-RU",
        }
    }

    /// English reads ambiguous slash dates month-first.
    pub fn is_english(self) -> bool {
        matches!(self, Self::En)
    }

    /// Medium date style: `May 2, 2024` / `2 мая 2024 г.`.
    pub fn format_medium_date(self, date: NaiveDate) -> String {
        let month = date.month0() as usize;
        match self {
            Self::En => format!("{} {}, {}", EN_MONTHS_SHORT[month], date.day(), date.year()),
            Self::Ru => format!(
                "{} {} {} г.",
                date.day(),
                RU_MONTHS_GENITIVE_SHORT[month],
                date.year()
            ),
        }
    }

    /// Short numeric date style: `5/2/2024` / `02.05.2024`.
    pub fn format_short_date(self, date: NaiveDate) -> String {
        match self {
            Self::En => format!("{}/{}/{}", date.month(), date.day(), date.year()),
            Self::Ru => date.format("%d.%m.%Y").to_string(),
        }
    }

    fn messages(self) -> &'static Value {
        match self {
            Self::En => &*EN_MESSAGES,
            Self::Ru => &*RU_MESSAGES,
        }
    }
}

/// Picks the first supported locale among preferences, falling back to English.
///
/// Callers pass an explicit override first, then environment-derived tags.
pub fn resolve_locale<'a>(preferences: impl IntoIterator<Item = &'a str>) -> Locale {
    preferences
        .into_iter()
        .find_map(Locale::from_tag)
        .unwrap_or_default()
}

/// String-template provider injected into renderers and reports.
pub trait Translator {
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &[(&str, &str)]) -> String,
{
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        self(key, params)
    }
}

/// Built-in message catalog for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    locale: Locale,
}

impl Catalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl Translator for Catalog {
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        let template = lookup(self.locale.messages(), key)
            .or_else(|| lookup(Locale::En.messages(), key));
        match template {
            Some(template) => interpolate(template, params),
            None => key.to_string(),
        }
    }
}

fn lookup<'v>(messages: &'v Value, key: &str) -> Option<&'v str> {
    key.split('.')
        .try_fold(messages, |node, part| node.get(part))
        .and_then(Value::as_str)
}

fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let token = &caps[1];
            params
                .iter()
                .find(|(name, _)| *name == token)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::{resolve_locale, Catalog, Locale, Translator};
    use chrono::NaiveDate;

    #[test]
    fn resolve_locale_takes_first_supported_preference() {
        assert_eq!(resolve_locale(["", "de-DE", "ru_RU.UTF-8", "en"]), Locale::Ru);
        assert_eq!(resolve_locale(["fr"]), Locale::En);
        assert_eq!(resolve_locale(Vec::<&str>::new()), Locale::En);
    }

    #[test]
    fn catalog_interpolates_and_falls_back() {
        let ru = Catalog::new(Locale::Ru);
        assert_eq!(ru.t("reports.overdue", &[("count", "3")]), "Просрочено: 3");
        assert_eq!(ru.t("missing.key", &[]), "missing.key");
        assert_eq!(
            Catalog::new(Locale::En).t("reports.overdue", &[]),
            "Overdue: {count}"
        );
    }

    #[test]
    fn closures_act_as_translators() {
        let t = |key: &str, _params: &[(&str, &str)]| format!("<{key}>");
        assert_eq!(t.t("common.empty", &[]), "<common.empty>");
    }

    #[test]
    fn formats_dates_per_locale() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(Locale::En.format_medium_date(date), "May 2, 2024");
        assert_eq!(Locale::Ru.format_medium_date(date), "2 мая 2024 г.");
        assert_eq!(Locale::En.format_short_date(date), "5/2/2024");
        assert_eq!(Locale::Ru.format_short_date(date), "02.05.2024");
    }
}
