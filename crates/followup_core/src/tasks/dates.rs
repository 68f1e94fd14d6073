//! Loose due-date detection inside free text.
//!
//! # Responsibility
//! - Locate date-like tokens in a line and convert them to ISO dates.
//! - Resolve slash-date ambiguity by locale.
//!
//! # Invariants
//! - Token boundaries use ASCII word semantics (`[A-Za-z0-9_]`), so Cyrillic
//!   or other letters next to digits still delimit a token.
//! - Only real calendar dates are accepted (no Feb 30, no Feb 29 off leap years).
//! - Dot dates are always day-first; slash dates are month-first for English.

use crate::i18n::Locale;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ISO_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid iso regex"));
static MONTH_YEAR_DOT_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2})\.([0-9]{4})$").expect("valid month/year regex"));
static DOT_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})\.([0-9]{1,2})(?:\.([0-9]{2}|[0-9]{4}))?$")
        .expect("valid dot date regex")
});
static MONTH_YEAR_SLASH_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2})/([0-9]{4})$").expect("valid month/year regex"));
static SLASH_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})(?:/([0-9]{2}|[0-9]{4}))?$")
        .expect("valid slash date regex")
});

/// A date token located within one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    /// Token text as typed.
    pub value: String,
    /// Normalized `yyyy-mm-dd`.
    pub iso: String,
    /// Byte offset of the token start.
    pub start: usize,
    /// Byte offset one past the token end.
    pub end: usize,
}

/// Token shapes, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenShape {
    /// `yyyy-mm-dd`
    Iso,
    /// `m.yyyy`
    MonthYearDot,
    /// `d.m`, `d.m.yy`, `d.m.yyyy`
    Dot,
    /// `m/yyyy`
    MonthYearSlash,
    /// `a/b`, `a/b/yy`, `a/b/yyyy`
    Slash,
}

const SCAN_ORDER: [TokenShape; 5] = [
    TokenShape::Iso,
    TokenShape::MonthYearDot,
    TokenShape::Dot,
    TokenShape::MonthYearSlash,
    TokenShape::Slash,
];

/// Builds `yyyy-mm-dd` when the components form a real calendar date.
pub fn to_iso_date(year: i32, month: u32, day: u32) -> Option<String> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    if date.year() != year || date.month() != month || date.day() != day {
        return None;
    }
    Some(format!("{:04}-{:02}-{:02}", year, month, day))
}

/// Accepts only a strict `yyyy-mm-dd` calendar date, as typed in a due field.
pub fn parse_iso_date(value: &str) -> Option<String> {
    let caps = ISO_TOKEN_RE.captures(value.trim())?;
    to_iso_date(number(&caps, 1)?, number(&caps, 2)?, number(&caps, 3)?)
}

/// Converts one loosely formatted date token into an ISO date.
///
/// Tokens without a year use `current_year`; two-digit years mean `2000+yy`.
/// `m/yyyy` is only understood under the English locale.
pub fn parse_loose_date_token(token: &str, locale: Locale, current_year: i32) -> Option<String> {
    if let Some(caps) = ISO_TOKEN_RE.captures(token) {
        return to_iso_date(number(&caps, 1)?, number(&caps, 2)?, number(&caps, 3)?);
    }

    if let Some(caps) = MONTH_YEAR_DOT_TOKEN_RE.captures(token) {
        return to_iso_date(number(&caps, 2)?, number(&caps, 1)?, 1);
    }

    if let Some(caps) = DOT_TOKEN_RE.captures(token) {
        let year = year_or_current(&caps, 3, current_year)?;
        return to_iso_date(year, number(&caps, 2)?, number(&caps, 1)?);
    }

    if let Some(caps) = MONTH_YEAR_SLASH_TOKEN_RE.captures(token) {
        if !locale.is_english() {
            return None;
        }
        return to_iso_date(number(&caps, 2)?, number(&caps, 1)?, 1);
    }

    if let Some(caps) = SLASH_TOKEN_RE.captures(token) {
        let year = year_or_current(&caps, 3, current_year)?;
        let first = number(&caps, 1)?;
        let second = number(&caps, 2)?;
        let (month, day) = if locale.is_english() {
            (first, second)
        } else {
            (second, first)
        };
        return to_iso_date(year, month, day);
    }

    None
}

/// Finds the right-most valid date token in `text`.
///
/// Shapes are scanned one after another and a later candidate replaces the
/// running result when it starts at or after it. Position alone decides, so
/// `05.2024` inside `12.05.2024` wins over the full token.
pub fn find_last_due_date(text: &str, locale: Locale, current_year: i32) -> Option<DateMatch> {
    let spans = SCAN_ORDER
        .iter()
        .flat_map(|shape| scan_tokens(text, *shape));

    let mut last: Option<DateMatch> = None;
    for (start, end) in spans {
        let token = &text[start..end];
        let Some(iso) = parse_loose_date_token(token, locale, current_year) else {
            continue;
        };
        if last.as_ref().map_or(true, |current| start >= current.start) {
            last = Some(DateMatch {
                value: token.to_string(),
                iso,
                start,
                end,
            });
        }
    }
    last
}

fn number<T: std::str::FromStr>(caps: &Captures<'_>, index: usize) -> Option<T> {
    caps.get(index)?.as_str().parse().ok()
}

fn year_or_current(caps: &Captures<'_>, index: usize, current_year: i32) -> Option<i32> {
    match caps.get(index) {
        None => Some(current_year),
        Some(raw) => {
            let value: i32 = raw.as_str().parse().ok()?;
            if raw.as_str().len() == 2 {
                Some(2000 + value)
            } else {
                Some(value)
            }
        }
    }
}

/// Returns non-overlapping `(start, end)` byte spans of `shape` tokens.
///
/// A token must start after a non-word character (or at the start) and end
/// before one (or at the end).
fn scan_tokens(text: &str, shape: TokenShape) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let at_boundary = pos == 0 || !is_word_byte(bytes[pos - 1]);
        if at_boundary && bytes[pos].is_ascii_digit() {
            if let Some(end) = match_shape_at(bytes, pos, shape) {
                spans.push((pos, end));
                pos = end;
                continue;
            }
        }
        pos += 1;
    }
    spans
}

fn match_shape_at(bytes: &[u8], start: usize, shape: TokenShape) -> Option<usize> {
    match shape {
        TokenShape::Iso => {
            let mut pos = exact_digits(bytes, start, 4)?;
            pos = expect_byte(bytes, pos, b'-')?;
            pos = exact_digits(bytes, pos, 2)?;
            pos = expect_byte(bytes, pos, b'-')?;
            pos = exact_digits(bytes, pos, 2)?;
            ends_token(bytes, pos)
        }
        TokenShape::MonthYearDot => month_year(bytes, start, b'.'),
        TokenShape::MonthYearSlash => month_year(bytes, start, b'/'),
        TokenShape::Dot => day_month_year(bytes, start, b'.'),
        TokenShape::Slash => day_month_year(bytes, start, b'/'),
    }
}

fn month_year(bytes: &[u8], start: usize, separator: u8) -> Option<usize> {
    let pos = short_digits(bytes, start)?;
    let pos = expect_byte(bytes, pos, separator)?;
    let pos = exact_digits(bytes, pos, 4)?;
    ends_token(bytes, pos)
}

fn day_month_year(bytes: &[u8], start: usize, separator: u8) -> Option<usize> {
    let pos = short_digits(bytes, start)?;
    let pos = expect_byte(bytes, pos, separator)?;
    let pos = short_digits(bytes, pos)?;

    if let Some(year_start) = expect_byte(bytes, pos, separator) {
        for year_len in [2, 4] {
            let with_year =
                exact_digits(bytes, year_start, year_len).and_then(|end| ends_token(bytes, end));
            if with_year.is_some() {
                return with_year;
            }
        }
    }
    ends_token(bytes, pos)
}

/// One or two digits forming a whole digit run.
fn short_digits(bytes: &[u8], start: usize) -> Option<usize> {
    let run = digit_run(bytes, start);
    if (1..=2).contains(&run) {
        Some(start + run)
    } else {
        None
    }
}

/// Exactly `len` digits, not followed by another digit.
fn exact_digits(bytes: &[u8], start: usize, len: usize) -> Option<usize> {
    if digit_run(bytes, start) == len {
        Some(start + len)
    } else {
        None
    }
}

fn digit_run(bytes: &[u8], start: usize) -> usize {
    bytes
        .get(start..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}

fn expect_byte(bytes: &[u8], pos: usize, expected: u8) -> Option<usize> {
    (bytes.get(pos) == Some(&expected)).then_some(pos + 1)
}

fn ends_token(bytes: &[u8], pos: usize) -> Option<usize> {
    match bytes.get(pos) {
        Some(&next) if is_word_byte(next) => None,
        _ => Some(pos),
    }
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}
