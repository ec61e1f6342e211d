//! Explicit culture rules for casing, number grammars and date patterns.
//!
//! Nothing here reads process-wide state: every locale-sensitive helper takes
//! a `&Locale`, and callers either build one with the named constructors or
//! deserialize it from settings.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DECIMAL_MAX_INTEGER_DIGITS: &str = "79228162514264337593543950335";

const ISO_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d",
];

const DOUBLE_SYMBOLS: &[&str] = &["NaN", "Infinity", "-Infinity", "+Infinity", "∞", "-∞", "+∞"];

/// Case mapping rules applied by title casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Casing {
    #[default]
    Default,
    /// Dotted/dotless i: `i`↔`İ`, `ı`↔`I`.
    Turkic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    pub name: String,
    pub decimal_separator: char,
    pub group_separator: char,
    #[serde(default)]
    pub casing: Casing,
    /// chrono patterns tried after the ISO-8601/RFC formats.
    #[serde(default)]
    pub date_formats: Vec<String>,
}

impl Default for Locale {
    fn default() -> Self {
        Self::invariant()
    }
}

fn with_times(date: &str) -> Vec<String> {
    vec![
        date.to_string(),
        format!("{} %H:%M", date),
        format!("{} %H:%M:%S", date),
    ]
}

impl Locale {
    pub fn invariant() -> Self {
        Self {
            name: String::new(),
            decimal_separator: '.',
            group_separator: ',',
            casing: Casing::Default,
            date_formats: with_times("%m/%d/%Y"),
        }
    }

    pub fn en_us() -> Self {
        let mut date_formats = with_times("%m/%d/%Y");
        date_formats.extend([
            "%m/%d/%Y %I:%M %p".to_string(),
            "%m/%d/%Y %I:%M:%S %p".to_string(),
            "%B %d, %Y".to_string(),
            "%b %d, %Y".to_string(),
        ]);
        Self {
            name: "en-US".to_string(),
            date_formats,
            ..Self::invariant()
        }
    }

    pub fn en_gb() -> Self {
        let mut date_formats = with_times("%d/%m/%Y");
        date_formats.push("%d %B %Y".to_string());
        Self {
            name: "en-GB".to_string(),
            date_formats,
            ..Self::invariant()
        }
    }

    pub fn de_de() -> Self {
        Self {
            name: "de-DE".to_string(),
            decimal_separator: ',',
            group_separator: '.',
            casing: Casing::Default,
            date_formats: with_times("%d.%m.%Y"),
        }
    }

    pub fn fr_fr() -> Self {
        Self {
            name: "fr-FR".to_string(),
            decimal_separator: ',',
            group_separator: '\u{202F}',
            casing: Casing::Default,
            date_formats: with_times("%d/%m/%Y"),
        }
    }

    pub fn tr_tr() -> Self {
        Self {
            name: "tr-TR".to_string(),
            decimal_separator: ',',
            group_separator: '.',
            casing: Casing::Turkic,
            date_formats: with_times("%d.%m.%Y"),
        }
    }

    /// Resolve a BCP-47 style tag (case-insensitive, `_` or `-`).
    pub fn from_tag(tag: &str) -> Result<Self> {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        match normalized.as_str() {
            "" | "invariant" => Ok(Self::invariant()),
            "en" | "en-us" => Ok(Self::en_us()),
            "en-gb" => Ok(Self::en_gb()),
            "de" | "de-de" => Ok(Self::de_de()),
            "fr" | "fr-fr" => Ok(Self::fr_fr()),
            "tr" | "tr-tr" => Ok(Self::tr_tr()),
            _ => Err(Error::validation_invalid_argument(
                "locale",
                format!("Unknown locale tag '{}'", tag),
                Some(tag.to_string()),
            )
            .with_hint("Known tags: invariant, en-US, en-GB, de-DE, fr-FR, tr-TR")),
        }
    }

    pub fn push_upper(&self, c: char, out: &mut String) {
        match (self.casing, c) {
            (Casing::Turkic, 'i') => out.push('İ'),
            (Casing::Turkic, 'ı') => out.push('I'),
            _ => out.extend(c.to_uppercase()),
        }
    }

    pub fn push_lower(&self, c: char, out: &mut String) {
        match (self.casing, c) {
            (Casing::Turkic, 'I') => out.push('ı'),
            (Casing::Turkic, 'İ') => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }

    /// Integer grammar: surrounding whitespace, optional sign, ASCII digits,
    /// value within `i32`.
    pub fn parse_int(&self, source: &str) -> Option<i32> {
        let trimmed = source.trim();
        let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        trimmed.parse::<i32>().ok()
    }

    /// Unsigned mantissa: digits with group separators in the integer part,
    /// optional decimal separator and fraction.
    fn mantissa_pattern(&self) -> String {
        let g = regex::escape(&self.group_separator.to_string());
        let d = regex::escape(&self.decimal_separator.to_string());
        format!(r"(?:[0-9][0-9{g}]*(?:{d}[0-9]*)?|{d}[0-9]+)")
    }

    /// Floating point grammar, including exponent and NaN/Infinity symbols.
    /// Magnitude overflow still counts as a valid double.
    pub fn is_double(&self, source: &str) -> bool {
        let trimmed = source.trim();
        if DOUBLE_SYMBOLS.contains(&trimmed) {
            return true;
        }
        let pattern = format!(r"^[+-]?{}(?:[eE][+-]?[0-9]+)?$", self.mantissa_pattern());
        Regex::new(&pattern)
            .map(|re| re.is_match(trimmed))
            .unwrap_or(false)
    }

    /// Decimal grammar: no exponent, sign leading or trailing, integer part
    /// within 96 bits.
    pub fn is_decimal(&self, source: &str) -> bool {
        let trimmed = source.trim();
        let mantissa = self.mantissa_pattern();
        let pattern = format!(r"^(?:[+-]?({m})|({m})[+-])$", m = mantissa);
        let Ok(re) = Regex::new(&pattern) else {
            return false;
        };
        let Some(caps) = re.captures(trimmed) else {
            return false;
        };
        let body = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or("");

        let integer_part = body
            .split(self.decimal_separator)
            .next()
            .unwrap_or("")
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect::<String>();
        let significant = integer_part.trim_start_matches('0');

        significant.len() < DECIMAL_MAX_INTEGER_DIGITS.len()
            || (significant.len() == DECIMAL_MAX_INTEGER_DIGITS.len()
                && significant <= DECIMAL_MAX_INTEGER_DIGITS)
    }

    /// Date grammar: RFC 3339, RFC 2822, ISO-8601 variants, then this
    /// locale's own patterns. Offsets are dropped, keeping local wall time.
    pub fn parse_date(&self, source: &str) -> Option<NaiveDateTime> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(dt.naive_local());
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
            return Some(dt.naive_local());
        }

        ISO_DATE_FORMATS
            .iter()
            .copied()
            .chain(self.date_formats.iter().map(String::as_str))
            .find_map(|format| {
                NaiveDateTime::parse_from_str(trimmed, format)
                    .ok()
                    .or_else(|| {
                        NaiveDate::parse_from_str(trimmed, format)
                            .ok()
                            .and_then(|date| date.and_hms_opt(0, 0, 0))
                    })
            })
    }

    /// `N0` formatting: integer digits grouped by three.
    pub fn group_digits(&self, value: i64) -> String {
        let digits = value.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if value < 0 {
            out.push('-');
        }
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(c);
        }
        out
    }
}

/// Boolean grammar: `true`/`false`, case-insensitive, trimmed. The same in
/// every culture.
pub fn parse_bool(source: &str) -> Option<bool> {
    let trimmed = source.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
