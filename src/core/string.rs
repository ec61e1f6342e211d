//! Extension methods for `str`: classification, extraction, transforms and
//! byte conversion.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::bytes;
use crate::encoding::EncodingKind;
use crate::error::{Error, Result};
use crate::locale::{self, Locale};

// Decimal digits (Nd) and letters (L*), not the wider numeric/alphabetic sets.
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{Nd}").unwrap());
static ALL_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{Nd}*$").unwrap());
static LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{L}").unwrap());
static ALL_LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{L}*$").unwrap());

/// Which end of a string `take` reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Position {
    #[default]
    Start,
    End,
}

/// True for `None`, empty, or all-whitespace text.
pub fn is_empty(source: Option<&str>) -> bool {
    source.map_or(true, |s| s.trim().is_empty())
}

pub trait StrExt {
    fn is_int(&self, locale: &Locale) -> bool;
    fn is_double(&self, locale: &Locale) -> bool;
    fn is_decimal(&self, locale: &Locale) -> bool;
    fn is_boolean(&self) -> bool;
    fn is_date(&self, locale: &Locale) -> bool;
    fn is_empty_or_whitespace(&self) -> bool;

    fn contains_digits(&self) -> bool;
    fn contains_letters(&self) -> bool;
    /// Vacuously true for `""`.
    fn are_all_digits(&self) -> bool;
    /// Vacuously true for `""`.
    fn are_all_letters(&self) -> bool;

    /// Text after the first occurrence of the last character of `start`, up
    /// to the next occurrence of the first character of `end`, trimmed.
    ///
    /// Only one character of each delimiter is matched, so
    /// `"[start]middle[end]"` with `"[start]"`/`"[end]"` anchors on the first
    /// `]` and stops at the next `[`. Not a substring search.
    ///
    /// The stop is the *first* character of `end`, not its last: stopping at
    /// the last one would read `"[start]middle[end]"` as `"middle[end"`.
    fn get_in_between(&self, start: &str, end: &str) -> Result<String>;

    /// Upper-case the first letter of every word and lower-case the rest.
    /// Words that are already entirely upper case are left alone.
    fn to_title_case(&self, locale: &Locale) -> String;

    fn to_boolean(&self) -> Result<bool>;

    /// First or last `count` characters.
    fn take(&self, count: usize, from: Position) -> Result<String>;

    /// Replace every occurrence of each value in turn. Later values also
    /// match text introduced by earlier replacements.
    fn replace_multiple_with_one<S: AsRef<str>>(&self, values: &[S], replacement: &str)
        -> String;

    fn add_to_end(&self, text: &str, space_before: bool) -> String;
    fn add_to_start(&self, text: &str, space_after: bool) -> String;

    fn get_bytes(&self, encoding: EncodingKind) -> Vec<u8>;
    fn from_base64(&self) -> Result<Vec<u8>>;

    /// Extension of a file path, including the leading dot.
    fn file_extension(&self) -> Result<String>;
}

impl StrExt for str {
    fn is_int(&self, locale: &Locale) -> bool {
        locale.parse_int(self).is_some()
    }

    fn is_double(&self, locale: &Locale) -> bool {
        locale.is_double(self)
    }

    fn is_decimal(&self, locale: &Locale) -> bool {
        locale.is_decimal(self)
    }

    fn is_boolean(&self) -> bool {
        locale::parse_bool(self).is_some()
    }

    fn is_date(&self, locale: &Locale) -> bool {
        locale.parse_date(self).is_some()
    }

    fn is_empty_or_whitespace(&self) -> bool {
        is_empty(Some(self))
    }

    fn contains_digits(&self) -> bool {
        DIGIT.is_match(self)
    }

    fn contains_letters(&self) -> bool {
        LETTER.is_match(self)
    }

    fn are_all_digits(&self) -> bool {
        ALL_DIGITS.is_match(self)
    }

    fn are_all_letters(&self) -> bool {
        ALL_LETTERS.is_match(self)
    }

    fn get_in_between(&self, start: &str, end: &str) -> Result<String> {
        let anchor = start.chars().last().ok_or_else(|| {
            Error::validation_invalid_argument("start", "Start delimiter cannot be empty", None)
        })?;
        let stop = end.chars().next().ok_or_else(|| {
            Error::validation_invalid_argument("end", "End delimiter cannot be empty", None)
        })?;

        let between: String = self
            .chars()
            .skip_while(|c| *c != anchor)
            .skip(1)
            .take_while(|c| *c != stop)
            .collect();

        Ok(between.trim().to_string())
    }

    fn to_title_case(&self, locale: &Locale) -> String {
        let mut out = String::with_capacity(self.len());
        let mut word = String::new();

        for c in self.chars() {
            if c.is_alphanumeric() || c == '\'' {
                word.push(c);
            } else {
                title_case_word(&word, locale, &mut out);
                word.clear();
                out.push(c);
            }
        }
        title_case_word(&word, locale, &mut out);

        out
    }

    fn to_boolean(&self) -> Result<bool> {
        locale::parse_bool(self).ok_or_else(|| Error::validation_format(self, "boolean"))
    }

    fn take(&self, count: usize, from: Position) -> Result<String> {
        let length = self.chars().count();
        if count > length {
            return Err(Error::validation_index_out_of_bounds(count, length));
        }

        let taken = match from {
            Position::Start => self.chars().take(count).collect(),
            Position::End => self.chars().skip(length - count).collect(),
        };
        Ok(taken)
    }

    fn replace_multiple_with_one<S: AsRef<str>>(
        &self,
        values: &[S],
        replacement: &str,
    ) -> String {
        values
            .iter()
            .map(|value| -> &str { value.as_ref() })
            .filter(|value| !value.is_empty())
            .fold(self.to_string(), |text, value| text.replace(value, replacement))
    }

    fn add_to_end(&self, text: &str, space_before: bool) -> String {
        if space_before {
            format!("{} {}", self, text)
        } else {
            format!("{}{}", self, text)
        }
    }

    fn add_to_start(&self, text: &str, space_after: bool) -> String {
        if space_after {
            format!("{} {}", text, self)
        } else {
            format!("{}{}", text, self)
        }
    }

    fn get_bytes(&self, encoding: EncodingKind) -> Vec<u8> {
        encoding.encode(self)
    }

    fn from_base64(&self) -> Result<Vec<u8>> {
        bytes::from_base64(self)
    }

    fn file_extension(&self) -> Result<String> {
        Path::new(self)
            .extension()
            .map(|ext| ext.to_string_lossy())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{}", ext))
            .ok_or_else(|| {
                Error::validation_invalid_argument(
                    "file_path",
                    "Invalid file path: no extension",
                    Some(self.to_string()),
                )
            })
    }
}

fn title_case_word(word: &str, locale: &Locale, out: &mut String) {
    let mut letters = word.chars().filter(|c| c.is_alphabetic()).peekable();
    let is_acronym = letters.peek().is_some() && letters.all(char::is_uppercase);
    if is_acronym {
        out.push_str(word);
        return;
    }

    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        locale.push_upper(first, out);
    }
    for c in chars {
        locale.push_lower(c, out);
    }
}
