use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::boolean::BoolExt;
use crate::bytes::{Base64Formatting, BytesExt};
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::utils::{io, validation};
use crate::xml::{XmlFormatting, XmlOptions};

const INLINE_SOURCE: &str = "<inline>";

/// Caller-owned defaults for the locale-, pattern- and format-sensitive
/// helpers. Every field is optional in the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Either a tag (`"de-DE"`) or a full locale object.
    #[serde(default = "default_locale", deserialize_with = "deserialize_locale")]
    pub locale: Locale,

    #[serde(default = "default_yes_no_pattern")]
    pub yes_no_pattern: String,

    #[serde(default = "default_xml_indentation")]
    pub xml_indentation: usize,

    #[serde(default = "default_xml_formatting")]
    pub xml_formatting: XmlFormatting,

    #[serde(default = "default_base64_formatting")]
    pub base64_formatting: Base64Formatting,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            yes_no_pattern: default_yes_no_pattern(),
            xml_indentation: default_xml_indentation(),
            xml_formatting: default_xml_formatting(),
            base64_formatting: default_base64_formatting(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocaleSetting {
    Tag(String),
    Full(Locale),
}

fn deserialize_locale<'de, D>(deserializer: D) -> std::result::Result<Locale, D::Error>
where
    D: Deserializer<'de>,
{
    match LocaleSetting::deserialize(deserializer)? {
        LocaleSetting::Tag(tag) => Locale::from_tag(&tag).map_err(|e| D::Error::custom(e.message)),
        LocaleSetting::Full(locale) => Ok(locale),
    }
}

fn default_locale() -> Locale {
    Locale::en_us()
}

fn default_yes_no_pattern() -> String {
    "Yes|No".to_string()
}

fn default_xml_indentation() -> usize {
    4
}

fn default_xml_formatting() -> XmlFormatting {
    XmlFormatting::Indented
}

fn default_base64_formatting() -> Base64Formatting {
    Base64Formatting::None
}

impl Settings {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::config_invalid_json(INLINE_SOURCE, e.to_string()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::config_invalid_json(INLINE_SOURCE, e.to_string()))
    }

    /// Load from a `.json` or `.toml` file; `~` and `$VARS` are expanded.
    pub fn load(path: &Path) -> Result<Self> {
        let path = io::expand_path(path);
        validation::require_existing(&path)?;
        let content = io::read_file(&path, "read settings")?;
        let location = path.display().to_string();

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| Error::config_invalid_json(location, e.to_string())),
            Some("json") | None => serde_json::from_str(&content)
                .map_err(|e| Error::config_invalid_json(location, e.to_string())),
            Some(other) => Err(Error::config_invalid_value(
                "path",
                Some(location),
                format!("Unsupported settings format '.{}'", other),
            )
            .with_hint("Use a .json or .toml file")),
        }
    }

    /// Load when the file exists, otherwise the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if io::expand_path(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn xml_options(&self, root: impl Into<String>) -> XmlOptions {
        XmlOptions::new(root)
            .formatting(self.xml_formatting)
            .indentation(self.xml_indentation)
    }

    pub fn yes_no(&self, value: bool) -> Result<String> {
        value.to_yes_no_with(&self.yes_no_pattern)
    }

    /// Base64 with the configured line-break formatting.
    pub fn to_base64(&self, bytes: &[u8]) -> String {
        bytes.to_base64(self.base64_formatting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_document_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.locale.name, "en-US");
        assert_eq!(settings.yes_no_pattern, "Yes|No");
        assert_eq!(settings.xml_indentation, 4);
    }

    #[test]
    fn locale_accepts_tag() {
        let settings = Settings::from_json(r#"{"locale": "de-DE", "yesNoPattern": "Ja|Nein"}"#)
            .unwrap();
        assert_eq!(settings.locale, Locale::de_de());
        assert_eq!(settings.yes_no(false).unwrap(), "Nein");
    }

    #[test]
    fn locale_accepts_full_object() {
        let settings = Settings::from_json(
            r#"{"locale": {"name": "custom", "decimalSeparator": ",", "groupSeparator": " "}}"#,
        )
        .unwrap();
        assert_eq!(settings.locale.group_separator, ' ');
        assert!(settings.locale.date_formats.is_empty());
    }

    #[test]
    fn unknown_locale_tag_is_rejected() {
        let err = Settings::from_json(r#"{"locale": "xx-YY"}"#).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }

    #[test]
    fn toml_settings() {
        let settings = Settings::from_toml(
            "locale = \"tr-TR\"\nxmlIndentation = 2\nbase64Formatting = \"insertLineBreaks\"\n",
        )
        .unwrap();
        assert_eq!(settings.locale, Locale::tr_tr());
        assert_eq!(settings.xml_indentation, 2);
        assert_eq!(settings.base64_formatting, Base64Formatting::InsertLineBreaks);
        assert_eq!(settings.xml_options("Doc").indentation, 2);
    }

    #[test]
    fn base64_follows_configured_formatting() {
        let data = vec![0xABu8; 100];
        assert!(!Settings::default().to_base64(&data).contains('\n'));

        let settings = Settings::from_json(r#"{"base64Formatting": "insertLineBreaks"}"#).unwrap();
        let encoded = settings.to_base64(&data);
        assert_eq!(encoded.split("\r\n").next().unwrap().len(), 76);
        assert_eq!(encoded.replace("\r\n", ""), data.to_base64(Base64Formatting::None));
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("settings.json");
        std::fs::write(&json, r#"{"xmlFormatting": "none"}"#).unwrap();
        assert_eq!(
            Settings::load(&json).unwrap().xml_formatting,
            XmlFormatting::None
        );

        let yaml = dir.path().join("settings.yaml");
        std::fs::write(&yaml, "locale: en-GB").unwrap();
        let err = Settings::load(&yaml).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn malformed_file_reports_location() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Settings::load(&path).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
        assert_eq!(err.details["path"], path.display().to_string());
    }
}
