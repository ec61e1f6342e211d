//! XML documents from any `Serialize` type.
//!
//! The entity is first turned into a `serde_json::Value` (field order is
//! preserved), then streamed through a `quick_xml::Writer` as nested
//! elements:
//! - struct fields become child elements named in UpperCamelCase
//! - `None`/null fields are omitted
//! - sequences repeat the element once per item
//! - empty strings and empty structs become self-closing elements (`<Name/>`)

use std::path::Path;

use heck::ToUpperCamelCase;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::encoding::EncodingKind;
use crate::error::{Error, Result};
use crate::log_status;
use crate::utils::{io, validation};

const ARRAY_ITEM_ELEMENT: &str = "Item";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum XmlFormatting {
    None,
    #[default]
    Indented,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlOptions {
    /// Name of the document element.
    pub root: String,
    pub formatting: XmlFormatting,
    /// Spaces per nesting level when indented.
    pub indentation: usize,
    pub encoding: EncodingKind,
}

impl XmlOptions {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            formatting: XmlFormatting::Indented,
            indentation: 4,
            encoding: EncodingKind::Default,
        }
    }

    pub fn formatting(mut self, formatting: XmlFormatting) -> Self {
        self.formatting = formatting;
        self
    }

    pub fn indentation(mut self, indentation: usize) -> Self {
        self.indentation = indentation;
        self
    }

    pub fn encoding(mut self, encoding: EncodingKind) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Turn a serde field name into a valid element name.
pub fn element_name(key: &str) -> String {
    let camel = key.to_upper_camel_case();
    let mut name: String = camel
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if !name.starts_with(|c: char| c.is_alphabetic() || c == '_') {
        name.insert(0, '_');
    }
    name
}

fn write_error(err: impl std::fmt::Display) -> Error {
    Error::internal_unexpected(format!("Failed to write XML: {}", err))
}

struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    fn new(options: &XmlOptions) -> Self {
        let inner = match options.formatting {
            XmlFormatting::Indented => {
                Writer::new_with_indent(Vec::new(), b' ', options.indentation)
            }
            XmlFormatting::None => Writer::new(Vec::new()),
        };
        Self { inner }
    }

    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        self.inner.write_event(event).map_err(write_error)
    }

    fn element(&mut self, name: &str, value: &Value) -> Result<()> {
        match value {
            Value::Null => Ok(()),
            Value::Array(items) => items.iter().try_for_each(|item| self.element(name, item)),
            Value::Object(fields) if fields.values().all(Value::is_null) => {
                self.emit(Event::Empty(BytesStart::new(name)))
            }
            Value::Object(fields) => {
                self.emit(Event::Start(BytesStart::new(name)))?;
                for (key, child) in fields {
                    self.element(&element_name(key), child)?;
                }
                self.emit(Event::End(BytesEnd::new(name)))
            }
            Value::String(text) if text.is_empty() => {
                self.emit(Event::Empty(BytesStart::new(name)))
            }
            scalar => {
                let text = match scalar {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                self.emit(Event::Start(BytesStart::new(name)))?;
                self.emit(Event::Text(BytesText::new(&text)))?;
                self.emit(Event::End(BytesEnd::new(name)))
            }
        }
    }

    fn document(mut self, value: &Value, options: &XmlOptions) -> Result<String> {
        let label = options.encoding.label();
        self.emit(Event::Decl(BytesDecl::new("1.0", Some(label), None)))?;

        let root = options.root.as_str();
        match value {
            Value::Array(items) => {
                self.emit(Event::Start(BytesStart::new(root)))?;
                for item in items {
                    self.element(ARRAY_ITEM_ELEMENT, item)?;
                }
                self.emit(Event::End(BytesEnd::new(root)))?;
            }
            Value::Null => self.emit(Event::Empty(BytesStart::new(root)))?,
            other => self.element(root, other)?,
        }

        String::from_utf8(self.inner.into_inner()).map_err(write_error)
    }
}

pub fn to_xml_string<T: Serialize + ?Sized>(entity: &T, options: &XmlOptions) -> Result<String> {
    validation::require_non_empty(&options.root, "root", "Root element name cannot be empty")?;
    let value = serde_json::to_value(entity)
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize XML entity".to_string())))?;
    XmlWriter::new(options).document(&value, options)
}

/// Render and write the document, encoded per `options.encoding`.
pub fn write_xml<T: Serialize + ?Sized>(path: &Path, entity: &T, options: &XmlOptions) -> Result<()> {
    validation::require_path(path)?;
    let document = to_xml_string(entity, options)?;
    io::write_file(path, options.encoding.encode(&document), "write XML")?;
    log_status!("xml", "Wrote <{}> to {}", options.root, path.display());
    Ok(())
}

pub trait XmlExt {
    fn to_xml(&self, options: &XmlOptions) -> Result<String>;
    fn write_xml(&self, path: &Path, options: &XmlOptions) -> Result<()>;
}

impl<T: Serialize + ?Sized> XmlExt for T {
    fn to_xml(&self, options: &XmlOptions) -> Result<String> {
        to_xml_string(self, options)
    }

    fn write_xml(&self, path: &Path, options: &XmlOptions) -> Result<()> {
        write_xml(path, self, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Serialize)]
    struct Address {
        street_name: String,
        city: String,
    }

    #[derive(Serialize)]
    struct Person {
        first_name: String,
        age: u32,
        nickname: Option<String>,
        tags: Vec<String>,
        address: Address,
    }

    fn ada() -> Person {
        Person {
            first_name: "Ada".to_string(),
            age: 36,
            nickname: None,
            tags: vec!["math".to_string(), "R&D".to_string()],
            address: Address {
                street_name: "St James's Square".to_string(),
                city: "London".to_string(),
            },
        }
    }

    #[test]
    fn indented_document_shape() {
        let xml = ada().to_xml(&XmlOptions::new("Person")).unwrap();
        let expected = [
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            "<Person>",
            "    <FirstName>Ada</FirstName>",
            "    <Age>36</Age>",
            "    <Tags>math</Tags>",
            "    <Tags>R&amp;D</Tags>",
            "    <Address>",
            "        <StreetName>St James&apos;s Square</StreetName>",
            "        <City>London</City>",
            "    </Address>",
            "</Person>",
        ]
        .join("\n");
        assert_eq!(xml, expected);
    }

    #[test]
    fn unformatted_document_is_single_line() {
        let options = XmlOptions::new("Address").formatting(XmlFormatting::None);
        let xml = ada().address.to_xml(&options).unwrap();
        assert_eq!(
            xml,
            r#"<?xml version="1.0" encoding="utf-8"?><Address><StreetName>St James&apos;s Square</StreetName><City>London</City></Address>"#
        );
    }

    #[test]
    fn custom_indentation() {
        let options = XmlOptions::new("Address").indentation(2);
        let xml = ada().address.to_xml(&options).unwrap();
        assert!(xml.contains("\n  <City>London</City>"));
    }

    #[test]
    fn top_level_sequences_wrap_items() {
        let options = XmlOptions::new("Numbers").formatting(XmlFormatting::None);
        let xml = vec![1, 2].to_xml(&options).unwrap();
        assert!(xml.ends_with("<Numbers><Item>1</Item><Item>2</Item></Numbers>"));
    }

    #[test]
    fn empty_values_self_close_and_markup_is_escaped() {
        #[derive(Serialize)]
        struct Note {
            title: String,
            body: String,
            extra: Option<u8>,
        }

        let note = Note {
            title: String::new(),
            body: r#"<b>"hi"</b>"#.to_string(),
            extra: None,
        };
        let options = XmlOptions::new("Note").formatting(XmlFormatting::None);
        let xml = note.to_xml(&options).unwrap();
        assert!(xml.ends_with(
            "<Note><Title/><Body>&lt;b&gt;&quot;hi&quot;&lt;/b&gt;</Body></Note>"
        ));
    }

    #[test]
    fn empty_root_is_rejected() {
        assert!(ada().to_xml(&XmlOptions::new(" ")).is_err());
    }

    #[test]
    fn element_names_are_sanitized() {
        assert_eq!(element_name("first_name"), "FirstName");
        assert_eq!(element_name("2fa"), "_2fa");
    }

    #[test]
    fn write_xml_uses_requested_encoding() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("address.xml");
        let options = XmlOptions::new("Address").encoding(EncodingKind::Unicode);

        ada().address.write_xml(&path, &options).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], &[b'<', 0, b'?', 0]);
        let expected = ada().address.to_xml(&options).unwrap();
        assert!(expected.contains(r#"encoding="utf-16""#));
        assert_eq!(bytes, EncodingKind::Unicode.encode(&expected));
    }
}
