//! String-to-bytes encoders selected by a closed `EncodingKind` tag.
//!
//! `BigEndianUnicode`, `Utf32` and `Ascii` intentionally produce the same
//! bytes as `Unicode` (UTF-16LE). Callers that depended on the historic
//! mapping keep working; see DESIGN.md before changing it.

use serde::{Deserialize, Serialize};

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EncodingKind {
    #[default]
    Default,
    Utf7,
    Utf8,
    /// UTF-16, little endian.
    Unicode,
    BigEndianUnicode,
    Utf32,
    Ascii,
}

impl EncodingKind {
    /// Name written in XML declarations for bytes produced by `encode`.
    pub fn label(self) -> &'static str {
        match self {
            EncodingKind::Default | EncodingKind::Utf8 => "utf-8",
            EncodingKind::Utf7 => "utf-7",
            EncodingKind::Unicode
            | EncodingKind::BigEndianUnicode
            | EncodingKind::Utf32
            | EncodingKind::Ascii => "utf-16",
        }
    }

    pub fn encode(self, source: &str) -> Vec<u8> {
        match self {
            EncodingKind::Default | EncodingKind::Utf8 => source.as_bytes().to_vec(),
            EncodingKind::Utf7 => encode_utf7(source),
            EncodingKind::Unicode
            | EncodingKind::BigEndianUnicode
            | EncodingKind::Utf32
            | EncodingKind::Ascii => encode_utf16_le(source),
        }
    }
}

pub fn encode_utf16_le(source: &str) -> Vec<u8> {
    source
        .encode_utf16()
        .flat_map(|unit| unit.to_le_bytes())
        .collect()
}

// RFC 2152 set D plus the whitespace characters written directly.
fn is_direct(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"'(),-./:? \t\r\n".contains(&byte)
}

fn is_base64_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'+' || byte == b'/'
}

fn push_sextet(out: &mut Vec<u8>, value: u32) {
    out.push(BASE64_ALPHABET[(value & 0x3F) as usize]);
}

/// RFC 2152 UTF-7. Optional direct characters (`!`, `#`, `~`, ...) are
/// shifted into base64 rather than written literally.
pub fn encode_utf7(source: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(source.len());
    let mut bits: u32 = 0;
    // None while writing direct characters, Some(pending bit count) inside a
    // base64 run.
    let mut shifted: Option<u32> = None;

    for unit in source.encode_utf16() {
        let direct = u8::try_from(unit).ok().filter(|b| is_direct(*b));

        if let Some(byte) = direct {
            if let Some(pending) = shifted.take() {
                if pending > 0 {
                    push_sextet(&mut out, bits << (6 - pending));
                }
                if is_base64_char(byte) || byte == b'-' {
                    out.push(b'-');
                }
            }
            out.push(byte);
            continue;
        }

        if shifted.is_none() && unit == u16::from(b'+') {
            out.extend_from_slice(b"+-");
            continue;
        }

        let mut pending = match shifted {
            Some(pending) => pending,
            None => {
                out.push(b'+');
                bits = 0;
                0
            }
        };
        bits = (bits << 16) | u32::from(unit);
        pending += 16;
        while pending >= 6 {
            pending -= 6;
            push_sextet(&mut out, bits >> pending);
        }
        bits &= (1 << pending) - 1;
        shifted = Some(pending);
    }

    if let Some(pending) = shifted {
        if pending > 0 {
            push_sextet(&mut out, bits << (6 - pending));
        }
        out.push(b'-');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf7(source: &str) -> String {
        String::from_utf8(encode_utf7(source)).unwrap()
    }

    #[test]
    fn utf7_passes_direct_characters_through() {
        assert_eq!(utf7("Hello, World."), "Hello, World.");
    }

    #[test]
    fn utf7_escapes_plus() {
        assert_eq!(utf7("A+B"), "A+-B");
    }

    #[test]
    fn utf7_shifts_non_ascii() {
        assert_eq!(utf7("é"), "+AOk-");
        assert_eq!(utf7("日本語"), "+ZeVnLIqe-");
    }

    #[test]
    fn utf7_terminates_only_before_base64_characters() {
        assert_eq!(utf7("é."), "+AOk.");
        assert_eq!(utf7("éa"), "+AOk-a");
        assert_eq!(utf7("Hi Mom -☺-!"), "Hi Mom -+Jjo--+ACE-");
    }

    #[test]
    fn utf7_shifts_optional_direct_characters() {
        assert_eq!(utf7("a~b"), "a+AH4-b");
    }

    #[test]
    fn unicode_is_utf16_little_endian() {
        assert_eq!(EncodingKind::Unicode.encode("é"), vec![0xE9, 0x00]);
        assert_eq!(EncodingKind::Unicode.encode("Ab"), vec![b'A', 0, b'b', 0]);
    }

    #[test]
    fn legacy_kinds_fall_back_to_unicode() {
        let expected = EncodingKind::Unicode.encode("héllo");
        assert_eq!(EncodingKind::BigEndianUnicode.encode("héllo"), expected);
        assert_eq!(EncodingKind::Utf32.encode("héllo"), expected);
        assert_eq!(EncodingKind::Ascii.encode("héllo"), expected);
    }

    #[test]
    fn default_is_utf8() {
        assert_eq!(EncodingKind::Default.encode("é"), "é".as_bytes());
        assert_eq!(EncodingKind::Default.label(), "utf-8");
    }
}
