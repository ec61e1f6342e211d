use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const BASE64_LINE_LENGTH: usize = 76;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Base64Formatting {
    #[default]
    None,
    /// Break the output into 76-character lines separated by CRLF.
    InsertLineBreaks,
}

pub trait BytesExt {
    fn to_base64(&self, formatting: Base64Formatting) -> String;
}

impl BytesExt for [u8] {
    fn to_base64(&self, formatting: Base64Formatting) -> String {
        let encoded = STANDARD.encode(self);
        match formatting {
            Base64Formatting::None => encoded,
            Base64Formatting::InsertLineBreaks => encoded
                .as_bytes()
                .chunks(BASE64_LINE_LENGTH)
                .map(|line| String::from_utf8_lossy(line).into_owned())
                .collect::<Vec<_>>()
                .join("\r\n"),
        }
    }
}

/// Standard-alphabet Base64 decoding; whitespace (including the CRLF
/// breaks written by `InsertLineBreaks`) is ignored.
pub fn from_base64(source: &str) -> Result<Vec<u8>> {
    let compact: String = source.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| Error::validation_format(source, format!("Base64 string ({})", e)))
}
