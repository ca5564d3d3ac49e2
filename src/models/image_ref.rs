use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Longest prefix of a reference shown in logs and error messages
const DISPLAY_PREFIX_CHARS: usize = 64;

/// Browsers accept data URIs with or without trailing `=` padding
const DATA_URI_BASE64: GeneralPurpose = GeneralPurpose::new(
    &base64::alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// An encoded image, usually a `data:image/...;base64,...` URI.
///
/// Treated as opaque and immutable: transforms produce a new reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageReference(String);

impl ImageReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Build a base64 data URI for already-encoded image bytes.
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self(format!(
            "data:{mime};base64,{}",
            base64::engine::general_purpose::STANDARD.encode(bytes)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse as a data URI.
    pub fn data_uri(&self) -> Result<DataUri<'_>, DataUriError> {
        DataUri::parse(&self.0)
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.char_indices().nth(DISPLAY_PREFIX_CHARS) {
            Some((cut, _)) => write!(f, "{}... ({} bytes)", &self.0[..cut], self.0.len()),
            None => f.write_str(&self.0),
        }
    }
}

impl From<String> for ImageReference {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ImageReference {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DataUriError {
    #[error("unsupported reference scheme (expected data: URI)")]
    UnsupportedScheme,

    #[error("malformed data URI: missing ','")]
    MissingComma,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Borrowed view of `data:[<mime>][;param]*[;base64],<payload>`.
///
/// The MIME type is skipped; image formats are sniffed from the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri<'a> {
    pub base64: bool,
    pub payload: &'a str,
}

impl<'a> DataUri<'a> {
    pub fn parse(uri: &'a str) -> Result<Self, DataUriError> {
        let rest = match uri.get(..5) {
            Some(scheme) if scheme.eq_ignore_ascii_case("data:") => &uri[5..],
            _ => return Err(DataUriError::UnsupportedScheme),
        };
        let (header, payload) = rest.split_once(',').ok_or(DataUriError::MissingComma)?;

        let base64 = header
            .split(';')
            .skip(1)
            .any(|p| p.trim().eq_ignore_ascii_case("base64"));

        Ok(Self { base64, payload })
    }

    /// Decode the payload to raw bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, DataUriError> {
        if self.base64 {
            let compact: String = self
                .payload
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            let compact = percent_encoding::percent_decode_str(&compact).decode_utf8_lossy();
            Ok(DATA_URI_BASE64.decode(compact.as_bytes())?)
        } else {
            Ok(percent_encoding::percent_decode_str(self.payload).collect())
        }
    }
}
