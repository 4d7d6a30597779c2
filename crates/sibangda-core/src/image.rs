//! # Image Import
//!
//! Uploaded photos (conflict scene images, handling media, custom map
//! backgrounds) are stored inline as `data:<mime>;base64,<payload>` URLs.
//!
//! Only `image/*` content is accepted. Empty and oversized uploads fail with
//! an [`ImageError`] instead of being dropped.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// Default upload limit: 5 MiB.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// A validated base64 image data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataUrl {
    mime: String,
    payload: String,
}

fn check_mime(mime: &str) -> Result<(), ImageError> {
    let subtype = mime.strip_prefix("image/").unwrap_or_default();
    if subtype.is_empty() || subtype.contains(|c: char| c.is_whitespace() || c == ';' || c == ',') {
        return Err(ImageError::NotAnImage(mime.to_string()));
    }
    Ok(())
}

impl DataUrl {
    /// Encode raw image bytes.
    ///
    /// The content type may carry parameters (`image/png; charset=binary`);
    /// only the essence is kept.
    pub fn encode(content_type: &str, bytes: &[u8], max_bytes: usize) -> Result<Self, ImageError> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        check_mime(&mime)?;
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if bytes.len() > max_bytes {
            return Err(ImageError::TooLarge {
                size: bytes.len(),
                max: max_bytes,
            });
        }
        Ok(Self {
            mime,
            payload: B64.encode(bytes),
        })
    }

    /// Parse and validate an existing data URL string.
    pub fn parse(url: &str) -> Result<Self, ImageError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| ImageError::MalformedDataUrl("missing data: scheme".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ImageError::MalformedDataUrl("missing payload separator".to_string()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| ImageError::MalformedDataUrl("payload is not base64".to_string()))?;
        check_mime(mime)?;
        let decoded = B64
            .decode(payload)
            .map_err(|e| ImageError::MalformedDataUrl(e.to_string()))?;
        if decoded.is_empty() {
            return Err(ImageError::Empty);
        }
        Ok(Self {
            mime: mime.to_string(),
            payload: payload.to_string(),
        })
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Decoded size of the image in bytes.
    pub fn decoded_len(&self) -> usize {
        B64.decode(&self.payload).map(|b| b.len()).unwrap_or(0)
    }
}

impl std::fmt::Display for DataUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, self.payload)
    }
}

impl TryFrom<String> for DataUrl {
    type Error = ImageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DataUrl> for String {
    fn from(url: DataUrl) -> Self {
        url.to_string()
    }
}
