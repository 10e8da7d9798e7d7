//! Asset references and upload payloads.
//!
//! An asset reference is the stored pointer to a file held by the external
//! media host. Once stored it is always a complete `{url, public_id}` pair,
//! never partial.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Stored pointer to an externally hosted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub url: String,
    pub public_id: String,
}

/// Error decoding an uploaded asset payload.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Invalid base64 asset content")]
    InvalidEncoding,
    #[error("Asset content is empty")]
    Empty,
}

/// Base64-encoded file content supplied by the admin UI.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssetPayload {
    /// Base64-encoded bytes (no data-URI prefix).
    #[validate(length(min = 1, message = "Asset content must not be empty"))]
    pub content: String,
    /// Original file name, informational only.
    pub filename: Option<String>,
}

impl AssetPayload {
    /// Decode the payload into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, AssetError> {
        // Tolerate a data-URI prefix from browser FileReader output.
        let raw = match self.content.split_once(";base64,") {
            Some((_, data)) => data,
            None => self.content.as_str(),
        };
        let bytes = STANDARD
            .decode(raw.trim())
            .map_err(|_| AssetError::InvalidEncoding)?;
        if bytes.is_empty() {
            return Err(AssetError::Empty);
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_base64() {
        let payload = AssetPayload {
            content: STANDARD.encode(b"hello"),
            filename: None,
        };
        assert_eq!(payload.decode().unwrap(), b"hello");
    }

    #[test]
    fn decodes_data_uri_content() {
        let payload = AssetPayload {
            content: format!("data:image/png;base64,{}", STANDARD.encode(b"png-bytes")),
            filename: Some("qr.png".to_string()),
        };
        assert_eq!(payload.decode().unwrap(), b"png-bytes");
    }

    #[test]
    fn rejects_invalid_base64() {
        let payload = AssetPayload {
            content: "!!not base64!!".to_string(),
            filename: None,
        };
        assert!(matches!(payload.decode(), Err(AssetError::InvalidEncoding)));
    }

    #[test]
    fn rejects_empty_content() {
        let payload = AssetPayload {
            content: String::new(),
            filename: None,
        };
        assert!(matches!(payload.decode(), Err(AssetError::Empty)));
    }

    #[test]
    fn asset_ref_round_trips_through_json() {
        let asset = AssetRef {
            url: "https://media.example/charity/activities/abc.jpg".to_string(),
            public_id: "charity/activities/abc".to_string(),
        };
        let json = serde_json::to_string(&asset).unwrap();
        let back: AssetRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, asset);
    }
}
