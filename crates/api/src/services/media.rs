//! HTTP client for the external media host.
//!
//! Uploads send the file bytes as multipart form data and receive a
//! complete `{url, public_id}` pair; deletes are idempotent from the
//! caller's perspective (an already-absent `public_id` is not an error).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::models::AssetRef;
use domain::services::{MediaError, MediaStore};
use reqwest::multipart;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::MediaConfig;

/// Media store backed by the configured media-host HTTP API.
pub struct HttpMediaStore {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
    public_id: String,
}

impl HttpMediaStore {
    pub fn new(config: &MediaConfig) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| MediaError::Upload(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, data: &[u8], folder: &str) -> Result<AssetRef, MediaError> {
        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(data.to_vec()))
            .text("folder", folder.to_string());

        let response = self
            .client
            .post(format!("{}/v1/assets", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MediaError::Upload(format!(
                "Media host returned {status}: {body}"
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Upload(format!("Invalid upload response: {e}")))?;

        Ok(AssetRef {
            url: uploaded.url,
            public_id: uploaded.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), MediaError> {
        let response = self
            .client
            .delete(format!("{}/v1/assets", self.base_url))
            .query(&[("public_id", public_id)])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| MediaError::Delete(e.to_string()))?;

        let status = response.status();
        // Deleting an already-absent asset must not fail the caller.
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(MediaError::Delete(format!(
            "Media host returned {status}: {body}"
        )))
    }
}

/// Stand-in used when no media host is configured: every asset operation
/// fails with `NotConfigured` so mutations carrying payloads are rejected.
pub struct DisabledMediaStore;

#[async_trait]
impl MediaStore for DisabledMediaStore {
    async fn upload(&self, _data: &[u8], _folder: &str) -> Result<AssetRef, MediaError> {
        Err(MediaError::NotConfigured)
    }

    async fn delete(&self, _public_id: &str) -> Result<(), MediaError> {
        Err(MediaError::NotConfigured)
    }
}

/// Build the media store the application state carries.
pub fn build_media_store(config: &MediaConfig) -> anyhow::Result<Arc<dyn MediaStore>> {
    if !config.enabled {
        tracing::warn!("Media host disabled; asset uploads will be rejected");
        return Ok(Arc::new(DisabledMediaStore));
    }
    let store = HttpMediaStore::new(config)?;
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_store_rejects_uploads() {
        let store = DisabledMediaStore;
        let result = store.upload(b"bytes", "charity/sliders").await;
        assert!(matches!(result, Err(MediaError::NotConfigured)));
    }

    #[tokio::test]
    async fn disabled_store_rejects_deletes() {
        let store = DisabledMediaStore;
        let result = store.delete("charity/sliders/1").await;
        assert!(matches!(result, Err(MediaError::NotConfigured)));
    }

    #[test]
    fn build_returns_disabled_store_when_not_enabled() {
        let config = MediaConfig::default();
        assert!(build_media_store(&config).is_ok());
    }

    #[test]
    fn http_store_trims_trailing_slash() {
        let config = MediaConfig {
            enabled: true,
            base_url: "https://media.example/".to_string(),
            api_key: "key".to_string(),
            ..MediaConfig::default()
        };
        let store = HttpMediaStore::new(&config).unwrap();
        assert_eq!(store.base_url, "https://media.example");
    }
}
