//! Media-host abstraction.
//!
//! Every managed entity that owns an image or document stores only an
//! `AssetRef` pointer; the bytes live with an external media host. The host
//! is consumed through this trait so route handlers can be exercised against
//! a mock in tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::AssetRef;

/// Error type for media-host operations.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Media upload failed: {0}")]
    Upload(String),

    #[error("Media delete failed: {0}")]
    Delete(String),

    #[error("Media host is not configured")]
    NotConfigured,
}

/// What to do when deleting a superseded or owned remote asset fails.
///
/// Cleanup is best-effort by default: the local mutation proceeds and the
/// failure is logged. `Abort` turns a cleanup failure into a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPolicy {
    #[default]
    Continue,
    Abort,
}

/// External media host: uploads return a complete `{url, public_id}` pair,
/// deletes are idempotent from the caller's perspective (deleting an
/// already-absent `public_id` is not an error).
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, data: &[u8], folder: &str) -> Result<AssetRef, MediaError>;
    async fn delete(&self, public_id: &str) -> Result<(), MediaError>;
}

/// In-memory media store for tests. Records every call.
#[derive(Default)]
pub struct MockMediaStore {
    counter: AtomicUsize,
    pub uploads: Mutex<Vec<(String, usize)>>,
    pub deletes: Mutex<Vec<String>>,
    pub fail_uploads: bool,
    pub fail_deletes: bool,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }

    /// Deleted public ids, in call order.
    pub fn deleted(&self) -> Vec<String> {
        self.deletes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of uploads performed.
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait::async_trait]
impl MediaStore for MockMediaStore {
    async fn upload(&self, data: &[u8], folder: &str) -> Result<AssetRef, MediaError> {
        if self.fail_uploads {
            return Err(MediaError::Upload("simulated upload failure".to_string()));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        self.uploads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((folder.to_string(), data.len()));
        Ok(AssetRef {
            url: format!("https://media.test/{folder}/{n}"),
            public_id: format!("{folder}/{n}"),
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), MediaError> {
        self.deletes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(public_id.to_string());
        if self.fail_deletes {
            return Err(MediaError::Delete("simulated delete failure".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_upload_yields_complete_asset_ref() {
        let media = MockMediaStore::new();
        let asset = media.upload(b"bytes", "charity/sliders").await.unwrap();
        assert!(asset.url.contains("charity/sliders"));
        assert!(asset.public_id.starts_with("charity/sliders/"));
        assert_eq!(media.upload_count(), 1);
    }

    #[tokio::test]
    async fn mock_records_deletes_even_when_failing() {
        let media = MockMediaStore::failing_deletes();
        let result = media.delete("charity/sliders/0").await;
        assert!(result.is_err());
        assert_eq!(media.deleted(), vec!["charity/sliders/0".to_string()]);
    }

    #[tokio::test]
    async fn failing_uploads_do_not_record() {
        let media = MockMediaStore::failing_uploads();
        assert!(media.upload(b"x", "f").await.is_err());
        assert_eq!(media.upload_count(), 0);
    }
}
