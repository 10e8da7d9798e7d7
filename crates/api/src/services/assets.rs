//! Asset synchronization helpers shared by the mutation handlers.
//!
//! Create uploads before the storage write and fails the whole mutation on
//! error. Cleanup of superseded or orphaned remote assets is best-effort
//! under `CleanupPolicy::Continue`: the failure is logged and the local
//! mutation proceeds.

use std::sync::Arc;

use domain::models::{AssetPayload, AssetRef};
use domain::services::{CleanupPolicy, MediaStore};
use tracing::warn;

use crate::config::MediaConfig;
use crate::error::ApiError;

/// Media-host folder for an entity, nested under the configured root.
pub fn media_folder(config: &MediaConfig, entity: &str) -> String {
    format!("{}/{}", config.root_folder, entity)
}

/// Decode and upload one asset payload. Upload failures are fatal to the
/// calling mutation, which must not have written anything yet.
pub async fn upload_payload(
    media: &dyn MediaStore,
    payload: &AssetPayload,
    folder: &str,
) -> Result<AssetRef, ApiError> {
    let bytes = payload.decode()?;
    Ok(media.upload(&bytes, folder).await?)
}

/// Delete one remote asset under the given policy.
pub async fn cleanup(
    media: &dyn MediaStore,
    public_id: &str,
    policy: CleanupPolicy,
) -> Result<(), ApiError> {
    match media.delete(public_id).await {
        Ok(()) => Ok(()),
        Err(err) => match policy {
            CleanupPolicy::Continue => {
                warn!(public_id, error = %err, "Remote asset cleanup failed; continuing");
                Ok(())
            }
            CleanupPolicy::Abort => Err(err.into()),
        },
    }
}

/// Delete several remote assets concurrently. Every delete is issued even
/// when earlier ones fail; under `Abort` the first failure is returned
/// after all deletes have run.
pub async fn cleanup_all(
    media: Arc<dyn MediaStore>,
    public_ids: Vec<String>,
    policy: CleanupPolicy,
) -> Result<(), ApiError> {
    let mut handles = Vec::with_capacity(public_ids.len());
    for public_id in public_ids {
        let media = media.clone();
        handles.push(tokio::spawn(async move {
            cleanup(media.as_ref(), &public_id, policy).await
        }));
    }

    let mut first_error = None;
    for handle in handles {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => first_error = first_error.or(Some(err)),
            Err(join_err) => {
                first_error =
                    first_error.or(Some(ApiError::Internal(format!("Cleanup task failed: {join_err}"))))
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::services::MockMediaStore;

    #[test]
    fn media_folder_nests_under_root() {
        let config = MediaConfig::default();
        assert_eq!(media_folder(&config, "sliders"), "charity/sliders");
    }

    #[tokio::test]
    async fn upload_rejects_invalid_base64_before_touching_the_host() {
        let media = MockMediaStore::new();
        let payload = AssetPayload {
            content: "!!not base64!!".to_string(),
            filename: None,
        };
        let result = upload_payload(&media, &payload, "charity/activities").await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(media.upload_count(), 0);
    }

    #[tokio::test]
    async fn cleanup_continue_swallows_delete_failures() {
        let media = MockMediaStore::failing_deletes();
        let result = cleanup(&media, "charity/sliders/1", CleanupPolicy::Continue).await;
        assert!(result.is_ok());
        // The delete was still attempted.
        assert_eq!(media.deleted(), vec!["charity/sliders/1".to_string()]);
    }

    #[tokio::test]
    async fn cleanup_abort_surfaces_delete_failures() {
        let media = MockMediaStore::failing_deletes();
        let result = cleanup(&media, "charity/sliders/1", CleanupPolicy::Abort).await;
        assert!(matches!(result, Err(ApiError::Media(_))));
    }

    #[tokio::test]
    async fn cleanup_all_issues_one_delete_per_asset_even_when_failing() {
        let media = Arc::new(MockMediaStore::failing_deletes());
        let ids = vec![
            "charity/donors/1".to_string(),
            "charity/donors/2".to_string(),
        ];
        let result = cleanup_all(media.clone(), ids, CleanupPolicy::Continue).await;
        assert!(result.is_ok());

        let mut deleted = media.deleted();
        deleted.sort();
        assert_eq!(
            deleted,
            vec![
                "charity/donors/1".to_string(),
                "charity/donors/2".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn cleanup_all_abort_still_attempts_every_delete() {
        let media = Arc::new(MockMediaStore::failing_deletes());
        let ids = vec!["a/1".to_string(), "a/2".to_string(), "a/3".to_string()];
        let result = cleanup_all(media.clone(), ids, CleanupPolicy::Abort).await;
        assert!(result.is_err());
        assert_eq!(media.deleted().len(), 3);
    }
}
