//! Activity domain model.
//!
//! Activities are the organization's events and programs shown on the
//! public site; they double as the bookable events that event bookings
//! reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageParams, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
use validator::Validate;

use super::asset::{AssetPayload, AssetRef};
use super::patch::Patch;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub image: Option<AssetRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating an activity.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Description must not be empty"))]
    pub description: String,

    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,

    #[validate(nested)]
    pub image: Option<AssetPayload>,
}

/// Request payload for updating an activity (partial update).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateActivityRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 10000, message = "Description must not be empty"))]
    pub description: Option<String>,

    /// Omitted keeps the stored category, `null` clears it.
    #[serde(default)]
    pub category: Patch<String>,

    /// Omitted keeps the stored image, `null` removes it from the media
    /// host, a payload replaces it.
    #[serde(default)]
    pub image: Patch<AssetPayload>,
}

/// Query parameters for listing activities.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListActivitiesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl ListActivitiesQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListActivitiesResponse {
    pub activities: Vec<Activity>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_validates_title_length() {
        let request = CreateActivityRequest {
            title: String::new(),
            description: "Food drive".to_string(),
            category: None,
            image: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn update_request_defaults_to_keep_everything() {
        let request: UpdateActivityRequest = serde_json::from_str("{}").unwrap();
        assert!(request.title.is_none());
        assert!(request.description.is_none());
        assert!(request.category.is_keep());
        assert!(request.image.is_keep());
    }

    #[test]
    fn update_request_null_image_means_clear() {
        let request: UpdateActivityRequest =
            serde_json::from_str(r#"{"image": null}"#).unwrap();
        assert!(matches!(request.image, Patch::Clear));
    }

    #[test]
    fn list_query_applies_pagination_defaults() {
        let query = ListActivitiesQuery::default();
        let params = query.page_params();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
    }
}
