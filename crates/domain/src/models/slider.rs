//! Slider domain model. Home-page carousel entries, display-ordered by
//! `position`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageParams, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
use validator::Validate;

use super::asset::{AssetPayload, AssetRef};
use super::patch::Patch;

#[derive(Debug, Clone, Serialize)]
pub struct Slider {
    pub id: i64,
    pub title: Option<String>,
    pub image: AssetRef,
    pub position: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSliderRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    /// Mandatory: a slider without an image is meaningless.
    #[validate(nested)]
    pub image: Option<AssetPayload>,

    #[serde(default)]
    pub position: i32,

    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSliderRequest {
    #[serde(default)]
    pub title: Patch<String>,

    /// Image is mandatory, so it can only be replaced.
    #[validate(nested)]
    pub image: Option<AssetPayload>,

    pub position: Option<i32>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSlidersQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub active: Option<bool>,
}

impl ListSlidersQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListSlidersResponse {
    pub sliders: Vec<Slider>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults_active_and_position() {
        let json = r#"{"image": {"content": "aGVsbG8="}}"#;
        let request: CreateSliderRequest = serde_json::from_str(json).unwrap();
        assert!(request.active);
        assert_eq!(request.position, 0);
    }

    #[test]
    fn update_request_title_null_clears() {
        let request: UpdateSliderRequest = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert_eq!(request.title, Patch::Clear);
    }
}
