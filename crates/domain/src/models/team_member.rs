//! Team member domain model. Display-ordered on the public team page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageParams, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
use validator::Validate;

use super::asset::{AssetPayload, AssetRef};
use super::patch::Patch;

#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub designation: String,
    pub photo: Option<AssetRef>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeamMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Designation must be 1-100 characters"))]
    pub designation: String,

    #[validate(nested)]
    pub photo: Option<AssetPayload>,

    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTeamMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Designation must be 1-100 characters"))]
    pub designation: Option<String>,

    /// Omitted keeps the stored photo, `null` removes it, a payload
    /// replaces it.
    #[serde(default)]
    pub photo: Patch<AssetPayload>,

    pub position: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTeamMembersQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListTeamMembersQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListTeamMembersResponse {
    pub team_members: Vec<TeamMember>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_requires_designation() {
        let json = r#"{"name": "Dev", "designation": ""}"#;
        let request: CreateTeamMemberRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn update_request_photo_states() {
        let keep: UpdateTeamMemberRequest = serde_json::from_str("{}").unwrap();
        assert!(keep.photo.is_keep());

        let clear: UpdateTeamMemberRequest = serde_json::from_str(r#"{"photo": null}"#).unwrap();
        assert!(matches!(clear.photo, Patch::Clear));

        let set: UpdateTeamMemberRequest =
            serde_json::from_str(r#"{"photo": {"content": "aGVsbG8="}}"#).unwrap();
        assert!(matches!(set.photo, Patch::Set(_)));
    }
}
