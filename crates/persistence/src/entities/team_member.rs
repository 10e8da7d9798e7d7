//! Team member entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::TeamMember;

use super::asset_from_pair;

/// Database row mapping for the team_members table.
#[derive(Debug, Clone, FromRow)]
pub struct TeamMemberEntity {
    pub id: i64,
    pub name: String,
    pub designation: String,
    pub photo_url: Option<String>,
    pub photo_public_id: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeamMemberEntity> for TeamMember {
    fn from(entity: TeamMemberEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            designation: entity.designation,
            photo: asset_from_pair(entity.photo_url, entity.photo_public_id),
            position: entity.position,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
