//! Activity entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::Activity;

use super::asset_from_pair;

/// Database row mapping for the activities table.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityEntity {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub image_public_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ActivityEntity> for Activity {
    fn from(entity: ActivityEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            category: entity.category,
            image: asset_from_pair(entity.image_url, entity.image_public_id),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_pair_maps_to_asset_ref() {
        let entity = ActivityEntity {
            id: 1,
            title: "Food drive".to_string(),
            description: "Weekly distribution".to_string(),
            category: Some("outreach".to_string()),
            image_url: Some("https://media.example/a.jpg".to_string()),
            image_public_id: Some("charity/activities/a".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let activity: Activity = entity.into();
        assert_eq!(
            activity.image.unwrap().public_id,
            "charity/activities/a"
        );
    }
}
