//! Slider entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{AssetRef, Slider};

/// Database row mapping for the sliders table. The image columns are
/// NOT NULL.
#[derive(Debug, Clone, FromRow)]
pub struct SliderEntity {
    pub id: i64,
    pub title: Option<String>,
    pub image_url: String,
    pub image_public_id: String,
    pub position: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SliderEntity> for Slider {
    fn from(entity: SliderEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            image: AssetRef {
                url: entity.image_url,
                public_id: entity.image_public_id,
            },
            position: entity.position,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
