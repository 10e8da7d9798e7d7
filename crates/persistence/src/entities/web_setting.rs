//! Web setting entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::WebSetting;

/// Database row mapping for the web_settings table; `key` is the primary
/// key.
#[derive(Debug, Clone, FromRow)]
pub struct WebSettingEntity {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl From<WebSettingEntity> for WebSetting {
    fn from(entity: WebSettingEntity) -> Self {
        Self {
            key: entity.key,
            value: entity.value,
            updated_at: entity.updated_at,
        }
    }
}
