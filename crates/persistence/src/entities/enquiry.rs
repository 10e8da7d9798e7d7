//! Enquiry entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::Enquiry;

/// Database row mapping for the enquiries table.
#[derive(Debug, Clone, FromRow)]
pub struct EnquiryEntity {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<EnquiryEntity> for Enquiry {
    fn from(entity: EnquiryEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            message: entity.message,
            created_at: entity.created_at,
        }
    }
}
