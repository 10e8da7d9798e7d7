//! Complaint entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{Complaint, ComplaintStatus};

/// Database row mapping for the complaints table.
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintEntity {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ComplaintEntity> for Complaint {
    fn from(entity: ComplaintEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            subject: entity.subject,
            message: entity.message,
            status: ComplaintStatus::parse(&entity.status),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_status_string_maps_to_enum() {
        let entity = ComplaintEntity {
            id: 1,
            name: "Ravi".to_string(),
            email: "ravi@example.org".to_string(),
            phone: None,
            subject: "Broken page".to_string(),
            message: "The gallery does not load".to_string(),
            status: "resolved".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let complaint: Complaint = entity.into();
        assert_eq!(complaint.status, ComplaintStatus::Resolved);
    }
}
