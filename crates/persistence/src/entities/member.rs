//! Member entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::Member;

/// Database row mapping for the members table. `membership_no` carries a
/// unique constraint.
#[derive(Debug, Clone, FromRow)]
pub struct MemberEntity {
    pub id: i64,
    pub membership_no: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub plan_id: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MemberEntity> for Member {
    fn from(entity: MemberEntity) -> Self {
        Self {
            id: entity.id,
            membership_no: entity.membership_no,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            plan_id: entity.plan_id,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
