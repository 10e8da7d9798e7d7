//! Membership plan entity (database row mapping).

use chrono::{DateTime, Utc};
use shared::membership::DurationUnit;
use sqlx::FromRow;

use domain::models::MembershipPlan;

/// Database row mapping for the membership_plans table.
#[derive(Debug, Clone, FromRow)]
pub struct MembershipPlanEntity {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub amount: i64,
    pub duration_value: i32,
    pub duration_unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MembershipPlanEntity> for MembershipPlan {
    fn from(entity: MembershipPlanEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            amount: entity.amount,
            duration_value: entity.duration_value,
            duration_unit: DurationUnit::parse(&entity.duration_unit),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_duration_unit_maps_to_enum() {
        let entity = MembershipPlanEntity {
            id: 1,
            name: "Annual".to_string(),
            description: None,
            amount: 1200,
            duration_value: 1,
            duration_unit: "years".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let plan: MembershipPlan = entity.into();
        assert_eq!(plan.duration_unit, DurationUnit::Years);
    }
}
