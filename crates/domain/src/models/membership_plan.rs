//! Membership plan domain model.
//!
//! Reference data: plans are listed by ascending amount on the public
//! membership page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::membership::DurationUnit;
use shared::pagination::{PageParams, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
use validator::Validate;

use super::patch::Patch;

#[derive(Debug, Clone, Serialize)]
pub struct MembershipPlan {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Plan price in whole currency units.
    pub amount: i64,
    pub duration_value: i32,
    pub duration_unit: DurationUnit,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMembershipPlanRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "Amount must not be negative"))]
    pub amount: i64,

    #[validate(range(min = 1, message = "Duration must be positive"))]
    #[serde(default = "default_duration_value")]
    pub duration_value: i32,

    pub duration_unit: DurationUnit,
}

fn default_duration_value() -> i32 {
    1
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMembershipPlanRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Patch<String>,

    #[validate(range(min = 0, message = "Amount must not be negative"))]
    pub amount: Option<i64>,

    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration_value: Option<i32>,

    pub duration_unit: Option<DurationUnit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMembershipPlansQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListMembershipPlansQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListMembershipPlansResponse {
    pub plans: Vec<MembershipPlan>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_unit_deserializes_lowercase() {
        let json = r#"{"name": "Annual", "amount": 1200, "duration_unit": "years"}"#;
        let request: CreateMembershipPlanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.duration_unit, DurationUnit::Years);
        assert_eq!(request.duration_value, 1);
    }

    #[test]
    fn lifetime_plan_is_valid() {
        let json = r#"{"name": "Patron", "amount": 50000, "duration_unit": "lifetime"}"#;
        let request: CreateMembershipPlanRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_ok());
    }
}
