//! Member domain model.
//!
//! Members are created by the public application form and renewed against
//! their plan; each carries a unique membership number that event bookings
//! may reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageParams, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub id: i64,
    pub membership_no: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub plan_id: i64,
    /// `None` means a non-expiring (lifetime) membership.
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expiry) => expiry > now,
            None => true,
        }
    }
}

/// Public membership application.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApplyMembershipRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(custom(function = "crate::models::validate_phone"))]
    pub phone: Option<String>,

    pub plan_id: i64,
}

/// Renewal: extends the expiry against the given (or current) plan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenewMembershipRequest {
    /// Omitted renews on the member's existing plan.
    pub plan_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMembersQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub plan_id: Option<i64>,
}

impl ListMembersQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListMembersResponse {
    pub members: Vec<Member>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn member(expires_at: Option<DateTime<Utc>>) -> Member {
        Member {
            id: 1,
            membership_no: "CM-DEADBEEF".to_string(),
            name: "Tara".to_string(),
            email: "tara@example.org".to_string(),
            phone: None,
            plan_id: 2,
            expires_at,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn lifetime_member_is_always_active() {
        assert!(member(None).is_active(Utc::now()));
    }

    #[test]
    fn expired_member_is_inactive() {
        let m = member(Some(Utc::now() - Duration::days(1)));
        assert!(!m.is_active(Utc::now()));
    }

    #[test]
    fn member_with_future_expiry_is_active() {
        let m = member(Some(Utc::now() + Duration::days(30)));
        assert!(m.is_active(Utc::now()));
    }
}
