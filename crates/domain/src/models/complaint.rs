//! Complaint domain model.
//!
//! Complaints arrive from the public site and are worked through by admins,
//! moving from pending to resolved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageParams, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintStatus {
    Pending,
    Resolved,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::Resolved => "resolved",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "resolved" => ComplaintStatus::Resolved,
            _ => ComplaintStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Complaint {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public submission form payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComplaintRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(custom(function = "crate::models::validate_phone"))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "Message must not be empty"))]
    pub message: String,
}

/// Admin-side status change.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComplaintRequest {
    pub status: ComplaintStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListComplaintsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub status: Option<ComplaintStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl ListComplaintsQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListComplaintsResponse {
    pub complaints: Vec<Complaint>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_stored_string() {
        assert_eq!(
            ComplaintStatus::parse(ComplaintStatus::Pending.as_str()),
            ComplaintStatus::Pending
        );
        assert_eq!(
            ComplaintStatus::parse(ComplaintStatus::Resolved.as_str()),
            ComplaintStatus::Resolved
        );
        // Unknown stored values fall back to pending.
        assert_eq!(ComplaintStatus::parse("weird"), ComplaintStatus::Pending);
    }

    #[test]
    fn status_query_param_deserializes_lowercase() {
        let query: ListComplaintsQuery =
            serde_json::from_str(r#"{"status": "resolved"}"#).unwrap();
        assert_eq!(query.status, Some(ComplaintStatus::Resolved));
    }

    #[test]
    fn create_request_requires_subject() {
        let request = CreateComplaintRequest {
            name: "Ravi".to_string(),
            email: "ravi@example.org".to_string(),
            phone: None,
            subject: String::new(),
            message: "The donation page is broken".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
