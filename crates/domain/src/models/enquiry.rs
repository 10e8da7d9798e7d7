//! Enquiry domain model. Public contact-form submissions; admins list and
//! delete them, there is no update path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageParams, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
pub struct Enquiry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEnquiryRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(custom(function = "crate::models::validate_phone"))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Message must not be empty"))]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEnquiriesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl ListEnquiriesQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListEnquiriesResponse {
    pub enquiries: Vec<Enquiry>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_optional_phone() {
        let json = r#"{"name": "Ira", "email": "ira@example.org", "message": "Hello"}"#;
        let request: CreateEnquiryRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn create_request_rejects_invalid_phone() {
        let json = r#"{"name": "Ira", "email": "ira@example.org", "phone": "xyz", "message": "Hello"}"#;
        let request: CreateEnquiryRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }
}
