//! Admin account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageParams, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
use validator::Validate;

#[derive(Debug, Clone)]
pub struct Admin {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin as exposed over the API: never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct AdminResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Admin> for AdminResponse {
    fn from(a: Admin) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAdminRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAdminsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListAdminsQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListAdminsResponse {
    pub admins: Vec<AdminResponse>,
    pub pagination: Pagination,
}

/// Sign-in request for the admin back office.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_omits_password_hash() {
        let admin = Admin {
            id: 1,
            name: "Asha".to_string(),
            email: "asha@example.org".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&AdminResponse::from(admin)).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("asha@example.org"));
    }

    #[test]
    fn create_request_rejects_short_password() {
        let request = CreateAdminRequest {
            name: "Asha".to_string(),
            email: "asha@example.org".to_string(),
            password: "short".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_request_rejects_bad_email() {
        let request = CreateAdminRequest {
            name: "Asha".to_string(),
            email: "not-an-email".to_string(),
            password: "long-enough-password".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
