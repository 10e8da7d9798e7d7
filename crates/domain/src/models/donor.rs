//! Donor domain model.
//!
//! A donor record always carries a payment-proof document; the portrait
//! image is optional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageParams, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
use validator::Validate;

use super::asset::{AssetPayload, AssetRef};
use super::patch::Patch;

#[derive(Debug, Clone, Serialize)]
pub struct Donor {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Donated amount in whole currency units.
    pub amount: i64,
    pub donor_image: Option<AssetRef>,
    pub payment_proof: AssetRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDonorRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(custom(function = "crate::models::validate_phone"))]
    pub phone: Option<String>,

    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i64,

    #[validate(nested)]
    pub donor_image: Option<AssetPayload>,

    /// Mandatory: creating a donor without payment proof fails before any
    /// storage write.
    #[validate(nested)]
    pub payment_proof: Option<AssetPayload>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDonorRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Patch<String>,

    #[serde(default)]
    pub phone: Patch<String>,

    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: Option<i64>,

    /// Omitted keeps, `null` removes, a payload replaces.
    #[serde(default)]
    pub donor_image: Patch<AssetPayload>,

    /// Payment proof is mandatory, so it can only be replaced, never
    /// cleared.
    #[validate(nested)]
    pub payment_proof: Option<AssetPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDonorsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl ListDonorsQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListDonorsResponse {
    pub donors: Vec<Donor>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_allows_missing_donor_image() {
        let json = r#"{
            "name": "Meera",
            "amount": 5000,
            "payment_proof": {"content": "aGVsbG8="}
        }"#;
        let request: CreateDonorRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.donor_image.is_none());
        assert!(request.payment_proof.is_some());
    }

    #[test]
    fn create_request_rejects_zero_amount() {
        let json = r#"{"name": "Meera", "amount": 0}"#;
        let request: CreateDonorRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn update_request_distinguishes_cleared_email_from_omitted() {
        let omitted: UpdateDonorRequest = serde_json::from_str("{}").unwrap();
        assert!(omitted.email.is_keep());

        let cleared: UpdateDonorRequest = serde_json::from_str(r#"{"email": null}"#).unwrap();
        assert_eq!(cleared.email, Patch::Clear);
    }
}
