//! Payment details domain model.
//!
//! A singleton: at most one payment-details record exists. "Update" means
//! update-if-exists-else-create, and the QR code image is mandatory at
//! first-time setup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::asset::{AssetPayload, AssetRef};

#[derive(Debug, Clone, Serialize)]
pub struct PaymentDetails {
    pub id: i64,
    pub account_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub upi_id: Option<String>,
    pub qr_image: AssetRef,
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload. On first-time setup every text field plus the QR image
/// is required; afterwards any subset may be supplied and omitted fields
/// keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpsertPaymentDetailsRequest {
    #[validate(length(min = 1, max = 100, message = "Account name must be 1-100 characters"))]
    pub account_name: Option<String>,

    #[validate(length(min = 1, max = 34, message = "Account number must be 1-34 characters"))]
    pub account_number: Option<String>,

    #[validate(length(min = 1, max = 20, message = "IFSC code must be 1-20 characters"))]
    pub ifsc_code: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Bank name must be 1-100 characters"))]
    pub bank_name: Option<String>,

    #[validate(length(max = 100, message = "UPI id must be at most 100 characters"))]
    pub upi_id: Option<String>,

    /// Replaces the stored QR image; required the first time.
    #[validate(nested)]
    pub qr_image: Option<AssetPayload>,
}

/// Field set ready to persist, produced by merging an upsert request over
/// the stored record.
#[derive(Debug, Clone)]
pub struct PaymentFields {
    pub account_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub upi_id: Option<String>,
    pub qr_image: AssetRef,
}

impl UpsertPaymentDetailsRequest {
    /// Merge this request over the stored record. Omitted text fields keep
    /// their stored values, and an omitted upi_id keeps the stored one
    /// (there is no clear path). `uploaded_qr` is the freshly stored
    /// replacement when the request carried an image; `None` keeps the
    /// stored reference.
    pub fn merge_over(self, existing: &PaymentDetails, uploaded_qr: Option<AssetRef>) -> PaymentFields {
        PaymentFields {
            account_name: self
                .account_name
                .unwrap_or_else(|| existing.account_name.clone()),
            account_number: self
                .account_number
                .unwrap_or_else(|| existing.account_number.clone()),
            ifsc_code: self.ifsc_code.unwrap_or_else(|| existing.ifsc_code.clone()),
            bank_name: self.bank_name.unwrap_or_else(|| existing.bank_name.clone()),
            upi_id: self.upi_id.or_else(|| existing.upi_id.clone()),
            qr_image: uploaded_qr.unwrap_or_else(|| existing.qr_image.clone()),
        }
    }

    /// First-time setup needs the full record.
    pub fn missing_for_setup(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.account_name.is_none() {
            missing.push("account_name");
        }
        if self.account_number.is_none() {
            missing.push("account_number");
        }
        if self.ifsc_code.is_none() {
            missing.push("ifsc_code");
        }
        if self.bank_name.is_none() {
            missing.push("bank_name");
        }
        if self.qr_image.is_none() {
            missing.push("qr_image");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stored_details() -> PaymentDetails {
        PaymentDetails {
            id: 1,
            account_name: "Charity Trust".to_string(),
            account_number: "1234567890".to_string(),
            ifsc_code: "HDFC0001234".to_string(),
            bank_name: "HDFC Bank".to_string(),
            upi_id: Some("charity@upi".to_string()),
            qr_image: AssetRef {
                url: "https://media.example/payments/qr-1.png".to_string(),
                public_id: "payments/qr-1".to_string(),
            },
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn merge_keeps_stored_qr_and_upi_when_omitted() {
        let existing = stored_details();
        let request: UpsertPaymentDetailsRequest =
            serde_json::from_str(r#"{"bank_name": "Axis Bank"}"#).unwrap();

        let fields = request.merge_over(&existing, None);

        assert_eq!(fields.bank_name, "Axis Bank");
        assert_eq!(fields.account_name, "Charity Trust");
        assert_eq!(fields.account_number, "1234567890");
        assert_eq!(fields.upi_id.as_deref(), Some("charity@upi"));
        assert_eq!(fields.qr_image.public_id, "payments/qr-1");
    }

    #[test]
    fn merge_takes_the_uploaded_qr_replacement() {
        let existing = stored_details();
        let request = UpsertPaymentDetailsRequest::default();
        let replacement = AssetRef {
            url: "https://media.example/payments/qr-2.png".to_string(),
            public_id: "payments/qr-2".to_string(),
        };

        let fields = request.merge_over(&existing, Some(replacement));

        assert_eq!(fields.qr_image.public_id, "payments/qr-2");
        assert_eq!(fields.account_name, "Charity Trust");
    }

    #[test]
    fn full_request_has_nothing_missing() {
        let json = r#"{
            "account_name": "Charity Trust",
            "account_number": "1234567890",
            "ifsc_code": "HDFC0001234",
            "bank_name": "HDFC Bank",
            "qr_image": {"content": "aGVsbG8="}
        }"#;
        let request: UpsertPaymentDetailsRequest = serde_json::from_str(json).unwrap();
        assert!(request.missing_for_setup().is_empty());
    }

    #[test]
    fn text_only_request_reports_missing_qr_image() {
        let json = r#"{"account_name": "Charity Trust"}"#;
        let request: UpsertPaymentDetailsRequest = serde_json::from_str(json).unwrap();
        let missing = request.missing_for_setup();
        assert!(missing.contains(&"qr_image"));
        assert!(missing.contains(&"bank_name"));
        assert!(!missing.contains(&"account_name"));
    }
}
