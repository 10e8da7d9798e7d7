//! Payment details entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{AssetRef, PaymentDetails};

/// Database row mapping for the payment_details table (singleton: at most
/// one row). The QR image columns are NOT NULL.
#[derive(Debug, Clone, FromRow)]
pub struct PaymentDetailsEntity {
    pub id: i64,
    pub account_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub upi_id: Option<String>,
    pub qr_image_url: String,
    pub qr_image_public_id: String,
    pub updated_at: DateTime<Utc>,
}

impl From<PaymentDetailsEntity> for PaymentDetails {
    fn from(entity: PaymentDetailsEntity) -> Self {
        Self {
            id: entity.id,
            account_name: entity.account_name,
            account_number: entity.account_number,
            ifsc_code: entity.ifsc_code,
            bank_name: entity.bank_name,
            upi_id: entity.upi_id,
            qr_image: AssetRef {
                url: entity.qr_image_url,
                public_id: entity.qr_image_public_id,
            },
            updated_at: entity.updated_at,
        }
    }
}
