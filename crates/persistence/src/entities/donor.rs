//! Donor entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{AssetRef, Donor};

use super::asset_from_pair;

/// Database row mapping for the donors table. The payment-proof columns
/// are NOT NULL; the donor-image pair is optional.
#[derive(Debug, Clone, FromRow)]
pub struct DonorEntity {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub amount: i64,
    pub donor_image_url: Option<String>,
    pub donor_image_public_id: Option<String>,
    pub payment_proof_url: String,
    pub payment_proof_public_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DonorEntity> for Donor {
    fn from(entity: DonorEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            amount: entity.amount,
            donor_image: asset_from_pair(entity.donor_image_url, entity.donor_image_public_id),
            payment_proof: AssetRef {
                url: entity.payment_proof_url,
                public_id: entity.payment_proof_public_id,
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_proof_is_always_complete() {
        let entity = DonorEntity {
            id: 1,
            name: "Meera".to_string(),
            email: None,
            phone: None,
            amount: 5000,
            donor_image_url: None,
            donor_image_public_id: None,
            payment_proof_url: "https://media.example/p.pdf".to_string(),
            payment_proof_public_id: "charity/donors/proofs/p".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let donor: Donor = entity.into();
        assert!(donor.donor_image.is_none());
        assert_eq!(donor.payment_proof.public_id, "charity/donors/proofs/p");
    }
}
