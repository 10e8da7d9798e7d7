//! Payment details repository. The table is a singleton: at most one row
//! exists, and callers implement update-or-create on top of `find_first`.

use domain::models::{AssetRef, PaymentDetails};
use sqlx::PgPool;

use crate::entities::PaymentDetailsEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, account_name, account_number, ifsc_code, bank_name, upi_id, \
                       qr_image_url, qr_image_public_id, updated_at";

#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_first(&self) -> Result<Option<PaymentDetails>, sqlx::Error> {
        let timer = QueryTimer::new("find_payment_details");
        let entity = sqlx::query_as::<_, PaymentDetailsEntity>(&format!(
            "SELECT {COLUMNS} FROM payment_details ORDER BY id ASC LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(entity?.map(PaymentDetails::from))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        account_name: &str,
        account_number: &str,
        ifsc_code: &str,
        bank_name: &str,
        upi_id: Option<&str>,
        qr_image: &AssetRef,
    ) -> Result<PaymentDetails, sqlx::Error> {
        let timer = QueryTimer::new("create_payment_details");
        let entity = sqlx::query_as::<_, PaymentDetailsEntity>(&format!(
            "INSERT INTO payment_details (account_name, account_number, ifsc_code, bank_name, \
             upi_id, qr_image_url, qr_image_public_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {COLUMNS}"
        ))
        .bind(account_name)
        .bind(account_number)
        .bind(ifsc_code)
        .bind(bank_name)
        .bind(upi_id)
        .bind(qr_image.url.as_str())
        .bind(qr_image.public_id.as_str())
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(PaymentDetails::from)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i64,
        account_name: &str,
        account_number: &str,
        ifsc_code: &str,
        bank_name: &str,
        upi_id: Option<&str>,
        qr_image: &AssetRef,
    ) -> Result<PaymentDetails, sqlx::Error> {
        let timer = QueryTimer::new("update_payment_details");
        let entity = sqlx::query_as::<_, PaymentDetailsEntity>(&format!(
            "UPDATE payment_details SET account_name = $2, account_number = $3, ifsc_code = $4, \
             bank_name = $5, upi_id = $6, qr_image_url = $7, qr_image_public_id = $8, \
             updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(account_name)
        .bind(account_number)
        .bind(ifsc_code)
        .bind(bank_name)
        .bind(upi_id)
        .bind(qr_image.url.as_str())
        .bind(qr_image.public_id.as_str())
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(PaymentDetails::from)
    }
}
