//! Donor repository.

use domain::models::{AssetRef, Donor, ListDonorsQuery};
use shared::pagination::PageParams;
use sqlx::PgPool;

use crate::entities::DonorEntity;
use crate::filter::{like_pattern, FilterBuilder};
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, name, email, phone, amount, donor_image_url, donor_image_public_id, \
                       payment_proof_url, payment_proof_public_id, created_at, updated_at";

#[derive(Clone)]
pub struct DonorRepository {
    pool: PgPool,
}

impl DonorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filter(query: &ListDonorsQuery) -> FilterBuilder {
        let mut filter = FilterBuilder::new();
        if query.search.is_some() {
            filter.push(|i| format!("(name ILIKE ${i} OR email ILIKE ${i} OR phone ILIKE ${i})"));
        }
        if query.from.is_some() {
            filter.push(|i| format!("created_at >= ${i}"));
        }
        if query.to.is_some() {
            filter.push(|i| format!("created_at <= ${i}"));
        }
        filter
    }

    pub async fn count(&self, query: &ListDonorsQuery) -> Result<i64, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!("SELECT COUNT(*) FROM donors{}", filter.where_clause());

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(from) = query.from {
            q = q.bind(from);
        }
        if let Some(to) = query.to {
            q = q.bind(to);
        }

        let timer = QueryTimer::new("count_donors");
        let total = q.fetch_one(&self.pool).await;
        timer.record();
        total
    }

    pub async fn list(
        &self,
        query: &ListDonorsQuery,
        params: PageParams,
    ) -> Result<Vec<Donor>, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!(
            "SELECT {COLUMNS} FROM donors{} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_param(),
            filter.next_param() + 1
        );

        let mut q = sqlx::query_as::<_, DonorEntity>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(from) = query.from {
            q = q.bind(from);
        }
        if let Some(to) = query.to {
            q = q.bind(to);
        }
        q = q.bind(params.limit()).bind(params.offset());

        let timer = QueryTimer::new("list_donors");
        let entities = q.fetch_all(&self.pool).await;
        timer.record();

        Ok(entities?.into_iter().map(Donor::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Donor>, sqlx::Error> {
        let timer = QueryTimer::new("find_donor");
        let entity = sqlx::query_as::<_, DonorEntity>(&format!(
            "SELECT {COLUMNS} FROM donors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(entity?.map(Donor::from))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        amount: i64,
        donor_image: Option<&AssetRef>,
        payment_proof: &AssetRef,
    ) -> Result<Donor, sqlx::Error> {
        let timer = QueryTimer::new("create_donor");
        let entity = sqlx::query_as::<_, DonorEntity>(&format!(
            "INSERT INTO donors (name, email, phone, amount, donor_image_url, \
             donor_image_public_id, payment_proof_url, payment_proof_public_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {COLUMNS}"
        ))
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(amount)
        .bind(donor_image.map(|a| a.url.as_str()))
        .bind(donor_image.map(|a| a.public_id.as_str()))
        .bind(payment_proof.url.as_str())
        .bind(payment_proof.public_id.as_str())
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(Donor::from)
    }

    /// Full-row update with the merged field set; callers resolve partial
    /// requests against the stored record first.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        amount: i64,
        donor_image: Option<&AssetRef>,
        payment_proof: &AssetRef,
    ) -> Result<Donor, sqlx::Error> {
        let timer = QueryTimer::new("update_donor");
        let entity = sqlx::query_as::<_, DonorEntity>(&format!(
            "UPDATE donors SET name = $2, email = $3, phone = $4, amount = $5, \
             donor_image_url = $6, donor_image_public_id = $7, \
             payment_proof_url = $8, payment_proof_public_id = $9, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(amount)
        .bind(donor_image.map(|a| a.url.as_str()))
        .bind(donor_image.map(|a| a.public_id.as_str()))
        .bind(payment_proof.url.as_str())
        .bind(payment_proof.public_id.as_str())
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(Donor::from)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_donor");
        let result = sqlx::query("DELETE FROM donors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result?.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn filter_numbers_parameters_in_push_order() {
        let query = ListDonorsQuery {
            search: Some("meera".to_string()),
            from: Some(Utc::now()),
            to: Some(Utc::now()),
            ..Default::default()
        };
        let filter = DonorRepository::filter(&query);
        assert_eq!(
            filter.where_clause(),
            " WHERE (name ILIKE $1 OR email ILIKE $1 OR phone ILIKE $1) \
             AND created_at >= $2 AND created_at <= $3"
        );
        // LIMIT/OFFSET pick up the next two positions.
        assert_eq!(filter.next_param(), 4);
    }

    #[test]
    fn date_range_alone_binds_two_parameters() {
        let query = ListDonorsQuery {
            from: Some(Utc::now()),
            to: Some(Utc::now()),
            ..Default::default()
        };
        let filter = DonorRepository::filter(&query);
        assert_eq!(
            filter.where_clause(),
            " WHERE created_at >= $1 AND created_at <= $2"
        );
    }
}
