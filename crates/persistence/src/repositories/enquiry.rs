//! Enquiry repository. Enquiries have no update path.

use domain::models::{Enquiry, ListEnquiriesQuery};
use shared::pagination::PageParams;
use sqlx::PgPool;

use crate::entities::EnquiryEntity;
use crate::filter::{like_pattern, FilterBuilder};
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, name, email, phone, message, created_at";

#[derive(Clone)]
pub struct EnquiryRepository {
    pool: PgPool,
}

impl EnquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filter(query: &ListEnquiriesQuery) -> FilterBuilder {
        let mut filter = FilterBuilder::new();
        if query.search.is_some() {
            filter.push(|i| format!("(name ILIKE ${i} OR email ILIKE ${i} OR phone ILIKE ${i} OR message ILIKE ${i})"));
        }
        if query.from.is_some() {
            filter.push(|i| format!("created_at >= ${i}"));
        }
        if query.to.is_some() {
            filter.push(|i| format!("created_at <= ${i}"));
        }
        filter
    }

    pub async fn count(&self, query: &ListEnquiriesQuery) -> Result<i64, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!("SELECT COUNT(*) FROM enquiries{}", filter.where_clause());

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

        let timer = QueryTimer::new("count_enquiries");
        let total = q.fetch_one(&self.pool).await;
        timer.record();
        total
    }

    pub async fn list(
        &self,
        query: &ListEnquiriesQuery,
        params: PageParams,
    ) -> Result<Vec<Enquiry>, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!(
            "SELECT {COLUMNS} FROM enquiries{} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_param(),
            filter.next_param() + 1
        );

        let mut q = sqlx::query_as::<_, EnquiryEntity>(&sql);
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

        let timer = QueryTimer::new("list_enquiries");
        let entities = q.fetch_all(&self.pool).await;
        timer.record();

        Ok(entities?.into_iter().map(Enquiry::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Enquiry>, sqlx::Error> {
        let timer = QueryTimer::new("find_enquiry");
        let entity = sqlx::query_as::<_, EnquiryEntity>(&format!(
            "SELECT {COLUMNS} FROM enquiries WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(entity?.map(Enquiry::from))
    }

    pub async fn create(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        message: &str,
    ) -> Result<Enquiry, sqlx::Error> {
        let timer = QueryTimer::new("create_enquiry");
        let entity = sqlx::query_as::<_, EnquiryEntity>(&format!(
            "INSERT INTO enquiries (name, email, phone, message) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        ))
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(message)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(Enquiry::from)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_enquiry");
        let result = sqlx::query("DELETE FROM enquiries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result?.rows_affected() > 0)
    }
}
