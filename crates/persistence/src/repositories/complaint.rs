//! Complaint repository.

use domain::models::{Complaint, ComplaintStatus, ListComplaintsQuery};
use shared::pagination::PageParams;
use sqlx::PgPool;

use crate::entities::ComplaintEntity;
use crate::filter::{like_pattern, FilterBuilder};
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, name, email, phone, subject, message, status, created_at, updated_at";

#[derive(Clone)]
pub struct ComplaintRepository {
    pool: PgPool,
}

impl ComplaintRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filter(query: &ListComplaintsQuery) -> FilterBuilder {
        let mut filter = FilterBuilder::new();
        if query.search.is_some() {
            filter.push(|i| format!("(name ILIKE ${i} OR email ILIKE ${i} OR subject ILIKE ${i})"));
        }
        if query.status.is_some() {
            filter.push(|i| format!("status = ${i}"));
        }
        if query.from.is_some() {
            filter.push(|i| format!("created_at >= ${i}"));
        }
        if query.to.is_some() {
            filter.push(|i| format!("created_at <= ${i}"));
        }
        filter
    }

    pub async fn count(&self, query: &ListComplaintsQuery) -> Result<i64, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!("SELECT COUNT(*) FROM complaints{}", filter.where_clause());

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(status) = query.status {
            q = q.bind(status.as_str());
        }
        if let Some(from) = query.from {
            q = q.bind(from);
        }
        if let Some(to) = query.to {
            q = q.bind(to);
        }

        let timer = QueryTimer::new("count_complaints");
        let total = q.fetch_one(&self.pool).await;
        timer.record();
        total
    }

    pub async fn list(
        &self,
        query: &ListComplaintsQuery,
        params: PageParams,
    ) -> Result<Vec<Complaint>, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!(
            "SELECT {COLUMNS} FROM complaints{} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_param(),
            filter.next_param() + 1
        );

        let mut q = sqlx::query_as::<_, ComplaintEntity>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(status) = query.status {
            q = q.bind(status.as_str());
        }
        if let Some(from) = query.from {
            q = q.bind(from);
        }
        if let Some(to) = query.to {
            q = q.bind(to);
        }
        q = q.bind(params.limit()).bind(params.offset());

        let timer = QueryTimer::new("list_complaints");
        let entities = q.fetch_all(&self.pool).await;
        timer.record();

        Ok(entities?.into_iter().map(Complaint::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Complaint>, sqlx::Error> {
        let timer = QueryTimer::new("find_complaint");
        let entity = sqlx::query_as::<_, ComplaintEntity>(&format!(
            "SELECT {COLUMNS} FROM complaints WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(entity?.map(Complaint::from))
    }

    /// New complaints always start out pending.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        subject: &str,
        message: &str,
    ) -> Result<Complaint, sqlx::Error> {
        let timer = QueryTimer::new("create_complaint");
        let entity = sqlx::query_as::<_, ComplaintEntity>(&format!(
            "INSERT INTO complaints (name, email, phone, subject, message, status) \
             VALUES ($1, $2, $3, $4, $5, 'pending') RETURNING {COLUMNS}"
        ))
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(subject)
        .bind(message)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(Complaint::from)
    }

    pub async fn update_status(
        &self,
        id: i64,
        status: ComplaintStatus,
    ) -> Result<Complaint, sqlx::Error> {
        let timer = QueryTimer::new("update_complaint_status");
        let entity = sqlx::query_as::<_, ComplaintEntity>(&format!(
            "UPDATE complaints SET status = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(Complaint::from)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_complaint");
        let result = sqlx::query("DELETE FROM complaints WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result?.rows_affected() > 0)
    }
}
