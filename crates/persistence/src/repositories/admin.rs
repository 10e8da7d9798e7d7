//! Admin account repository.

use domain::models::{Admin, ListAdminsQuery};
use shared::pagination::PageParams;
use sqlx::PgPool;

use crate::entities::AdminEntity;
use crate::filter::{like_pattern, FilterBuilder};
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filter(query: &ListAdminsQuery) -> FilterBuilder {
        let mut filter = FilterBuilder::new();
        if query.search.is_some() {
            filter.push(|i| format!("(name ILIKE ${i} OR email ILIKE ${i})"));
        }
        filter
    }

    pub async fn count(&self, query: &ListAdminsQuery) -> Result<i64, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!("SELECT COUNT(*) FROM admins{}", filter.where_clause());

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }

        let timer = QueryTimer::new("count_admins");
        let total = q.fetch_one(&self.pool).await;
        timer.record();
        total
    }

    pub async fn list(
        &self,
        query: &ListAdminsQuery,
        params: PageParams,
    ) -> Result<Vec<Admin>, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!(
            "SELECT {COLUMNS} FROM admins{} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_param(),
            filter.next_param() + 1
        );

        let mut q = sqlx::query_as::<_, AdminEntity>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        q = q.bind(params.limit()).bind(params.offset());

        let timer = QueryTimer::new("list_admins");
        let entities = q.fetch_all(&self.pool).await;
        timer.record();

        Ok(entities?.into_iter().map(Admin::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Admin>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin");
        let entity =
            sqlx::query_as::<_, AdminEntity>(&format!("SELECT {COLUMNS} FROM admins WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await;
        timer.record();

        Ok(entity?.map(Admin::from))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_by_email");
        let entity = sqlx::query_as::<_, AdminEntity>(&format!(
            "SELECT {COLUMNS} FROM admins WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(entity?.map(Admin::from))
    }

    /// The unique index on `email` backstops the handler's duplicate
    /// check; a collision surfaces as a database error with code 23505.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Admin, sqlx::Error> {
        let timer = QueryTimer::new("create_admin");
        let entity = sqlx::query_as::<_, AdminEntity>(&format!(
            "INSERT INTO admins (name, email, password_hash) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(Admin::from)
    }

    pub async fn update(
        &self,
        id: i64,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Admin, sqlx::Error> {
        let timer = QueryTimer::new("update_admin");
        let entity = sqlx::query_as::<_, AdminEntity>(&format!(
            "UPDATE admins SET name = $2, email = $3, password_hash = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(Admin::from)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_admin");
        let result = sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result?.rows_affected() > 0)
    }
}
