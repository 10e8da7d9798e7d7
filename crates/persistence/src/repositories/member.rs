//! Member repository.

use chrono::{DateTime, Utc};
use domain::models::{ListMembersQuery, Member};
use shared::pagination::PageParams;
use sqlx::PgPool;

use crate::entities::MemberEntity;
use crate::filter::{like_pattern, FilterBuilder};
use crate::metrics::QueryTimer;

const COLUMNS: &str =
    "id, membership_no, name, email, phone, plan_id, expires_at, created_at, updated_at";

#[derive(Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filter(query: &ListMembersQuery) -> FilterBuilder {
        let mut filter = FilterBuilder::new();
        if query.search.is_some() {
            filter.push(|i| {
                format!("(name ILIKE ${i} OR email ILIKE ${i} OR membership_no ILIKE ${i})")
            });
        }
        if query.plan_id.is_some() {
            filter.push(|i| format!("plan_id = ${i}"));
        }
        filter
    }

    pub async fn count(&self, query: &ListMembersQuery) -> Result<i64, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!("SELECT COUNT(*) FROM members{}", filter.where_clause());

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(plan_id) = query.plan_id {
            q = q.bind(plan_id);
        }

        let timer = QueryTimer::new("count_members");
        let total = q.fetch_one(&self.pool).await;
        timer.record();
        total
    }

    pub async fn list(
        &self,
        query: &ListMembersQuery,
        params: PageParams,
    ) -> Result<Vec<Member>, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!(
            "SELECT {COLUMNS} FROM members{} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_param(),
            filter.next_param() + 1
        );

        let mut q = sqlx::query_as::<_, MemberEntity>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(plan_id) = query.plan_id {
            q = q.bind(plan_id);
        }
        q = q.bind(params.limit()).bind(params.offset());

        let timer = QueryTimer::new("list_members");
        let entities = q.fetch_all(&self.pool).await;
        timer.record();

        Ok(entities?.into_iter().map(Member::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Member>, sqlx::Error> {
        let timer = QueryTimer::new("find_member");
        let entity = sqlx::query_as::<_, MemberEntity>(&format!(
            "SELECT {COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(entity?.map(Member::from))
    }

    pub async fn find_by_membership_no(
        &self,
        membership_no: &str,
    ) -> Result<Option<Member>, sqlx::Error> {
        let timer = QueryTimer::new("find_member_by_membership_no");
        let entity = sqlx::query_as::<_, MemberEntity>(&format!(
            "SELECT {COLUMNS} FROM members WHERE membership_no = $1"
        ))
        .bind(membership_no)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(entity?.map(Member::from))
    }

    /// The unique index on `membership_no` rejects generator collisions
    /// with code 23505; callers retry with a fresh number.
    pub async fn create(
        &self,
        membership_no: &str,
        name: &str,
        email: &str,
        phone: Option<&str>,
        plan_id: i64,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Member, sqlx::Error> {
        let timer = QueryTimer::new("create_member");
        let entity = sqlx::query_as::<_, MemberEntity>(&format!(
            "INSERT INTO members (membership_no, name, email, phone, plan_id, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
        ))
        .bind(membership_no)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(plan_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(Member::from)
    }

    /// Move a member onto a plan with a freshly computed expiry.
    pub async fn renew(
        &self,
        id: i64,
        plan_id: i64,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Member, sqlx::Error> {
        let timer = QueryTimer::new("renew_member");
        let entity = sqlx::query_as::<_, MemberEntity>(&format!(
            "UPDATE members SET plan_id = $2, expires_at = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(plan_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(Member::from)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_member");
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result?.rows_affected() > 0)
    }
}
