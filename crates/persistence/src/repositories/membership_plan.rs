//! Membership plan repository. Plans are reference data, listed by
//! ascending amount.

use domain::models::{ListMembershipPlansQuery, MembershipPlan};
use shared::membership::DurationUnit;
use shared::pagination::PageParams;
use sqlx::PgPool;

use crate::entities::MembershipPlanEntity;
use crate::filter::{like_pattern, FilterBuilder};
use crate::metrics::QueryTimer;

const COLUMNS: &str =
    "id, name, description, amount, duration_value, duration_unit, created_at, updated_at";

#[derive(Clone)]
pub struct MembershipPlanRepository {
    pool: PgPool,
}

impl MembershipPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filter(query: &ListMembershipPlansQuery) -> FilterBuilder {
        let mut filter = FilterBuilder::new();
        if query.search.is_some() {
            filter.push(|i| format!("(name ILIKE ${i} OR description ILIKE ${i})"));
        }
        filter
    }

    pub async fn count(&self, query: &ListMembershipPlansQuery) -> Result<i64, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!(
            "SELECT COUNT(*) FROM membership_plans{}",
            filter.where_clause()
        );

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }

        let timer = QueryTimer::new("count_membership_plans");
        let total = q.fetch_one(&self.pool).await;
        timer.record();
        total
    }

    pub async fn list(
        &self,
        query: &ListMembershipPlansQuery,
        params: PageParams,
    ) -> Result<Vec<MembershipPlan>, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!(
            "SELECT {COLUMNS} FROM membership_plans{} ORDER BY amount ASC, id ASC \
             LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_param(),
            filter.next_param() + 1
        );

        let mut q = sqlx::query_as::<_, MembershipPlanEntity>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        q = q.bind(params.limit()).bind(params.offset());

        let timer = QueryTimer::new("list_membership_plans");
        let entities = q.fetch_all(&self.pool).await;
        timer.record();

        Ok(entities?.into_iter().map(MembershipPlan::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<MembershipPlan>, sqlx::Error> {
        let timer = QueryTimer::new("find_membership_plan");
        let entity = sqlx::query_as::<_, MembershipPlanEntity>(&format!(
            "SELECT {COLUMNS} FROM membership_plans WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(entity?.map(MembershipPlan::from))
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        amount: i64,
        duration_value: i32,
        duration_unit: DurationUnit,
    ) -> Result<MembershipPlan, sqlx::Error> {
        let timer = QueryTimer::new("create_membership_plan");
        let entity = sqlx::query_as::<_, MembershipPlanEntity>(&format!(
            "INSERT INTO membership_plans (name, description, amount, duration_value, duration_unit) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(name)
        .bind(description)
        .bind(amount)
        .bind(duration_value)
        .bind(duration_unit.as_str())
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(MembershipPlan::from)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
        amount: i64,
        duration_value: i32,
        duration_unit: DurationUnit,
    ) -> Result<MembershipPlan, sqlx::Error> {
        let timer = QueryTimer::new("update_membership_plan");
        let entity = sqlx::query_as::<_, MembershipPlanEntity>(&format!(
            "UPDATE membership_plans SET name = $2, description = $3, amount = $4, \
             duration_value = $5, duration_unit = $6, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(amount)
        .bind(duration_value)
        .bind(duration_unit.as_str())
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(MembershipPlan::from)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_membership_plan");
        let result = sqlx::query("DELETE FROM membership_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result?.rows_affected() > 0)
    }
}
