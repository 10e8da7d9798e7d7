//! Activity repository.

use domain::models::{Activity, AssetRef, ListActivitiesQuery};
use shared::pagination::PageParams;
use sqlx::PgPool;

use crate::entities::ActivityEntity;
use crate::filter::{like_pattern, FilterBuilder};
use crate::metrics::QueryTimer;

const COLUMNS: &str =
    "id, title, description, category, image_url, image_public_id, created_at, updated_at";

#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Conditions shared by `count` and `list`; values must be bound in
    /// the same order the conditions are pushed.
    fn filter(query: &ListActivitiesQuery) -> FilterBuilder {
        let mut filter = FilterBuilder::new();
        if query.search.is_some() {
            filter.push(|i| format!("(title ILIKE ${i} OR description ILIKE ${i})"));
        }
        if query.category.is_some() {
            filter.push(|i| format!("category = ${i}"));
        }
        if query.from.is_some() {
            filter.push(|i| format!("created_at >= ${i}"));
        }
        if query.to.is_some() {
            filter.push(|i| format!("created_at <= ${i}"));
        }
        filter
    }

    pub async fn count(&self, query: &ListActivitiesQuery) -> Result<i64, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!("SELECT COUNT(*) FROM activities{}", filter.where_clause());

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(category) = &query.category {
            q = q.bind(category);
        }
        if let Some(from) = query.from {
            q = q.bind(from);
        }
        if let Some(to) = query.to {
            q = q.bind(to);
        }

        let timer = QueryTimer::new("count_activities");
        let total = q.fetch_one(&self.pool).await;
        timer.record();
        total
    }

    pub async fn list(
        &self,
        query: &ListActivitiesQuery,
        params: PageParams,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!(
            "SELECT {COLUMNS} FROM activities{} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_param(),
            filter.next_param() + 1
        );

        let mut q = sqlx::query_as::<_, ActivityEntity>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(category) = &query.category {
            q = q.bind(category);
        }
        if let Some(from) = query.from {
            q = q.bind(from);
        }
        if let Some(to) = query.to {
            q = q.bind(to);
        }
        q = q.bind(params.limit()).bind(params.offset());

        let timer = QueryTimer::new("list_activities");
        let entities = q.fetch_all(&self.pool).await;
        timer.record();

        Ok(entities?.into_iter().map(Activity::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Activity>, sqlx::Error> {
        let timer = QueryTimer::new("find_activity");
        let entity = sqlx::query_as::<_, ActivityEntity>(&format!(
            "SELECT {COLUMNS} FROM activities WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(entity?.map(Activity::from))
    }

    pub async fn create(
        &self,
        title: &str,
        description: &str,
        category: Option<&str>,
        image: Option<&AssetRef>,
    ) -> Result<Activity, sqlx::Error> {
        let timer = QueryTimer::new("create_activity");
        let entity = sqlx::query_as::<_, ActivityEntity>(&format!(
            "INSERT INTO activities (title, description, category, image_url, image_public_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(image.map(|a| a.url.as_str()))
        .bind(image.map(|a| a.public_id.as_str()))
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(Activity::from)
    }

    /// Full-row update; callers merge the stored record with the incoming
    /// partial request before calling.
    pub async fn update(
        &self,
        id: i64,
        title: &str,
        description: &str,
        category: Option<&str>,
        image: Option<&AssetRef>,
    ) -> Result<Activity, sqlx::Error> {
        let timer = QueryTimer::new("update_activity");
        let entity = sqlx::query_as::<_, ActivityEntity>(&format!(
            "UPDATE activities SET title = $2, description = $3, category = $4, \
             image_url = $5, image_public_id = $6, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(image.map(|a| a.url.as_str()))
        .bind(image.map(|a| a.public_id.as_str()))
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(Activity::from)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_activity");
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result?.rows_affected() > 0)
    }
}
