//! Slider repository. Sliders are display-ordered by `position`.

use domain::models::{AssetRef, ListSlidersQuery, Slider};
use shared::pagination::PageParams;
use sqlx::PgPool;

use crate::entities::SliderEntity;
use crate::filter::{like_pattern, FilterBuilder};
use crate::metrics::QueryTimer;

const COLUMNS: &str =
    "id, title, image_url, image_public_id, position, active, created_at, updated_at";

#[derive(Clone)]
pub struct SliderRepository {
    pool: PgPool,
}

impl SliderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filter(query: &ListSlidersQuery) -> FilterBuilder {
        let mut filter = FilterBuilder::new();
        if query.search.is_some() {
            filter.push(|i| format!("title ILIKE ${i}"));
        }
        if query.active.is_some() {
            filter.push(|i| format!("active = ${i}"));
        }
        filter
    }

    pub async fn count(&self, query: &ListSlidersQuery) -> Result<i64, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!("SELECT COUNT(*) FROM sliders{}", filter.where_clause());

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(active) = query.active {
            q = q.bind(active);
        }

        let timer = QueryTimer::new("count_sliders");
        let total = q.fetch_one(&self.pool).await;
        timer.record();
        total
    }

    pub async fn list(
        &self,
        query: &ListSlidersQuery,
        params: PageParams,
    ) -> Result<Vec<Slider>, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!(
            "SELECT {COLUMNS} FROM sliders{} ORDER BY position ASC, id ASC LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_param(),
            filter.next_param() + 1
        );

        let mut q = sqlx::query_as::<_, SliderEntity>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(active) = query.active {
            q = q.bind(active);
        }
        q = q.bind(params.limit()).bind(params.offset());

        let timer = QueryTimer::new("list_sliders");
        let entities = q.fetch_all(&self.pool).await;
        timer.record();

        Ok(entities?.into_iter().map(Slider::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Slider>, sqlx::Error> {
        let timer = QueryTimer::new("find_slider");
        let entity = sqlx::query_as::<_, SliderEntity>(&format!(
            "SELECT {COLUMNS} FROM sliders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(entity?.map(Slider::from))
    }

    pub async fn create(
        &self,
        title: Option<&str>,
        image: &AssetRef,
        position: i32,
        active: bool,
    ) -> Result<Slider, sqlx::Error> {
        let timer = QueryTimer::new("create_slider");
        let entity = sqlx::query_as::<_, SliderEntity>(&format!(
            "INSERT INTO sliders (title, image_url, image_public_id, position, active) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(title)
        .bind(image.url.as_str())
        .bind(image.public_id.as_str())
        .bind(position)
        .bind(active)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(Slider::from)
    }

    pub async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        image: &AssetRef,
        position: i32,
        active: bool,
    ) -> Result<Slider, sqlx::Error> {
        let timer = QueryTimer::new("update_slider");
        let entity = sqlx::query_as::<_, SliderEntity>(&format!(
            "UPDATE sliders SET title = $2, image_url = $3, image_public_id = $4, \
             position = $5, active = $6, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(image.url.as_str())
        .bind(image.public_id.as_str())
        .bind(position)
        .bind(active)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(Slider::from)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_slider");
        let result = sqlx::query("DELETE FROM sliders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result?.rows_affected() > 0)
    }
}
