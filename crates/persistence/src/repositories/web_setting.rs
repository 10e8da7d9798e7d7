//! Web setting repository. Settings are key-unique pairs; writes go
//! through a single upsert.

use domain::models::{ListWebSettingsQuery, WebSetting};
use shared::pagination::PageParams;
use sqlx::PgPool;

use crate::entities::WebSettingEntity;
use crate::filter::{like_pattern, FilterBuilder};
use crate::metrics::QueryTimer;

const COLUMNS: &str = "key, value, updated_at";

#[derive(Clone)]
pub struct WebSettingRepository {
    pool: PgPool,
}

impl WebSettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filter(query: &ListWebSettingsQuery) -> FilterBuilder {
        let mut filter = FilterBuilder::new();
        if query.search.is_some() {
            filter.push(|i| format!("(key ILIKE ${i} OR value ILIKE ${i})"));
        }
        filter
    }

    pub async fn count(&self, query: &ListWebSettingsQuery) -> Result<i64, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!("SELECT COUNT(*) FROM web_settings{}", filter.where_clause());

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }

        let timer = QueryTimer::new("count_web_settings");
        let total = q.fetch_one(&self.pool).await;
        timer.record();
        total
    }

    pub async fn list(
        &self,
        query: &ListWebSettingsQuery,
        params: PageParams,
    ) -> Result<Vec<WebSetting>, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!(
            "SELECT {COLUMNS} FROM web_settings{} ORDER BY key ASC LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_param(),
            filter.next_param() + 1
        );

        let mut q = sqlx::query_as::<_, WebSettingEntity>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        q = q.bind(params.limit()).bind(params.offset());

        let timer = QueryTimer::new("list_web_settings");
        let entities = q.fetch_all(&self.pool).await;
        timer.record();

        Ok(entities?.into_iter().map(WebSetting::from).collect())
    }

    /// Every setting, unpaginated, for the public key→value map.
    pub async fn get_all(&self) -> Result<Vec<WebSetting>, sqlx::Error> {
        let timer = QueryTimer::new("get_all_web_settings");
        let entities = sqlx::query_as::<_, WebSettingEntity>(&format!(
            "SELECT {COLUMNS} FROM web_settings ORDER BY key ASC"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();

        Ok(entities?.into_iter().map(WebSetting::from).collect())
    }

    pub async fn find_by_key(&self, key: &str) -> Result<Option<WebSetting>, sqlx::Error> {
        let timer = QueryTimer::new("find_web_setting");
        let entity = sqlx::query_as::<_, WebSettingEntity>(&format!(
            "SELECT {COLUMNS} FROM web_settings WHERE key = $1"
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(entity?.map(WebSetting::from))
    }

    pub async fn upsert(&self, key: &str, value: &str) -> Result<WebSetting, sqlx::Error> {
        let timer = QueryTimer::new("upsert_web_setting");
        let entity = sqlx::query_as::<_, WebSettingEntity>(&format!(
            "INSERT INTO web_settings (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW() \
             RETURNING {COLUMNS}"
        ))
        .bind(key)
        .bind(value)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(WebSetting::from)
    }

    pub async fn delete(&self, key: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_web_setting");
        let result = sqlx::query("DELETE FROM web_settings WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result?.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_filters_key_and_value() {
        let query = ListWebSettingsQuery {
            search: Some("theme".to_string()),
            ..Default::default()
        };
        let filter = WebSettingRepository::filter(&query);
        assert_eq!(
            filter.where_clause(),
            " WHERE (key ILIKE $1 OR value ILIKE $1)"
        );
        assert_eq!(like_pattern("theme"), "%theme%");
    }

    #[test]
    fn count_and_slice_share_one_filter() {
        let query = ListWebSettingsQuery {
            search: Some("contact".to_string()),
            ..Default::default()
        };
        // Both queries derive their WHERE clause from the same builder.
        let count_clause = WebSettingRepository::filter(&query).where_clause();
        let list_clause = WebSettingRepository::filter(&query).where_clause();
        assert_eq!(count_clause, list_clause);
    }

    #[test]
    fn no_search_means_no_where_clause() {
        let filter = WebSettingRepository::filter(&ListWebSettingsQuery::default());
        assert!(filter.is_empty());
        assert_eq!(filter.next_param(), 1);
    }
}
