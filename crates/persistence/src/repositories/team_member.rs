//! Team member repository. Display-ordered by `position`.

use domain::models::{AssetRef, ListTeamMembersQuery, TeamMember};
use shared::pagination::PageParams;
use sqlx::PgPool;

use crate::entities::TeamMemberEntity;
use crate::filter::{like_pattern, FilterBuilder};
use crate::metrics::QueryTimer;

const COLUMNS: &str =
    "id, name, designation, photo_url, photo_public_id, position, created_at, updated_at";

#[derive(Clone)]
pub struct TeamMemberRepository {
    pool: PgPool,
}

impl TeamMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filter(query: &ListTeamMembersQuery) -> FilterBuilder {
        let mut filter = FilterBuilder::new();
        if query.search.is_some() {
            filter.push(|i| format!("(name ILIKE ${i} OR designation ILIKE ${i})"));
        }
        filter
    }

    pub async fn count(&self, query: &ListTeamMembersQuery) -> Result<i64, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!("SELECT COUNT(*) FROM team_members{}", filter.where_clause());

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }

        let timer = QueryTimer::new("count_team_members");
        let total = q.fetch_one(&self.pool).await;
        timer.record();
        total
    }

    pub async fn list(
        &self,
        query: &ListTeamMembersQuery,
        params: PageParams,
    ) -> Result<Vec<TeamMember>, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!(
            "SELECT {COLUMNS} FROM team_members{} ORDER BY position ASC, id ASC \
             LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_param(),
            filter.next_param() + 1
        );

        let mut q = sqlx::query_as::<_, TeamMemberEntity>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        q = q.bind(params.limit()).bind(params.offset());

        let timer = QueryTimer::new("list_team_members");
        let entities = q.fetch_all(&self.pool).await;
        timer.record();

        Ok(entities?.into_iter().map(TeamMember::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<TeamMember>, sqlx::Error> {
        let timer = QueryTimer::new("find_team_member");
        let entity = sqlx::query_as::<_, TeamMemberEntity>(&format!(
            "SELECT {COLUMNS} FROM team_members WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(entity?.map(TeamMember::from))
    }

    pub async fn create(
        &self,
        name: &str,
        designation: &str,
        photo: Option<&AssetRef>,
        position: i32,
    ) -> Result<TeamMember, sqlx::Error> {
        let timer = QueryTimer::new("create_team_member");
        let entity = sqlx::query_as::<_, TeamMemberEntity>(&format!(
            "INSERT INTO team_members (name, designation, photo_url, photo_public_id, position) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(name)
        .bind(designation)
        .bind(photo.map(|a| a.url.as_str()))
        .bind(photo.map(|a| a.public_id.as_str()))
        .bind(position)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(TeamMember::from)
    }

    pub async fn update(
        &self,
        id: i64,
        name: &str,
        designation: &str,
        photo: Option<&AssetRef>,
        position: i32,
    ) -> Result<TeamMember, sqlx::Error> {
        let timer = QueryTimer::new("update_team_member");
        let entity = sqlx::query_as::<_, TeamMemberEntity>(&format!(
            "UPDATE team_members SET name = $2, designation = $3, photo_url = $4, \
             photo_public_id = $5, position = $6, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(designation)
        .bind(photo.map(|a| a.url.as_str()))
        .bind(photo.map(|a| a.public_id.as_str()))
        .bind(position)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(TeamMember::from)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_team_member");
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result?.rows_affected() > 0)
    }
}
