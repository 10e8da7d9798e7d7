//! Event booking repository.

use domain::models::{EventBooking, ListEventBookingsQuery};
use shared::pagination::PageParams;
use sqlx::PgPool;

use crate::entities::EventBookingEntity;
use crate::filter::{like_pattern, FilterBuilder};
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, event_id, membership_no, name, email, phone, seats, created_at";

#[derive(Clone)]
pub struct EventBookingRepository {
    pool: PgPool,
}

impl EventBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filter(query: &ListEventBookingsQuery) -> FilterBuilder {
        let mut filter = FilterBuilder::new();
        if query.search.is_some() {
            filter.push(|i| format!("(name ILIKE ${i} OR email ILIKE ${i} OR membership_no ILIKE ${i})"));
        }
        if query.event_id.is_some() {
            filter.push(|i| format!("event_id = ${i}"));
        }
        if query.from.is_some() {
            filter.push(|i| format!("created_at >= ${i}"));
        }
        if query.to.is_some() {
            filter.push(|i| format!("created_at <= ${i}"));
        }
        filter
    }

    pub async fn count(&self, query: &ListEventBookingsQuery) -> Result<i64, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!(
            "SELECT COUNT(*) FROM event_bookings{}",
            filter.where_clause()
        );

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(event_id) = query.event_id {
            q = q.bind(event_id);
        }
        if let Some(from) = query.from {
            q = q.bind(from);
        }
        if let Some(to) = query.to {
            q = q.bind(to);
        }

        let timer = QueryTimer::new("count_event_bookings");
        let total = q.fetch_one(&self.pool).await;
        timer.record();
        total
    }

    pub async fn list(
        &self,
        query: &ListEventBookingsQuery,
        params: PageParams,
    ) -> Result<Vec<EventBooking>, sqlx::Error> {
        let filter = Self::filter(query);
        let sql = format!(
            "SELECT {COLUMNS} FROM event_bookings{} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_param(),
            filter.next_param() + 1
        );

        let mut q = sqlx::query_as::<_, EventBookingEntity>(&sql);
        if let Some(search) = &query.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(event_id) = query.event_id {
            q = q.bind(event_id);
        }
        if let Some(from) = query.from {
            q = q.bind(from);
        }
        if let Some(to) = query.to {
            q = q.bind(to);
        }
        q = q.bind(params.limit()).bind(params.offset());

        let timer = QueryTimer::new("list_event_bookings");
        let entities = q.fetch_all(&self.pool).await;
        timer.record();

        Ok(entities?.into_iter().map(EventBooking::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<EventBooking>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_booking");
        let entity = sqlx::query_as::<_, EventBookingEntity>(&format!(
            "SELECT {COLUMNS} FROM event_bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(entity?.map(EventBooking::from))
    }

    /// The `event_id` foreign key points at the activities table; booking
    /// a missing event surfaces as a database error with code 23503.
    pub async fn create(
        &self,
        event_id: i64,
        membership_no: Option<&str>,
        name: &str,
        email: &str,
        phone: &str,
        seats: i32,
    ) -> Result<EventBooking, sqlx::Error> {
        let timer = QueryTimer::new("create_event_booking");
        let entity = sqlx::query_as::<_, EventBookingEntity>(&format!(
            "INSERT INTO event_bookings (event_id, membership_no, name, email, phone, seats) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
        ))
        .bind(event_id)
        .bind(membership_no)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(seats)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        entity.map(EventBooking::from)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_event_booking");
        let result = sqlx::query("DELETE FROM event_bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result?.rows_affected() > 0)
    }
}
