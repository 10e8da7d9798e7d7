//! Event booking entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::EventBooking;

/// Database row mapping for the event_bookings table.
#[derive(Debug, Clone, FromRow)]
pub struct EventBookingEntity {
    pub id: i64,
    pub event_id: i64,
    pub membership_no: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub seats: i32,
    pub created_at: DateTime<Utc>,
}

impl From<EventBookingEntity> for EventBooking {
    fn from(entity: EventBookingEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            membership_no: entity.membership_no,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            seats: entity.seats,
            created_at: entity.created_at,
        }
    }
}
