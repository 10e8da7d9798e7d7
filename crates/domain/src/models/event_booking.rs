//! Event booking domain model.
//!
//! A booking references an activity (the bookable event) and optionally a
//! membership record by its unique membership number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageParams, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
pub struct EventBooking {
    pub id: i64,
    pub event_id: i64,
    pub membership_no: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub seats: i32,
    pub created_at: DateTime<Utc>,
}

fn default_seats() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventBookingRequest {
    pub event_id: i64,

    /// When supplied, must match an existing membership number.
    pub membership_no: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(custom(function = "crate::models::validate_phone"))]
    pub phone: String,

    #[validate(range(min = 1, max = 20, message = "Seats must be 1-20"))]
    #[serde(default = "default_seats")]
    pub seats: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEventBookingsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub event_id: Option<i64>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl ListEventBookingsQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListEventBookingsResponse {
    pub bookings: Vec<EventBooking>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_default_to_one() {
        let json = r#"{
            "event_id": 7,
            "name": "Kiran",
            "email": "kiran@example.org",
            "phone": "9876543210"
        }"#;
        let request: CreateEventBookingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.seats, 1);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn seats_above_cap_are_rejected() {
        let json = r#"{
            "event_id": 7,
            "name": "Kiran",
            "email": "kiran@example.org",
            "phone": "9876543210",
            "seats": 50
        }"#;
        let request: CreateEventBookingRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }
}
