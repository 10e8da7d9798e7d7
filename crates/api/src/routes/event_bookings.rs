//! Event booking handlers.
//!
//! Bookings are public submissions against an existing activity. A supplied
//! membership number must match a member record; an unknown one is a
//! validation failure, not a lookup miss.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use domain::models::event_booking::{
    CreateEventBookingRequest, EventBooking, ListEventBookingsQuery, ListEventBookingsResponse,
};
use persistence::repositories::{ActivityRepository, EventBookingRepository, MemberRepository};
use shared::pagination::Pagination;

use crate::app::AppState;
use crate::error::{ApiError, MutationError, MutationSuccess};
use crate::routes::{cache_key, store_and_respond};

const TAG: &str = "event-bookings";

fn id_tag(id: i64) -> String {
    format!("event-booking:{id}")
}

fn not_found() -> ApiError {
    ApiError::NotFound("Booking not found".into())
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListEventBookingsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let params = query.page_params();
    let key = cache_key(
        format!("event-bookings:list:p{}:l{}", params.page, params.limit),
        &[
            ("search", query.search.clone()),
            ("event", query.event_id.map(|id| id.to_string())),
            ("from", query.from.map(|d| d.to_rfc3339())),
            ("to", query.to.map(|d| d.to_rfc3339())),
        ],
    );
    if let Some(hit) = state.cache.get(&key) {
        return Ok(Json(hit));
    }

    let repo = EventBookingRepository::new(state.pool.clone());
    let total = repo.count(&query).await?;
    let bookings = repo.list(&query, params).await?;
    let response = ListEventBookingsResponse {
        bookings,
        pagination: Pagination::new(total, params),
    };
    store_and_respond(&state.cache, &key, &[TAG], &response)
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let key = id_tag(id);
    if let Some(hit) = state.cache.get(&key) {
        return Ok(Json(hit));
    }

    let repo = EventBookingRepository::new(state.pool.clone());
    let booking = repo.find_by_id(id).await?.ok_or_else(not_found)?;
    store_and_respond(&state.cache, &key, &[TAG, &id_tag(id)], &booking)
}

/// Public booking form.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateEventBookingRequest>,
) -> Result<Json<MutationSuccess<EventBooking>>, MutationError> {
    request.validate()?;

    let activities = ActivityRepository::new(state.pool.clone());
    if activities.find_by_id(request.event_id).await?.is_none() {
        return Err(ApiError::NotFound("Event not found".into()).into());
    }

    if let Some(membership_no) = &request.membership_no {
        let members = MemberRepository::new(state.pool.clone());
        if members
            .find_by_membership_no(membership_no)
            .await?
            .is_none()
        {
            return Err(ApiError::Validation("Unknown membership number".into()).into());
        }
    }

    let repo = EventBookingRepository::new(state.pool.clone());
    let booking = repo
        .create(
            request.event_id,
            request.membership_no.as_deref(),
            &request.name,
            &request.email,
            &request.phone,
            request.seats,
        )
        .await?;

    state.cache.invalidate(TAG);
    Ok(MutationSuccess::respond(booking))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MutationSuccess<EventBooking>>, MutationError> {
    let repo = EventBookingRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(not_found)?;

    if !repo.delete(id).await? {
        return Err(not_found().into());
    }

    state.cache.invalidate_all([TAG, id_tag(id).as_str()]);
    Ok(MutationSuccess::respond(existing))
}
