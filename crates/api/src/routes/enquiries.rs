//! Enquiry handlers. Public submission; admins can only list, view and
//! delete, there is no update path.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use domain::models::enquiry::{
    CreateEnquiryRequest, Enquiry, ListEnquiriesQuery, ListEnquiriesResponse,
};
use persistence::repositories::EnquiryRepository;
use shared::pagination::Pagination;

use crate::app::AppState;
use crate::error::{ApiError, MutationError, MutationSuccess};
use crate::routes::{cache_key, store_and_respond};

const TAG: &str = "enquiries";

fn id_tag(id: i64) -> String {
    format!("enquiry:{id}")
}

fn not_found() -> ApiError {
    ApiError::NotFound("Enquiry not found".into())
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListEnquiriesQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let params = query.page_params();
    let key = cache_key(
        format!("enquiries:list:p{}:l{}", params.page, params.limit),
        &[
            ("search", query.search.clone()),
            ("from", query.from.map(|d| d.to_rfc3339())),
            ("to", query.to.map(|d| d.to_rfc3339())),
        ],
    );
    if let Some(hit) = state.cache.get(&key) {
        return Ok(Json(hit));
    }

    let repo = EnquiryRepository::new(state.pool.clone());
    let total = repo.count(&query).await?;
    let enquiries = repo.list(&query, params).await?;
    let response = ListEnquiriesResponse {
        enquiries,
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

    let repo = EnquiryRepository::new(state.pool.clone());
    let enquiry = repo.find_by_id(id).await?.ok_or_else(not_found)?;
    store_and_respond(&state.cache, &key, &[TAG, &id_tag(id)], &enquiry)
}

/// Public contact form.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateEnquiryRequest>,
) -> Result<Json<MutationSuccess<Enquiry>>, MutationError> {
    request.validate()?;

    let repo = EnquiryRepository::new(state.pool.clone());
    let enquiry = repo
        .create(
            &request.name,
            &request.email,
            request.phone.as_deref(),
            &request.message,
        )
        .await?;

    state.cache.invalidate(TAG);
    Ok(MutationSuccess::respond(enquiry))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MutationSuccess<Enquiry>>, MutationError> {
    let repo = EnquiryRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(not_found)?;

    if !repo.delete(id).await? {
        return Err(not_found().into());
    }

    state.cache.invalidate_all([TAG, id_tag(id).as_str()]);
    Ok(MutationSuccess::respond(existing))
}
