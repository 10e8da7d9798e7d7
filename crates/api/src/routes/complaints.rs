//! Complaint handlers: public submission, admin triage.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use domain::models::complaint::{
    Complaint, CreateComplaintRequest, ListComplaintsQuery, ListComplaintsResponse,
    UpdateComplaintRequest,
};
use persistence::repositories::ComplaintRepository;
use shared::pagination::Pagination;

use crate::app::AppState;
use crate::error::{ApiError, MutationError, MutationSuccess};
use crate::routes::{cache_key, store_and_respond};

const TAG: &str = "complaints";

fn id_tag(id: i64) -> String {
    format!("complaint:{id}")
}

fn not_found() -> ApiError {
    ApiError::NotFound("Complaint not found".into())
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListComplaintsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let params = query.page_params();
    let key = cache_key(
        format!("complaints:list:p{}:l{}", params.page, params.limit),
        &[
            ("search", query.search.clone()),
            ("status", query.status.map(|s| s.as_str().to_string())),
            ("from", query.from.map(|d| d.to_rfc3339())),
            ("to", query.to.map(|d| d.to_rfc3339())),
        ],
    );
    if let Some(hit) = state.cache.get(&key) {
        return Ok(Json(hit));
    }

    let repo = ComplaintRepository::new(state.pool.clone());
    let total = repo.count(&query).await?;
    let complaints = repo.list(&query, params).await?;
    let response = ListComplaintsResponse {
        complaints,
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

    let repo = ComplaintRepository::new(state.pool.clone());
    let complaint = repo.find_by_id(id).await?.ok_or_else(not_found)?;
    store_and_respond(&state.cache, &key, &[TAG, &id_tag(id)], &complaint)
}

/// Public submission form; new complaints start out pending.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateComplaintRequest>,
) -> Result<Json<MutationSuccess<Complaint>>, MutationError> {
    request.validate()?;

    let repo = ComplaintRepository::new(state.pool.clone());
    let complaint = repo
        .create(
            &request.name,
            &request.email,
            request.phone.as_deref(),
            &request.subject,
            &request.message,
        )
        .await?;

    state.cache.invalidate(TAG);
    Ok(MutationSuccess::respond(complaint))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateComplaintRequest>,
) -> Result<Json<MutationSuccess<Complaint>>, MutationError> {
    let repo = ComplaintRepository::new(state.pool.clone());
    if repo.find_by_id(id).await?.is_none() {
        return Err(not_found().into());
    }

    let complaint = repo.update_status(id, request.status).await?;

    state.cache.invalidate_all([TAG, id_tag(id).as_str()]);
    Ok(MutationSuccess::respond(complaint))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MutationSuccess<Complaint>>, MutationError> {
    let repo = ComplaintRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(not_found)?;

    if !repo.delete(id).await? {
        return Err(not_found().into());
    }

    state.cache.invalidate_all([TAG, id_tag(id).as_str()]);
    Ok(MutationSuccess::respond(existing))
}
