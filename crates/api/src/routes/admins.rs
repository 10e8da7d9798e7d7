//! Admin account handlers.
//!
//! Creation pre-checks the email before inserting. Two concurrent identical
//! requests can both pass the check; the unique constraint then fails the
//! second insert, which surfaces as a conflict.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use domain::models::admin::{
    AdminResponse, CreateAdminRequest, ListAdminsQuery, ListAdminsResponse, UpdateAdminRequest,
};
use persistence::repositories::AdminRepository;
use shared::pagination::Pagination;
use shared::password::hash_password;

use crate::app::AppState;
use crate::error::{ApiError, MutationError, MutationSuccess};
use crate::routes::{cache_key, store_and_respond};

const TAG: &str = "admins";

fn id_tag(id: i64) -> String {
    format!("admin:{id}")
}

fn not_found() -> ApiError {
    ApiError::NotFound("Admin not found".into())
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListAdminsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let params = query.page_params();
    let key = cache_key(
        format!("admins:list:p{}:l{}", params.page, params.limit),
        &[("search", query.search.clone())],
    );
    if let Some(hit) = state.cache.get(&key) {
        return Ok(Json(hit));
    }

    let repo = AdminRepository::new(state.pool.clone());
    let total = repo.count(&query).await?;
    let admins = repo
        .list(&query, params)
        .await?
        .into_iter()
        .map(AdminResponse::from)
        .collect();
    let response = ListAdminsResponse {
        admins,
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

    let repo = AdminRepository::new(state.pool.clone());
    let admin = repo.find_by_id(id).await?.ok_or_else(not_found)?;
    store_and_respond(
        &state.cache,
        &key,
        &[TAG, &id_tag(id)],
        &AdminResponse::from(admin),
    )
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateAdminRequest>,
) -> Result<Json<MutationSuccess<AdminResponse>>, MutationError> {
    request.validate()?;

    let repo = AdminRepository::new(state.pool.clone());
    if repo.find_by_email(&request.email).await?.is_some() {
        return Err(ApiError::Conflict("Admin with this email already exists".into()).into());
    }

    let password_hash = hash_password(&request.password).map_err(ApiError::from)?;
    let admin = repo
        .create(&request.name, &request.email, &password_hash)
        .await?;

    state.cache.invalidate(TAG);
    Ok(MutationSuccess::respond(AdminResponse::from(admin)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAdminRequest>,
) -> Result<Json<MutationSuccess<AdminResponse>>, MutationError> {
    request.validate()?;

    let repo = AdminRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(not_found)?;

    let password_hash = match &request.password {
        Some(password) => hash_password(password).map_err(ApiError::from)?,
        None => existing.password_hash.clone(),
    };
    let name = request.name.unwrap_or(existing.name);
    let email = request.email.unwrap_or(existing.email);

    let admin = repo.update(id, &name, &email, &password_hash).await?;

    state.cache.invalidate_all([TAG, id_tag(id).as_str()]);
    Ok(MutationSuccess::respond(AdminResponse::from(admin)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MutationSuccess<AdminResponse>>, MutationError> {
    let repo = AdminRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(not_found)?;

    if !repo.delete(id).await? {
        return Err(not_found().into());
    }

    state.cache.invalidate_all([TAG, id_tag(id).as_str()]);
    Ok(MutationSuccess::respond(AdminResponse::from(existing)))
}
