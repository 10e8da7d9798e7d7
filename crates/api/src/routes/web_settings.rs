//! Web setting handlers.
//!
//! The public site reads the whole relation as one key→value map; admins
//! manage individual keys. Upsert doubles as create.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use domain::models::web_setting::{
    settings_map, ListWebSettingsQuery, ListWebSettingsResponse, UpsertWebSettingRequest,
    WebSetting,
};
use persistence::repositories::WebSettingRepository;
use shared::pagination::Pagination;

use crate::app::AppState;
use crate::error::{ApiError, MutationError, MutationSuccess};
use crate::routes::{cache_key, store_and_respond};

const TAG: &str = "web-settings";

fn key_tag(key: &str) -> String {
    format!("web-setting:{key}")
}

fn not_found() -> ApiError {
    ApiError::NotFound("Setting not found".into())
}

/// Public read: every setting reduced to a key→value map.
pub async fn map(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let key = "web-settings:map";
    if let Some(hit) = state.cache.get(key) {
        return Ok(Json(hit));
    }

    let repo = WebSettingRepository::new(state.pool.clone());
    let settings = repo.get_all().await?;
    store_and_respond(&state.cache, key, &[TAG], &settings_map(settings))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListWebSettingsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let params = query.page_params();
    let key = cache_key(
        format!("web-settings:list:p{}:l{}", params.page, params.limit),
        &[("search", query.search.clone())],
    );
    if let Some(hit) = state.cache.get(&key) {
        return Ok(Json(hit));
    }

    let repo = WebSettingRepository::new(state.pool.clone());
    let total = repo.count(&query).await?;
    let settings = repo.list(&query, params).await?;
    let response = ListWebSettingsResponse {
        settings,
        pagination: Pagination::new(total, params),
    };
    store_and_respond(&state.cache, &key, &[TAG], &response)
}

pub async fn get(
    State(state): State<AppState>,
    Path(setting_key): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let key = key_tag(&setting_key);
    if let Some(hit) = state.cache.get(&key) {
        return Ok(Json(hit));
    }

    let repo = WebSettingRepository::new(state.pool.clone());
    let setting = repo
        .find_by_key(&setting_key)
        .await?
        .ok_or_else(not_found)?;
    store_and_respond(&state.cache, &key, &[TAG, &key_tag(&setting_key)], &setting)
}

pub async fn upsert(
    State(state): State<AppState>,
    Path(setting_key): Path<String>,
    Json(request): Json<UpsertWebSettingRequest>,
) -> Result<Json<MutationSuccess<WebSetting>>, MutationError> {
    request.validate()?;

    let repo = WebSettingRepository::new(state.pool.clone());
    let setting = repo.upsert(&setting_key, &request.value).await?;

    state
        .cache
        .invalidate_all([TAG, key_tag(&setting_key).as_str()]);
    Ok(MutationSuccess::respond(setting))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(setting_key): Path<String>,
) -> Result<Json<MutationSuccess<WebSetting>>, MutationError> {
    let repo = WebSettingRepository::new(state.pool.clone());
    let existing = repo
        .find_by_key(&setting_key)
        .await?
        .ok_or_else(not_found)?;

    if !repo.delete(&setting_key).await? {
        return Err(not_found().into());
    }

    state
        .cache
        .invalidate_all([TAG, key_tag(&setting_key).as_str()]);
    Ok(MutationSuccess::respond(existing))
}
