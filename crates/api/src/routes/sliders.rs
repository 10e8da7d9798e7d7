//! Slider handlers. Home-page carousel; the image is mandatory, so updates
//! can only replace it, never clear it.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use domain::models::slider::{
    CreateSliderRequest, ListSlidersQuery, ListSlidersResponse, Slider, UpdateSliderRequest,
};
use domain::services::CleanupPolicy;
use persistence::repositories::SliderRepository;
use shared::pagination::Pagination;

use crate::app::AppState;
use crate::error::{ApiError, MutationError, MutationSuccess};
use crate::routes::{cache_key, store_and_respond};
use crate::services::assets::{cleanup, media_folder, upload_payload};

const TAG: &str = "sliders";
const FOLDER: &str = "sliders";

fn id_tag(id: i64) -> String {
    format!("slider:{id}")
}

fn not_found() -> ApiError {
    ApiError::NotFound("Slider not found".into())
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListSlidersQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let params = query.page_params();
    let key = cache_key(
        format!("sliders:list:p{}:l{}", params.page, params.limit),
        &[
            ("search", query.search.clone()),
            ("active", query.active.map(|a| a.to_string())),
        ],
    );
    if let Some(hit) = state.cache.get(&key) {
        return Ok(Json(hit));
    }

    let repo = SliderRepository::new(state.pool.clone());
    let total = repo.count(&query).await?;
    let sliders = repo.list(&query, params).await?;
    let response = ListSlidersResponse {
        sliders,
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

    let repo = SliderRepository::new(state.pool.clone());
    let slider = repo.find_by_id(id).await?.ok_or_else(not_found)?;
    store_and_respond(&state.cache, &key, &[TAG, &id_tag(id)], &slider)
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateSliderRequest>,
) -> Result<Json<MutationSuccess<Slider>>, MutationError> {
    request.validate()?;

    let payload = request
        .image
        .as_ref()
        .ok_or_else(|| ApiError::Validation("Slider image is required".into()))?;

    let image = upload_payload(
        state.media.as_ref(),
        payload,
        &media_folder(&state.config.media, FOLDER),
    )
    .await?;

    let repo = SliderRepository::new(state.pool.clone());
    let slider = repo
        .create(
            request.title.as_deref(),
            &image,
            request.position,
            request.active,
        )
        .await?;

    state.cache.invalidate(TAG);
    Ok(MutationSuccess::respond(slider))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateSliderRequest>,
) -> Result<Json<MutationSuccess<Slider>>, MutationError> {
    request.validate()?;

    let repo = SliderRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(not_found)?;

    let image = match &request.image {
        Some(payload) => {
            cleanup(
                state.media.as_ref(),
                &existing.image.public_id,
                CleanupPolicy::Continue,
            )
            .await?;
            upload_payload(
                state.media.as_ref(),
                payload,
                &media_folder(&state.config.media, FOLDER),
            )
            .await?
        }
        None => existing.image.clone(),
    };

    let title = request.title.resolve(existing.title);
    let position = request.position.unwrap_or(existing.position);
    let active = request.active.unwrap_or(existing.active);

    let slider = repo
        .update(id, title.as_deref(), &image, position, active)
        .await?;

    state.cache.invalidate_all([TAG, id_tag(id).as_str()]);
    Ok(MutationSuccess::respond(slider))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MutationSuccess<Slider>>, MutationError> {
    let repo = SliderRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(not_found)?;

    cleanup(
        state.media.as_ref(),
        &existing.image.public_id,
        CleanupPolicy::Continue,
    )
    .await?;

    if !repo.delete(id).await? {
        return Err(not_found().into());
    }

    state.cache.invalidate_all([TAG, id_tag(id).as_str()]);
    Ok(MutationSuccess::respond(existing))
}
