//! Activity handlers: public reads and admin CRUD.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use domain::models::activity::{
    Activity, CreateActivityRequest, ListActivitiesQuery, ListActivitiesResponse,
    UpdateActivityRequest,
};
use domain::models::Patch;
use domain::services::CleanupPolicy;
use persistence::repositories::ActivityRepository;
use shared::pagination::Pagination;

use crate::app::AppState;
use crate::error::{ApiError, MutationError, MutationSuccess};
use crate::routes::{cache_key, store_and_respond};
use crate::services::assets::{cleanup, media_folder, upload_payload};

const TAG: &str = "activities";
const FOLDER: &str = "activities";

fn id_tag(id: i64) -> String {
    format!("activity:{id}")
}

fn not_found() -> ApiError {
    ApiError::NotFound("Activity not found".into())
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListActivitiesQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let params = query.page_params();
    let key = cache_key(
        format!("activities:list:p{}:l{}", params.page, params.limit),
        &[
            ("search", query.search.clone()),
            ("category", query.category.clone()),
            ("from", query.from.map(|d| d.to_rfc3339())),
            ("to", query.to.map(|d| d.to_rfc3339())),
        ],
    );
    if let Some(hit) = state.cache.get(&key) {
        return Ok(Json(hit));
    }

    let repo = ActivityRepository::new(state.pool.clone());
    let total = repo.count(&query).await?;
    let activities = repo.list(&query, params).await?;
    let response = ListActivitiesResponse {
        activities,
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

    let repo = ActivityRepository::new(state.pool.clone());
    let activity = repo.find_by_id(id).await?.ok_or_else(not_found)?;
    store_and_respond(&state.cache, &key, &[TAG, &id_tag(id)], &activity)
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateActivityRequest>,
) -> Result<Json<MutationSuccess<Activity>>, MutationError> {
    request.validate()?;

    let image = match &request.image {
        Some(payload) => Some(
            upload_payload(
                state.media.as_ref(),
                payload,
                &media_folder(&state.config.media, FOLDER),
            )
            .await?,
        ),
        None => None,
    };

    let repo = ActivityRepository::new(state.pool.clone());
    let activity = repo
        .create(
            &request.title,
            &request.description,
            request.category.as_deref(),
            image.as_ref(),
        )
        .await?;

    state.cache.invalidate(TAG);
    Ok(MutationSuccess::respond(activity))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateActivityRequest>,
) -> Result<Json<MutationSuccess<Activity>>, MutationError> {
    request.validate()?;

    let repo = ActivityRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(not_found)?;

    let image = match request.image {
        Patch::Keep => existing.image.clone(),
        Patch::Clear => {
            if let Some(old) = &existing.image {
                cleanup(state.media.as_ref(), &old.public_id, CleanupPolicy::Continue).await?;
            }
            None
        }
        Patch::Set(payload) => {
            if let Some(old) = &existing.image {
                cleanup(state.media.as_ref(), &old.public_id, CleanupPolicy::Continue).await?;
            }
            Some(
                upload_payload(
                    state.media.as_ref(),
                    &payload,
                    &media_folder(&state.config.media, FOLDER),
                )
                .await?,
            )
        }
    };

    let title = request.title.unwrap_or(existing.title);
    let description = request.description.unwrap_or(existing.description);
    let category = request.category.resolve(existing.category);

    let activity = repo
        .update(id, &title, &description, category.as_deref(), image.as_ref())
        .await?;

    state.cache.invalidate_all([TAG, id_tag(id).as_str()]);
    Ok(MutationSuccess::respond(activity))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MutationSuccess<Activity>>, MutationError> {
    let repo = ActivityRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(not_found)?;

    if let Some(image) = &existing.image {
        cleanup(
            state.media.as_ref(),
            &image.public_id,
            CleanupPolicy::Continue,
        )
        .await?;
    }

    if !repo.delete(id).await? {
        return Err(not_found().into());
    }

    state.cache.invalidate_all([TAG, id_tag(id).as_str()]);
    Ok(MutationSuccess::respond(existing))
}
