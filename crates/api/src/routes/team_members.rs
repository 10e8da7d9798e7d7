//! Team member handlers. Public team page plus admin CRUD; the photo is
//! optional and patchable.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use domain::models::team_member::{
    CreateTeamMemberRequest, ListTeamMembersQuery, ListTeamMembersResponse, TeamMember,
    UpdateTeamMemberRequest,
};
use domain::models::Patch;
use domain::services::CleanupPolicy;
use persistence::repositories::TeamMemberRepository;
use shared::pagination::Pagination;

use crate::app::AppState;
use crate::error::{ApiError, MutationError, MutationSuccess};
use crate::routes::{cache_key, store_and_respond};
use crate::services::assets::{cleanup, media_folder, upload_payload};

const TAG: &str = "team-members";
const FOLDER: &str = "team";

fn id_tag(id: i64) -> String {
    format!("team-member:{id}")
}

fn not_found() -> ApiError {
    ApiError::NotFound("Team member not found".into())
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListTeamMembersQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let params = query.page_params();
    let key = cache_key(
        format!("team-members:list:p{}:l{}", params.page, params.limit),
        &[("search", query.search.clone())],
    );
    if let Some(hit) = state.cache.get(&key) {
        return Ok(Json(hit));
    }

    let repo = TeamMemberRepository::new(state.pool.clone());
    let total = repo.count(&query).await?;
    let team_members = repo.list(&query, params).await?;
    let response = ListTeamMembersResponse {
        team_members,
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

    let repo = TeamMemberRepository::new(state.pool.clone());
    let member = repo.find_by_id(id).await?.ok_or_else(not_found)?;
    store_and_respond(&state.cache, &key, &[TAG, &id_tag(id)], &member)
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateTeamMemberRequest>,
) -> Result<Json<MutationSuccess<TeamMember>>, MutationError> {
    request.validate()?;

    let photo = match &request.photo {
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

    let repo = TeamMemberRepository::new(state.pool.clone());
    let member = repo
        .create(
            &request.name,
            &request.designation,
            photo.as_ref(),
            request.position,
        )
        .await?;

    state.cache.invalidate(TAG);
    Ok(MutationSuccess::respond(member))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTeamMemberRequest>,
) -> Result<Json<MutationSuccess<TeamMember>>, MutationError> {
    request.validate()?;

    let repo = TeamMemberRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(not_found)?;

    let photo = match request.photo {
        Patch::Keep => existing.photo.clone(),
        Patch::Clear => {
            if let Some(old) = &existing.photo {
                cleanup(state.media.as_ref(), &old.public_id, CleanupPolicy::Continue).await?;
            }
            None
        }
        Patch::Set(payload) => {
            if let Some(old) = &existing.photo {
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

    let name = request.name.unwrap_or(existing.name);
    let designation = request.designation.unwrap_or(existing.designation);
    let position = request.position.unwrap_or(existing.position);

    let member = repo
        .update(id, &name, &designation, photo.as_ref(), position)
        .await?;

    state.cache.invalidate_all([TAG, id_tag(id).as_str()]);
    Ok(MutationSuccess::respond(member))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MutationSuccess<TeamMember>>, MutationError> {
    let repo = TeamMemberRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(not_found)?;

    if let Some(photo) = &existing.photo {
        cleanup(
            state.media.as_ref(),
            &photo.public_id,
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
