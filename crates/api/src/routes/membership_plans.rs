//! Membership plan handlers. Reference data for the public membership page
//! and the application/renewal flows.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use domain::models::membership_plan::{
    CreateMembershipPlanRequest, ListMembershipPlansQuery, ListMembershipPlansResponse,
    MembershipPlan, UpdateMembershipPlanRequest,
};
use persistence::repositories::MembershipPlanRepository;
use shared::pagination::Pagination;

use crate::app::AppState;
use crate::error::{ApiError, MutationError, MutationSuccess};
use crate::routes::{cache_key, store_and_respond};

const TAG: &str = "membership-plans";

fn id_tag(id: i64) -> String {
    format!("membership-plan:{id}")
}

fn not_found() -> ApiError {
    ApiError::NotFound("Membership plan not found".into())
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListMembershipPlansQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let params = query.page_params();
    let key = cache_key(
        format!("membership-plans:list:p{}:l{}", params.page, params.limit),
        &[("search", query.search.clone())],
    );
    if let Some(hit) = state.cache.get(&key) {
        return Ok(Json(hit));
    }

    let repo = MembershipPlanRepository::new(state.pool.clone());
    let total = repo.count(&query).await?;
    let plans = repo.list(&query, params).await?;
    let response = ListMembershipPlansResponse {
        plans,
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

    let repo = MembershipPlanRepository::new(state.pool.clone());
    let plan = repo.find_by_id(id).await?.ok_or_else(not_found)?;
    store_and_respond(&state.cache, &key, &[TAG, &id_tag(id)], &plan)
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateMembershipPlanRequest>,
) -> Result<Json<MutationSuccess<MembershipPlan>>, MutationError> {
    request.validate()?;

    let repo = MembershipPlanRepository::new(state.pool.clone());
    let plan = repo
        .create(
            &request.name,
            request.description.as_deref(),
            request.amount,
            request.duration_value,
            request.duration_unit,
        )
        .await?;

    state.cache.invalidate(TAG);
    Ok(MutationSuccess::respond(plan))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMembershipPlanRequest>,
) -> Result<Json<MutationSuccess<MembershipPlan>>, MutationError> {
    request.validate()?;

    let repo = MembershipPlanRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(not_found)?;

    let name = request.name.unwrap_or(existing.name);
    let description = request.description.resolve(existing.description);
    let amount = request.amount.unwrap_or(existing.amount);
    let duration_value = request.duration_value.unwrap_or(existing.duration_value);
    let duration_unit = request.duration_unit.unwrap_or(existing.duration_unit);

    let plan = repo
        .update(
            id,
            &name,
            description.as_deref(),
            amount,
            duration_value,
            duration_unit,
        )
        .await?;

    state.cache.invalidate_all([TAG, id_tag(id).as_str()]);
    Ok(MutationSuccess::respond(plan))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MutationSuccess<MembershipPlan>>, MutationError> {
    let repo = MembershipPlanRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(not_found)?;

    if !repo.delete(id).await? {
        return Err(not_found().into());
    }

    state.cache.invalidate_all([TAG, id_tag(id).as_str()]);
    Ok(MutationSuccess::respond(existing))
}
