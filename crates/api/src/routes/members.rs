//! Membership handlers.
//!
//! The public application form creates a member with a generated membership
//! number and an expiry derived from the chosen plan; renewal extends the
//! expiry from whichever is later, now or the current expiry. Admins list,
//! view and delete members.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use validator::Validate;

use domain::models::member::{
    ApplyMembershipRequest, ListMembersQuery, ListMembersResponse, Member, RenewMembershipRequest,
};
use persistence::repositories::{MemberRepository, MembershipPlanRepository};
use shared::membership::{expiry_from, generate_membership_no, renewal_expiry};
use shared::pagination::Pagination;

use crate::app::AppState;
use crate::error::{ApiError, MutationError, MutationSuccess};
use crate::routes::{cache_key, store_and_respond};

const TAG: &str = "members";

/// Collisions on the generated number are vanishingly rare; a couple of
/// retries is plenty.
const GENERATE_ATTEMPTS: usize = 3;

fn id_tag(id: i64) -> String {
    format!("member:{id}")
}

fn not_found() -> ApiError {
    ApiError::NotFound("Member not found".into())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListMembersQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let params = query.page_params();
    let key = cache_key(
        format!("members:list:p{}:l{}", params.page, params.limit),
        &[
            ("search", query.search.clone()),
            ("plan", query.plan_id.map(|id| id.to_string())),
        ],
    );
    if let Some(hit) = state.cache.get(&key) {
        return Ok(Json(hit));
    }

    let repo = MemberRepository::new(state.pool.clone());
    let total = repo.count(&query).await?;
    let members = repo.list(&query, params).await?;
    let response = ListMembersResponse {
        members,
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

    let repo = MemberRepository::new(state.pool.clone());
    let member = repo.find_by_id(id).await?.ok_or_else(not_found)?;
    store_and_respond(&state.cache, &key, &[TAG, &id_tag(id)], &member)
}

/// Public application form.
pub async fn apply(
    State(state): State<AppState>,
    Json(request): Json<ApplyMembershipRequest>,
) -> Result<Json<MutationSuccess<Member>>, MutationError> {
    request.validate()?;

    let plans = MembershipPlanRepository::new(state.pool.clone());
    let plan = plans
        .find_by_id(request.plan_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Membership plan not found".into()))?;

    let expires_at = expiry_from(Utc::now(), plan.duration_unit, plan.duration_value as u32);

    let repo = MemberRepository::new(state.pool.clone());
    let mut last_err = None;
    for _ in 0..GENERATE_ATTEMPTS {
        let membership_no = generate_membership_no();
        match repo
            .create(
                &membership_no,
                &request.name,
                &request.email,
                request.phone.as_deref(),
                plan.id,
                expires_at,
            )
            .await
        {
            Ok(member) => {
                state.cache.invalidate(TAG);
                return Ok(MutationSuccess::respond(member));
            }
            Err(err) if is_unique_violation(&err) => last_err = Some(err),
            Err(err) => return Err(ApiError::from(err).into()),
        }
    }

    tracing::error!("Membership number generation kept colliding");
    match last_err {
        Some(err) => Err(ApiError::from(err).into()),
        None => Err(ApiError::Internal("Could not allocate a membership number".into()).into()),
    }
}

/// Public renewal, addressed by membership number.
pub async fn renew(
    State(state): State<AppState>,
    Path(membership_no): Path<String>,
    Json(request): Json<RenewMembershipRequest>,
) -> Result<Json<MutationSuccess<Member>>, MutationError> {
    let repo = MemberRepository::new(state.pool.clone());
    let member = repo
        .find_by_membership_no(&membership_no)
        .await?
        .ok_or_else(not_found)?;

    let plan_id = request.plan_id.unwrap_or(member.plan_id);
    let plans = MembershipPlanRepository::new(state.pool.clone());
    let plan = plans
        .find_by_id(plan_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Membership plan not found".into()))?;

    let expires_at = renewal_expiry(
        Utc::now(),
        member.expires_at,
        plan.duration_unit,
        plan.duration_value as u32,
    );

    let renewed = repo.renew(member.id, plan.id, expires_at).await?;

    state.cache.invalidate_all([TAG, id_tag(member.id).as_str()]);
    Ok(MutationSuccess::respond(renewed))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MutationSuccess<Member>>, MutationError> {
    let repo = MemberRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(not_found)?;

    if !repo.delete(id).await? {
        return Err(not_found().into());
    }

    state.cache.invalidate_all([TAG, id_tag(id).as_str()]);
    Ok(MutationSuccess::respond(existing))
}
