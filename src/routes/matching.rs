use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    db::models::api::ApiResponse,
    error::AppError,
    services::MatchingService,
    services::matching_service::MatchingRunParams,
    validation::ValidatedJson,
};

#[derive(Deserialize, Validate)]
pub struct RunMatchingRequest {
    pub cycle_id: Uuid,
    #[validate(range(min = 0, max = 100))]
    pub min_score: Option<i32>,
    pub auto_approve: Option<bool>,
}

#[derive(Deserialize)]
pub struct AssignRequest {
    pub cycle_id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
}

#[derive(Deserialize)]
pub struct PoolQuery {
    pub cycle_id: Option<Uuid>,
}

/// Scored, capacity-respecting matching over the cycle's candidate pools.
pub async fn run_automated_matching(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RunMatchingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let params = MatchingRunParams {
        min_score: payload.min_score.unwrap_or(state.config.matching_min_score),
        auto_approve: payload.auto_approve.unwrap_or(false),
        max_assignments: state.config.matching_chunk_size,
    };
    let mut conn = state.db.get()?;
    let outcomes = MatchingService::run_automated_matching(
        &mut conn,
        &state.notifier,
        payload.cycle_id,
        &params,
    )?;
    Ok(Json(ApiResponse::success(
        outcomes,
        "Matching run finished successfully",
    )))
}

/// Direct assignment for admin tooling; capacity and uniqueness still hold.
pub async fn assign_manually(
    State(state): State<AppState>,
    Json(payload): Json<AssignRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let outcome = MatchingService::assign(
        &mut conn,
        &state.notifier,
        payload.cycle_id,
        payload.mentor_id,
        payload.mentee_id,
    )?;
    Ok(Json(ApiResponse::created(
        outcome,
        "Mentorship assigned successfully",
    )))
}

pub async fn get_available_pool(
    State(state): State<AppState>,
    Query(query): Query<PoolQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let pool = MatchingService::available(&mut conn, query.cycle_id)?;
    Ok(Json(ApiResponse::success(
        pool,
        "Available mentors and mentees retrieved successfully",
    )))
}
