use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    AppState,
    db::models::api::ApiResponse,
    error::AppError,
    services::MatchesService,
};

#[derive(Deserialize)]
pub struct ApprovalRequest {
    pub actor_id: Uuid,
}

#[derive(Deserialize)]
pub struct BulkApprovalRequest {
    pub match_ids: Vec<Uuid>,
}

#[derive(Deserialize)]
pub struct MatchesQuery {
    pub cycle_id: Option<Uuid>,
}

/// One participant's approval; the transition to APPROVED happens on the
/// call that completes the pair.
pub async fn approve_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(payload): Json<ApprovalRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let outcome =
        MatchesService::approve(&mut conn, &state.notifier, match_id, payload.actor_id)?;
    Ok(Json(ApiResponse::success(
        outcome,
        "Match approval recorded successfully",
    )))
}

/// Bulk admin approval with per-id outcomes.
pub async fn approve_matches(
    State(state): State<AppState>,
    Json(payload): Json<BulkApprovalRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let results =
        MatchesService::approve_many(&mut conn, &state.notifier, &payload.match_ids)?;
    Ok(Json(ApiResponse::success(
        results,
        "Match approvals processed",
    )))
}

pub async fn reject_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(payload): Json<ApprovalRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let record = MatchesService::reject(&mut conn, &state.notifier, match_id, payload.actor_id)?;
    Ok(Json(ApiResponse::success(
        record,
        "Match rejected successfully",
    )))
}

pub async fn get_match_by_id(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let record = MatchesService::get_by_id(&mut conn, match_id)?;
    Ok(Json(ApiResponse::success(
        record,
        "Match retrieved successfully",
    )))
}

pub async fn get_matches(
    State(state): State<AppState>,
    Query(query): Query<MatchesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let records = MatchesService::list(&mut conn, query.cycle_id)?;
    Ok(Json(ApiResponse::success(
        records,
        "Matches retrieved successfully",
    )))
}
