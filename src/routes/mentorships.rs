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
    services::MentorshipsService,
};

#[derive(Deserialize)]
pub struct CancelMentorshipRequest {
    pub reason: String,
}

#[derive(Deserialize)]
pub struct MentorshipsQuery {
    pub cycle_id: Option<Uuid>,
}

pub async fn get_mentorships(
    State(state): State<AppState>,
    Query(query): Query<MentorshipsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let mentorships = MentorshipsService::list(&mut conn, query.cycle_id)?;
    Ok(Json(ApiResponse::success(
        mentorships,
        "Mentorships retrieved successfully",
    )))
}

pub async fn get_mentorship_by_id(
    State(state): State<AppState>,
    Path(mentorship_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let mentorship = MentorshipsService::get_by_id(&mut conn, mentorship_id)?;
    Ok(Json(ApiResponse::success(
        mentorship,
        "Mentorship retrieved successfully",
    )))
}

pub async fn start_mentorship(
    State(state): State<AppState>,
    Path(mentorship_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let mentorship = MentorshipsService::start(&mut conn, &state.notifier, mentorship_id)?;
    Ok(Json(ApiResponse::success(
        mentorship,
        "Mentorship started successfully",
    )))
}

pub async fn complete_mentorship(
    State(state): State<AppState>,
    Path(mentorship_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let mentorship = MentorshipsService::complete(&mut conn, &state.notifier, mentorship_id)?;
    Ok(Json(ApiResponse::success(
        mentorship,
        "Mentorship completed successfully",
    )))
}

pub async fn cancel_mentorship(
    State(state): State<AppState>,
    Path(mentorship_id): Path<Uuid>,
    Json(payload): Json<CancelMentorshipRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let mentorship = MentorshipsService::cancel(
        &mut conn,
        &state.notifier,
        mentorship_id,
        &payload.reason,
    )?;
    Ok(Json(ApiResponse::success(
        mentorship,
        "Mentorship cancelled successfully",
    )))
}

pub async fn record_session(
    State(state): State<AppState>,
    Path(mentorship_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let mentorship = MentorshipsService::record_session(&mut conn, mentorship_id)?;
    Ok(Json(ApiResponse::success(
        mentorship,
        "Session recorded successfully",
    )))
}
