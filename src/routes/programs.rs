use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    db::enums::TaskKind,
    db::models::api::ApiResponse,
    error::AppError,
    services::ProgramsService,
    validation::ValidatedJson,
};

#[derive(Deserialize, Validate)]
pub struct CreateTaskRequest {
    pub kind: TaskKind,
    #[validate(length(min = 1, max = 512))]
    pub title: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct CompleteTaskRequest {
    pub feedback: Option<String>,
}

#[derive(Deserialize)]
pub struct RecomputeProgressRequest {
    pub week: i32,
}

pub async fn advance_week(
    State(state): State<AppState>,
    Path(program_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let program = ProgramsService::advance_week(&mut conn, &state.notifier, program_id)?;
    Ok(Json(ApiResponse::success(
        program,
        "Program week advanced successfully",
    )))
}

pub async fn create_task(
    State(state): State<AppState>,
    Path(program_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let task = ProgramsService::create_task(
        &mut conn,
        program_id,
        payload.kind,
        &payload.title,
        payload.description,
    )?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(task, "Task created successfully")),
    ))
}

pub async fn get_tasks(
    State(state): State<AppState>,
    Path(program_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let tasks = ProgramsService::list_tasks(&mut conn, program_id)?;
    Ok(Json(ApiResponse::success(
        tasks,
        "Tasks retrieved successfully",
    )))
}

pub async fn start_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let task = ProgramsService::start_task(&mut conn, task_id)?;
    Ok(Json(ApiResponse::success(
        task,
        "Task started successfully",
    )))
}

/// Idempotent: completing a completed task returns it unchanged.
pub async fn complete_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<CompleteTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let task = ProgramsService::complete_task(
        &mut conn,
        &state.notifier,
        task_id,
        payload.feedback.as_deref(),
    )?;
    Ok(Json(ApiResponse::success(
        task,
        "Task completed successfully",
    )))
}

/// Replaces the snapshot for the given week; safe to call repeatedly.
pub async fn recompute_progress(
    State(state): State<AppState>,
    Path(mentorship_id): Path<Uuid>,
    Json(payload): Json<RecomputeProgressRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let snapshot = ProgramsService::recompute_progress(&mut conn, mentorship_id, payload.week)?;
    Ok(Json(ApiResponse::success(
        snapshot,
        "Progress recomputed successfully",
    )))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Path(mentorship_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let snapshots = ProgramsService::list_progress(&mut conn, mentorship_id)?;
    Ok(Json(ApiResponse::success(
        snapshots,
        "Progress retrieved successfully",
    )))
}
