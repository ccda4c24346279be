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
    db::models::api::ApiResponse,
    error::AppError,
    services::CyclesService,
    validation::ValidatedJson,
};

#[derive(Deserialize, Validate)]
pub struct CreateCycleRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    #[validate(range(min = 1))]
    pub max_mentorships: i32,
}

pub async fn create_cycle(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCycleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let cycle = CyclesService::create(&mut conn, &payload)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(cycle, "Cycle created successfully")),
    ))
}

pub async fn get_cycles(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let cycles = CyclesService::list(&mut conn)?;
    Ok(Json(ApiResponse::success(
        cycles,
        "Cycles retrieved successfully",
    )))
}

pub async fn get_cycle_by_id(
    State(state): State<AppState>,
    Path(cycle_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let cycle = CyclesService::get_by_id(&mut conn, cycle_id)?;
    Ok(Json(ApiResponse::success(
        cycle,
        "Cycle retrieved successfully",
    )))
}

/// UPCOMING -> ACTIVE plus the notification fan-out to interest holders.
pub async fn launch_cycle(
    State(state): State<AppState>,
    Path(cycle_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let cycle = CyclesService::launch(&mut conn, &state.notifier, cycle_id)?;
    Ok(Json(ApiResponse::success(
        cycle,
        "Cycle launched successfully",
    )))
}

pub async fn complete_cycle(
    State(state): State<AppState>,
    Path(cycle_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let cycle = CyclesService::complete(&mut conn, cycle_id)?;
    Ok(Json(ApiResponse::success(
        cycle,
        "Cycle completed successfully",
    )))
}

pub async fn delete_cycle(
    State(state): State<AppState>,
    Path(cycle_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    CyclesService::delete(&mut conn, cycle_id)?;
    Ok(Json(ApiResponse::<()>::ok("Cycle deleted successfully")))
}
