use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    AppState,
    db::enums::InterestRole,
    db::models::api::ApiResponse,
    error::AppError,
    services::InterestsService,
};

#[derive(Deserialize)]
pub struct RegisterInterestRequest {
    pub cycle_id: Uuid,
    pub user_id: Uuid,
    pub role: InterestRole,
}

#[derive(Deserialize)]
pub struct InterestsQuery {
    pub cycle_id: Uuid,
}

pub async fn register_interest(
    State(state): State<AppState>,
    Json(payload): Json<RegisterInterestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let interest = InterestsService::register(
        &mut conn,
        payload.cycle_id,
        payload.user_id,
        payload.role,
    )?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(interest, "Interest registered successfully")),
    ))
}

pub async fn get_interests(
    State(state): State<AppState>,
    Query(query): Query<InterestsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let interests = InterestsService::list_by_cycle(&mut conn, query.cycle_id)?;
    Ok(Json(ApiResponse::success(
        interests,
        "Interests retrieved successfully",
    )))
}

pub async fn withdraw_interest(
    State(state): State<AppState>,
    Path(interest_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let interest = InterestsService::withdraw(&mut conn, interest_id)?;
    Ok(Json(ApiResponse::success(
        interest,
        "Interest withdrawn successfully",
    )))
}
