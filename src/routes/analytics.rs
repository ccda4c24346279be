use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    AppState,
    db::models::api::ApiResponse,
    error::AppError,
    services::AnalyticsService,
};

#[derive(Deserialize)]
pub struct AnalyticsQuery {
    pub cycle_id: Option<Uuid>,
}

pub async fn get_mentorship_progress(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let reports = AnalyticsService::mentorship_progress(&mut conn, query.cycle_id)?;
    Ok(Json(ApiResponse::success(
        reports,
        "Mentorship progress retrieved successfully",
    )))
}

pub async fn get_mentorship_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let summary = AnalyticsService::summary(&mut conn, query.cycle_id)?;
    Ok(Json(ApiResponse::success(
        summary,
        "Mentorship analytics retrieved successfully",
    )))
}
