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
    db::enums::EvaluationKind,
    db::models::api::ApiResponse,
    error::AppError,
    services::EvaluationsService,
    validation::ValidatedJson,
};

#[derive(Deserialize, Validate)]
pub struct SubmitEvaluationRequest {
    pub kind: EvaluationKind,
    pub evaluator_id: Uuid,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(range(min = 1, max = 5))]
    pub communication_rating: i32,
    #[validate(range(min = 1, max = 5))]
    pub helpfulness_rating: i32,
    pub feedback: Option<String>,
}

pub async fn submit_evaluation(
    State(state): State<AppState>,
    Path(mentorship_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<SubmitEvaluationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let evaluation =
        EvaluationsService::submit(&mut conn, &state.notifier, mentorship_id, &payload)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(
            evaluation,
            "Evaluation submitted successfully",
        )),
    ))
}

pub async fn get_evaluations(
    State(state): State<AppState>,
    Path(mentorship_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let evaluations = EvaluationsService::list_by_mentorship(&mut conn, mentorship_id)?;
    Ok(Json(ApiResponse::success(
        evaluations,
        "Evaluations retrieved successfully",
    )))
}

/// COMPLETED mentorships only, at most once.
pub async fn issue_certificate(
    State(state): State<AppState>,
    Path(mentorship_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let certificate =
        EvaluationsService::issue_certificate(&mut conn, &state.notifier, mentorship_id)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(
            certificate,
            "Certificate issued successfully",
        )),
    ))
}
