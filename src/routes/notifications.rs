use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    AppState,
    db::enums::InterestRole,
    db::models::api::ApiResponse,
    error::AppError,
    services::InterestsService,
};

#[derive(Deserialize)]
pub struct OnboardingRequest {
    pub target_role: InterestRole,
    pub cycle_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct OnboardingSummary {
    pub recipients: usize,
}

/// Queues onboarding notifications; delivery is asynchronous and
/// best-effort.
pub async fn send_onboarding(
    State(state): State<AppState>,
    Json(payload): Json<OnboardingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let recipients = InterestsService::send_onboarding_notifications(
        &mut conn,
        &state.notifier,
        payload.target_role,
        payload.cycle_id,
    )?;
    Ok(Json(ApiResponse::success(
        OnboardingSummary { recipients },
        "Onboarding notifications queued successfully",
    )))
}
