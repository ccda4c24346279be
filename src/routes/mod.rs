pub mod analytics;
pub mod cycles;
pub mod evaluations;
pub mod interests;
pub mod matches;
pub mod matching;
pub mod mentorships;
pub mod notifications;
pub mod programs;

use crate::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/cycles", post(cycles::create_cycle))
        .route("/cycles", get(cycles::get_cycles))
        .route("/cycles/:cycle_id", get(cycles::get_cycle_by_id))
        .route("/cycles/:cycle_id", delete(cycles::delete_cycle))
        .route("/cycles/:cycle_id/launch", post(cycles::launch_cycle))
        .route("/cycles/:cycle_id/complete", post(cycles::complete_cycle))
        .route("/interests", post(interests::register_interest))
        .route("/interests", get(interests::get_interests))
        .route(
            "/interests/:interest_id/withdraw",
            post(interests::withdraw_interest),
        )
        .route("/matching/pool", get(matching::get_available_pool))
        .route("/matching/run", post(matching::run_automated_matching))
        .route("/matching/assign", post(matching::assign_manually))
        .route("/matches", get(matches::get_matches))
        .route("/matches/approve", post(matches::approve_matches))
        .route("/matches/:match_id", get(matches::get_match_by_id))
        .route("/matches/:match_id/approve", post(matches::approve_match))
        .route("/matches/:match_id/reject", post(matches::reject_match))
        .route("/mentorships", get(mentorships::get_mentorships))
        .route(
            "/mentorships/:mentorship_id",
            get(mentorships::get_mentorship_by_id),
        )
        .route(
            "/mentorships/:mentorship_id/start",
            post(mentorships::start_mentorship),
        )
        .route(
            "/mentorships/:mentorship_id/complete",
            post(mentorships::complete_mentorship),
        )
        .route(
            "/mentorships/:mentorship_id/cancel",
            post(mentorships::cancel_mentorship),
        )
        .route(
            "/mentorships/:mentorship_id/sessions",
            post(mentorships::record_session),
        )
        .route(
            "/mentorships/:mentorship_id/progress",
            get(programs::get_progress),
        )
        .route(
            "/mentorships/:mentorship_id/progress/recompute",
            post(programs::recompute_progress),
        )
        .route(
            "/mentorships/:mentorship_id/evaluations",
            post(evaluations::submit_evaluation),
        )
        .route(
            "/mentorships/:mentorship_id/evaluations",
            get(evaluations::get_evaluations),
        )
        .route(
            "/mentorships/:mentorship_id/certificate",
            post(evaluations::issue_certificate),
        )
        .route(
            "/programs/:program_id/advance-week",
            post(programs::advance_week),
        )
        .route("/programs/:program_id/tasks", post(programs::create_task))
        .route("/programs/:program_id/tasks", get(programs::get_tasks))
        .route("/tasks/:task_id/start", post(programs::start_task))
        .route("/tasks/:task_id/complete", post(programs::complete_task))
        .route("/analytics/progress", get(analytics::get_mentorship_progress))
        .route("/analytics/summary", get(analytics::get_mentorship_analytics))
        .route(
            "/notifications/onboarding",
            post(notifications::send_onboarding),
        )
        .with_state(state)
}
