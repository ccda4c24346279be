use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Recomputable per-week summary of task completion. Unique per
/// (mentorship_id, week); recomputation replaces, never accumulates.
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::progress_snapshots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProgressSnapshot {
    pub id: Uuid,
    pub mentorship_id: Uuid,
    pub program_id: Uuid,
    pub week: i32,
    pub tasks_completed: i32,
    pub total_tasks: i32,
    pub engagement_score: i32,
    pub skill_improvement: i32,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::progress_snapshots)]
pub struct NewProgressSnapshot {
    pub mentorship_id: Uuid,
    pub program_id: Uuid,
    pub week: i32,
    pub tasks_completed: i32,
    pub total_tasks: i32,
    pub engagement_score: i32,
    pub skill_improvement: i32,
}
