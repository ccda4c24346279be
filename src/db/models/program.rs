use crate::db::enums::ProgramStatus;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Week-indexed container of tasks for one mentorship. One row per
/// mentorship; `week` is the current week counter and only increases.
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::programs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Program {
    pub id: Uuid,
    pub mentorship_id: Uuid,
    pub cycle_id: Uuid,
    pub week: i32,
    pub status: ProgramStatus,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::programs)]
pub struct NewProgram {
    pub mentorship_id: Uuid,
    pub cycle_id: Uuid,
    pub week: i32,
    pub status: ProgramStatus,
}
