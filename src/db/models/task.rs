use crate::db::enums::{TaskKind, TaskStatus};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Task {
    pub id: Uuid,
    pub program_id: Uuid,
    pub mentorship_id: Uuid,
    pub week: i32,
    pub kind: TaskKind,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub feedback: Option<String>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTask {
    pub program_id: Uuid,
    pub mentorship_id: Uuid,
    pub week: i32,
    pub kind: TaskKind,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}
