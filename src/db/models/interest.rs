use crate::db::enums::{InterestRole, InterestStatus};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's declared intent to participate in a cycle. Creates no
/// obligations; it only feeds the matching candidate pool.
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::interests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Interest {
    pub id: Uuid,
    pub cycle_id: Uuid,
    pub user_id: Uuid,
    pub role: InterestRole,
    pub status: InterestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::interests)]
pub struct NewInterest {
    pub cycle_id: Uuid,
    pub user_id: Uuid,
    pub role: InterestRole,
    pub status: InterestStatus,
}
