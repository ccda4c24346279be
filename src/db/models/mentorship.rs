use crate::db::enums::MentorshipStatus;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The live relationship instantiated from an approved match. match_id is
/// unique, so a retried or concurrent approval can never create a second
/// mentorship for the same match.
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::mentorships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Mentorship {
    pub id: Uuid,
    pub match_id: Uuid,
    pub cycle_id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub status: MentorshipStatus,
    pub sessions_completed: i32,
    pub engagement_score: Option<f64>,
    pub satisfaction_score: Option<f64>,
    pub certificate_id: Option<Uuid>,
    pub cancel_reason: Option<String>,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::mentorships)]
pub struct NewMentorship {
    pub match_id: Uuid,
    pub cycle_id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub status: MentorshipStatus,
}
