use crate::db::enums::MatchStatus;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scored, approvable pairing of one mentor and one mentee within a
/// cycle. (cycle_id, mentor_id, mentee_id) is unique, which is what makes
/// repeated matching runs idempotent.
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::matches)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Match {
    pub id: Uuid,
    pub cycle_id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub match_score: i32,
    pub skill_match: i32,
    pub industry_relevance: i32,
    pub availability_match: i32,
    pub communication_match: i32,
    pub personality_fit: i32,
    pub status: MatchStatus,
    pub mentor_approved: bool,
    pub mentee_approved: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Match {
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.mentor_id == user_id || self.mentee_id == user_id
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::matches)]
pub struct NewMatch {
    pub cycle_id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub match_score: i32,
    pub skill_match: i32,
    pub industry_relevance: i32,
    pub availability_match: i32,
    pub communication_match: i32,
    pub personality_fit: i32,
    pub status: MatchStatus,
    pub mentor_approved: bool,
    pub mentee_approved: bool,
}

/// Result of one pair in a matching run: the row plus whether this run
/// created it or found it already present.
#[derive(Serialize, Clone, Debug)]
pub struct MatchOutcome {
    #[serde(flatten)]
    pub record: Match,
    pub created: bool,
}
