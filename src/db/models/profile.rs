use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mentor capability record, maintained by the surrounding platform. The
/// engine reads it and owns only the `current_mentees` counter, which moves
/// transactionally with match creation and release.
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::mentor_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MentorProfile {
    pub user_id: Uuid,
    pub max_mentees: i32,
    pub current_mentees: i32,
    pub themes: Vec<String>,
    pub industries: Vec<String>,
    pub weekly_availability: Vec<String>,
    pub preferred_styles: Vec<String>,
    pub personality_traits: Vec<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl MentorProfile {
    pub fn remaining_capacity(&self) -> i32 {
        (self.max_mentees - self.current_mentees).max(0)
    }
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::mentee_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MenteeProfile {
    pub user_id: Uuid,
    pub field_of_interest: String,
    pub goals: Vec<String>,
    pub skills: Vec<String>,
    pub experience_level: String,
    pub availability: Vec<String>,
    pub preferred_styles: Vec<String>,
    pub personality_traits: Vec<String>,
    pub commitment_agreed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
