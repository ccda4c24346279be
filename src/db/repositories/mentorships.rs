use diesel::prelude::*;

use crate::db::enums::MentorshipStatus;
use crate::db::models::mentorship::{Mentorship, NewMentorship};

pub struct MentorshipsRepo;

impl MentorshipsRepo {
    /// Inserting relies on the unique constraint on match_id; a concurrent
    /// duplicate surfaces as a UniqueViolation for the caller to map.
    pub fn insert(
        conn: &mut PgConnection,
        new_mentorship: &NewMentorship,
    ) -> Result<Mentorship, diesel::result::Error> {
        diesel::insert_into(crate::schema::mentorships::table)
            .values(new_mentorship)
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        mentorship_id: uuid::Uuid,
    ) -> Result<Option<Mentorship>, diesel::result::Error> {
        use crate::schema::mentorships::dsl::*;
        mentorships
            .filter(id.eq(mentorship_id))
            .first::<Mentorship>(conn)
            .optional()
    }

    pub fn list_by_cycle(
        conn: &mut PgConnection,
        cycle: uuid::Uuid,
    ) -> Result<Vec<Mentorship>, diesel::result::Error> {
        use crate::schema::mentorships::dsl::*;
        mentorships
            .filter(cycle_id.eq(cycle))
            .order(created_at.asc())
            .load::<Mentorship>(conn)
    }

    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<Mentorship>, diesel::result::Error> {
        use crate::schema::mentorships::dsl::*;
        mentorships.order(created_at.asc()).load::<Mentorship>(conn)
    }

    pub fn activate_if_pending(
        conn: &mut PgConnection,
        mentorship_id: uuid::Uuid,
    ) -> Result<Option<Mentorship>, diesel::result::Error> {
        use crate::schema::mentorships::dsl as m;
        let now = chrono::Utc::now();
        diesel::update(
            m::mentorships
                .filter(m::id.eq(mentorship_id))
                .filter(m::status.eq(MentorshipStatus::Pending)),
        )
        .set((
            m::status.eq(MentorshipStatus::Active),
            m::started_at.eq(now),
            m::updated_at.eq(now),
        ))
        .get_result::<Mentorship>(conn)
        .optional()
    }

    /// sessions_completed only ever increases, and only while ACTIVE.
    pub fn record_session_if_active(
        conn: &mut PgConnection,
        mentorship_id: uuid::Uuid,
    ) -> Result<Option<Mentorship>, diesel::result::Error> {
        use crate::schema::mentorships::dsl as m;
        diesel::update(
            m::mentorships
                .filter(m::id.eq(mentorship_id))
                .filter(m::status.eq(MentorshipStatus::Active)),
        )
        .set((
            m::sessions_completed.eq(m::sessions_completed + 1),
            m::updated_at.eq(chrono::Utc::now()),
        ))
        .get_result::<Mentorship>(conn)
        .optional()
    }

    pub fn complete_if_active(
        conn: &mut PgConnection,
        mentorship_id: uuid::Uuid,
        engagement: Option<f64>,
        satisfaction: Option<f64>,
    ) -> Result<Option<Mentorship>, diesel::result::Error> {
        use crate::schema::mentorships::dsl as m;
        let now = chrono::Utc::now();
        diesel::update(
            m::mentorships
                .filter(m::id.eq(mentorship_id))
                .filter(m::status.eq(MentorshipStatus::Active)),
        )
        .set((
            m::status.eq(MentorshipStatus::Completed),
            m::engagement_score.eq(engagement),
            m::satisfaction_score.eq(satisfaction),
            m::completed_at.eq(now),
            m::updated_at.eq(now),
        ))
        .get_result::<Mentorship>(conn)
        .optional()
    }

    pub fn cancel_if_open(
        conn: &mut PgConnection,
        mentorship_id: uuid::Uuid,
        reason: &str,
    ) -> Result<Option<Mentorship>, diesel::result::Error> {
        use crate::schema::mentorships::dsl as m;
        diesel::update(
            m::mentorships
                .filter(m::id.eq(mentorship_id))
                .filter(m::status.eq_any(vec![
                    MentorshipStatus::Pending,
                    MentorshipStatus::Active,
                ])),
        )
        .set((
            m::status.eq(MentorshipStatus::Cancelled),
            m::cancel_reason.eq(reason),
            m::updated_at.eq(chrono::Utc::now()),
        ))
        .get_result::<Mentorship>(conn)
        .optional()
    }

    /// certificate_id is write-once: the update only applies while the
    /// column is still NULL.
    pub fn link_certificate_once(
        conn: &mut PgConnection,
        mentorship_id: uuid::Uuid,
        certificate: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::mentorships::dsl as m;
        diesel::update(
            m::mentorships
                .filter(m::id.eq(mentorship_id))
                .filter(m::certificate_id.is_null()),
        )
        .set((
            m::certificate_id.eq(certificate),
            m::updated_at.eq(chrono::Utc::now()),
        ))
        .execute(conn)
    }
}
