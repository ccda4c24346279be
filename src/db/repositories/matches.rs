use diesel::prelude::*;

use crate::db::enums::MatchStatus;
use crate::db::models::matches::{Match, NewMatch};

pub struct MatchesRepo;

impl MatchesRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_match: &NewMatch,
    ) -> Result<Match, diesel::result::Error> {
        diesel::insert_into(crate::schema::matches::table)
            .values(new_match)
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        match_id: uuid::Uuid,
    ) -> Result<Option<Match>, diesel::result::Error> {
        use crate::schema::matches::dsl::*;
        matches
            .filter(id.eq(match_id))
            .first::<Match>(conn)
            .optional()
    }

    /// The idempotence lookup: at most one row exists per
    /// (cycle, mentor, mentee).
    pub fn find_by_pair(
        conn: &mut PgConnection,
        cycle: uuid::Uuid,
        mentor: uuid::Uuid,
        mentee: uuid::Uuid,
    ) -> Result<Option<Match>, diesel::result::Error> {
        use crate::schema::matches::dsl::*;
        matches
            .filter(cycle_id.eq(cycle))
            .filter(mentor_id.eq(mentor))
            .filter(mentee_id.eq(mentee))
            .first::<Match>(conn)
            .optional()
    }

    pub fn list_by_cycle(
        conn: &mut PgConnection,
        cycle: uuid::Uuid,
    ) -> Result<Vec<Match>, diesel::result::Error> {
        use crate::schema::matches::dsl::*;
        matches
            .filter(cycle_id.eq(cycle))
            .order(created_at.asc())
            .load::<Match>(conn)
    }

    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<Match>, diesel::result::Error> {
        use crate::schema::matches::dsl::*;
        matches.order(created_at.asc()).load::<Match>(conn)
    }

    /// Mentees already holding a pending or approved match in the cycle;
    /// they are excluded from further candidate generation.
    pub fn engaged_mentee_ids(
        conn: &mut PgConnection,
        cycle: uuid::Uuid,
    ) -> Result<Vec<uuid::Uuid>, diesel::result::Error> {
        use crate::schema::matches::dsl::*;
        matches
            .filter(cycle_id.eq(cycle))
            .filter(status.ne(MatchStatus::Rejected))
            .select(mentee_id)
            .load::<uuid::Uuid>(conn)
    }

    /// Mentor+mentee pairs that were already scored and rejected in this
    /// cycle; re-runs must not re-propose them.
    pub fn rejected_pairs(
        conn: &mut PgConnection,
        cycle: uuid::Uuid,
    ) -> Result<Vec<(uuid::Uuid, uuid::Uuid)>, diesel::result::Error> {
        use crate::schema::matches::dsl::*;
        matches
            .filter(cycle_id.eq(cycle))
            .filter(status.eq(MatchStatus::Rejected))
            .select((mentor_id, mentee_id))
            .load::<(uuid::Uuid, uuid::Uuid)>(conn)
    }

    pub fn count_open_by_cycle(
        conn: &mut PgConnection,
        cycle: uuid::Uuid,
    ) -> Result<i64, diesel::result::Error> {
        use crate::schema::matches::dsl::*;
        matches
            .filter(cycle_id.eq(cycle))
            .filter(status.ne(MatchStatus::Rejected))
            .count()
            .get_result::<i64>(conn)
    }

    pub fn count_by_cycle(
        conn: &mut PgConnection,
        cycle: uuid::Uuid,
    ) -> Result<i64, diesel::result::Error> {
        use crate::schema::matches::dsl::*;
        matches.filter(cycle_id.eq(cycle)).count().get_result::<i64>(conn)
    }

    pub fn set_approval_flag(
        conn: &mut PgConnection,
        match_id: uuid::Uuid,
        approving_as_mentor: bool,
    ) -> Result<Match, diesel::result::Error> {
        use crate::schema::matches::dsl as m;
        if approving_as_mentor {
            diesel::update(m::matches.filter(m::id.eq(match_id)))
                .set((
                    m::mentor_approved.eq(true),
                    m::updated_at.eq(chrono::Utc::now()),
                ))
                .get_result::<Match>(conn)
        } else {
            diesel::update(m::matches.filter(m::id.eq(match_id)))
                .set((
                    m::mentee_approved.eq(true),
                    m::updated_at.eq(chrono::Utc::now()),
                ))
                .get_result::<Match>(conn)
        }
    }

    /// The PENDING -> APPROVED transition. Conditional on both approval
    /// flags so that of two concurrent approvals exactly one observes the
    /// transition and instantiates the mentorship.
    pub fn promote_if_both_approved(
        conn: &mut PgConnection,
        match_id: uuid::Uuid,
    ) -> Result<Option<Match>, diesel::result::Error> {
        use crate::schema::matches::dsl as m;
        diesel::update(
            m::matches
                .filter(m::id.eq(match_id))
                .filter(m::status.eq(MatchStatus::Pending))
                .filter(m::mentor_approved.eq(true))
                .filter(m::mentee_approved.eq(true)),
        )
        .set((
            m::status.eq(MatchStatus::Approved),
            m::updated_at.eq(chrono::Utc::now()),
        ))
        .get_result::<Match>(conn)
        .optional()
    }

    pub fn reject_if_pending(
        conn: &mut PgConnection,
        match_id: uuid::Uuid,
    ) -> Result<Option<Match>, diesel::result::Error> {
        use crate::schema::matches::dsl as m;
        diesel::update(
            m::matches
                .filter(m::id.eq(match_id))
                .filter(m::status.eq(MatchStatus::Pending)),
        )
        .set((
            m::status.eq(MatchStatus::Rejected),
            m::updated_at.eq(chrono::Utc::now()),
        ))
        .get_result::<Match>(conn)
        .optional()
    }
}
