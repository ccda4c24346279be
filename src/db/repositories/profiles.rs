use diesel::prelude::*;

use crate::db::models::profile::{MenteeProfile, MentorProfile};

pub struct ProfilesRepo;

impl ProfilesRepo {
    pub fn find_mentor(
        conn: &mut PgConnection,
        user: uuid::Uuid,
    ) -> Result<Option<MentorProfile>, diesel::result::Error> {
        use crate::schema::mentor_profiles::dsl::*;
        mentor_profiles
            .filter(user_id.eq(user))
            .first::<MentorProfile>(conn)
            .optional()
    }

    pub fn find_mentee(
        conn: &mut PgConnection,
        user: uuid::Uuid,
    ) -> Result<Option<MenteeProfile>, diesel::result::Error> {
        use crate::schema::mentee_profiles::dsl::*;
        mentee_profiles
            .filter(user_id.eq(user))
            .first::<MenteeProfile>(conn)
            .optional()
    }

    /// Eligible mentors: active, verified, spare capacity, not disqualified
    /// for the cycle. Ordered by user_id so candidate generation is
    /// deterministic across runs.
    pub fn mentor_pool(
        conn: &mut PgConnection,
        excluded: &[uuid::Uuid],
    ) -> Result<Vec<MentorProfile>, diesel::result::Error> {
        use crate::schema::mentor_profiles::dsl::*;
        mentor_profiles
            .filter(is_active.eq(true))
            .filter(is_verified.eq(true))
            .filter(current_mentees.lt(max_mentees))
            .filter(user_id.ne_all(excluded))
            .order(user_id.asc())
            .load::<MentorProfile>(conn)
    }

    pub fn mentee_pool(
        conn: &mut PgConnection,
        excluded: &[uuid::Uuid],
    ) -> Result<Vec<MenteeProfile>, diesel::result::Error> {
        use crate::schema::mentee_profiles::dsl::*;
        mentee_profiles
            .filter(commitment_agreed.eq(true))
            .filter(user_id.ne_all(excluded))
            .order(user_id.asc())
            .load::<MenteeProfile>(conn)
    }

    pub fn list_active_mentors(
        conn: &mut PgConnection,
    ) -> Result<Vec<MentorProfile>, diesel::result::Error> {
        use crate::schema::mentor_profiles::dsl::*;
        mentor_profiles
            .filter(is_active.eq(true))
            .order(user_id.asc())
            .load::<MentorProfile>(conn)
    }

    pub fn list_committed_mentees(
        conn: &mut PgConnection,
    ) -> Result<Vec<MenteeProfile>, diesel::result::Error> {
        use crate::schema::mentee_profiles::dsl::*;
        mentee_profiles
            .filter(commitment_agreed.eq(true))
            .order(user_id.asc())
            .load::<MenteeProfile>(conn)
    }

    /// Capacity reservation: bumps `current_mentees` only while it is below
    /// `max_mentees`, in one conditional UPDATE. Returns false when the
    /// mentor is unknown or already full, so a concurrent run that lost the
    /// race simply skips the pair. Must run inside the same transaction as
    /// the match/assignment row it backs.
    pub fn reserve_slot(
        conn: &mut PgConnection,
        mentor: uuid::Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::mentor_profiles::dsl as mp;
        let updated = diesel::update(
            mp::mentor_profiles
                .filter(mp::user_id.eq(mentor))
                .filter(mp::current_mentees.lt(mp::max_mentees)),
        )
        .set((
            mp::current_mentees.eq(mp::current_mentees + 1),
            mp::updated_at.eq(chrono::Utc::now()),
        ))
        .execute(conn)?;
        Ok(updated == 1)
    }

    /// Releases a slot reserved by `reserve_slot`. The counter never drops
    /// below zero.
    pub fn release_slot(
        conn: &mut PgConnection,
        mentor: uuid::Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::mentor_profiles::dsl as mp;
        let updated = diesel::update(
            mp::mentor_profiles
                .filter(mp::user_id.eq(mentor))
                .filter(mp::current_mentees.gt(0)),
        )
        .set((
            mp::current_mentees.eq(mp::current_mentees - 1),
            mp::updated_at.eq(chrono::Utc::now()),
        ))
        .execute(conn)?;
        Ok(updated == 1)
    }
}
