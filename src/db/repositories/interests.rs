use diesel::prelude::*;

use crate::db::enums::{InterestRole, InterestStatus};
use crate::db::models::interest::{Interest, NewInterest};

pub struct InterestsRepo;

impl InterestsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_interest: &NewInterest,
    ) -> Result<Interest, diesel::result::Error> {
        diesel::insert_into(crate::schema::interests::table)
            .values(new_interest)
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        interest_id: uuid::Uuid,
    ) -> Result<Option<Interest>, diesel::result::Error> {
        use crate::schema::interests::dsl::*;
        interests
            .filter(id.eq(interest_id))
            .first::<Interest>(conn)
            .optional()
    }

    pub fn find_by_cycle_and_user(
        conn: &mut PgConnection,
        cycle: uuid::Uuid,
        user: uuid::Uuid,
    ) -> Result<Option<Interest>, diesel::result::Error> {
        use crate::schema::interests::dsl::*;
        interests
            .filter(cycle_id.eq(cycle))
            .filter(user_id.eq(user))
            .first::<Interest>(conn)
            .optional()
    }

    pub fn list_interested_by_cycle(
        conn: &mut PgConnection,
        cycle: uuid::Uuid,
    ) -> Result<Vec<Interest>, diesel::result::Error> {
        use crate::schema::interests::dsl::*;
        interests
            .filter(cycle_id.eq(cycle))
            .filter(status.eq(InterestStatus::Interested))
            .order(created_at.asc())
            .load::<Interest>(conn)
    }

    pub fn list_interested_by_cycle_and_role(
        conn: &mut PgConnection,
        cycle: uuid::Uuid,
        role_val: InterestRole,
    ) -> Result<Vec<Interest>, diesel::result::Error> {
        use crate::schema::interests::dsl::*;
        interests
            .filter(cycle_id.eq(cycle))
            .filter(role.eq(role_val))
            .filter(status.eq(InterestStatus::Interested))
            .order(created_at.asc())
            .load::<Interest>(conn)
    }

    /// Users with an interest row for this cycle that does NOT qualify them
    /// for `role_val`: either a different role, or a withdrawn declaration.
    /// Profiles without any interest row stay in the standing pool.
    pub fn disqualified_user_ids(
        conn: &mut PgConnection,
        cycle: uuid::Uuid,
        role_val: InterestRole,
    ) -> Result<Vec<uuid::Uuid>, diesel::result::Error> {
        use crate::schema::interests::dsl::*;
        interests
            .filter(cycle_id.eq(cycle))
            .filter(
                role.ne(role_val)
                    .or(status.eq(InterestStatus::Withdrawn)),
            )
            .select(user_id)
            .load::<uuid::Uuid>(conn)
    }

    /// Flips a withdrawn declaration back to interested, possibly under a
    /// new role.
    pub fn renew(
        conn: &mut PgConnection,
        interest_id: uuid::Uuid,
        role_val: InterestRole,
    ) -> Result<Interest, diesel::result::Error> {
        use crate::schema::interests::dsl as i;
        diesel::update(i::interests.filter(i::id.eq(interest_id)))
            .set((
                i::status.eq(InterestStatus::Interested),
                i::role.eq(role_val),
            ))
            .get_result::<Interest>(conn)
    }

    pub fn withdraw_if_interested(
        conn: &mut PgConnection,
        interest_id: uuid::Uuid,
    ) -> Result<Option<Interest>, diesel::result::Error> {
        use crate::schema::interests::dsl as i;
        diesel::update(
            i::interests
                .filter(i::id.eq(interest_id))
                .filter(i::status.eq(InterestStatus::Interested)),
        )
        .set(i::status.eq(InterestStatus::Withdrawn))
        .get_result::<Interest>(conn)
        .optional()
    }
}
