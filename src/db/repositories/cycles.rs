use diesel::prelude::*;

use crate::db::enums::CycleStatus;
use crate::db::models::cycle::{Cycle, NewCycle};

pub struct CyclesRepo;

impl CyclesRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_cycle: &NewCycle,
    ) -> Result<Cycle, diesel::result::Error> {
        diesel::insert_into(crate::schema::cycles::table)
            .values(new_cycle)
            .get_result(conn)
    }

    pub fn list(conn: &mut PgConnection) -> Result<Vec<Cycle>, diesel::result::Error> {
        use crate::schema::cycles::dsl::*;
        cycles.order(start_date.desc()).load::<Cycle>(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        cycle_id: uuid::Uuid,
    ) -> Result<Option<Cycle>, diesel::result::Error> {
        use crate::schema::cycles::dsl::*;
        cycles
            .filter(id.eq(cycle_id))
            .first::<Cycle>(conn)
            .optional()
    }

    /// UPCOMING -> ACTIVE, applied as a conditional update. Returns None
    /// when the cycle is not in UPCOMING (already launched or completed).
    pub fn launch_if_upcoming(
        conn: &mut PgConnection,
        cycle_id: uuid::Uuid,
    ) -> Result<Option<Cycle>, diesel::result::Error> {
        use crate::schema::cycles::dsl as c;
        diesel::update(
            c::cycles
                .filter(c::id.eq(cycle_id))
                .filter(c::status.eq(CycleStatus::Upcoming)),
        )
        .set((
            c::status.eq(CycleStatus::Active),
            c::updated_at.eq(chrono::Utc::now()),
        ))
        .get_result::<Cycle>(conn)
        .optional()
    }

    /// ACTIVE -> COMPLETED, conditional as above.
    pub fn complete_if_active(
        conn: &mut PgConnection,
        cycle_id: uuid::Uuid,
    ) -> Result<Option<Cycle>, diesel::result::Error> {
        use crate::schema::cycles::dsl as c;
        diesel::update(
            c::cycles
                .filter(c::id.eq(cycle_id))
                .filter(c::status.eq(CycleStatus::Active)),
        )
        .set((
            c::status.eq(CycleStatus::Completed),
            c::updated_at.eq(chrono::Utc::now()),
        ))
        .get_result::<Cycle>(conn)
        .optional()
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        cycle_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::cycles::dsl::*;
        diesel::delete(cycles.filter(id.eq(cycle_id))).execute(conn)
    }
}
