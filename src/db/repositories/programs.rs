use diesel::prelude::*;

use crate::db::enums::ProgramStatus;
use crate::db::models::program::{NewProgram, Program};

pub struct ProgramsRepo;

impl ProgramsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_program: &NewProgram,
    ) -> Result<Program, diesel::result::Error> {
        diesel::insert_into(crate::schema::programs::table)
            .values(new_program)
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        program_id: uuid::Uuid,
    ) -> Result<Option<Program>, diesel::result::Error> {
        use crate::schema::programs::dsl::*;
        programs
            .filter(id.eq(program_id))
            .first::<Program>(conn)
            .optional()
    }

    pub fn find_by_mentorship(
        conn: &mut PgConnection,
        mentorship: uuid::Uuid,
    ) -> Result<Option<Program>, diesel::result::Error> {
        use crate::schema::programs::dsl::*;
        programs
            .filter(mentorship_id.eq(mentorship))
            .first::<Program>(conn)
            .optional()
    }

    /// Bumps the week counter. Conditional on ACTIVE so a completed
    /// program is left untouched (the caller treats None as the no-op).
    pub fn advance_week_if_active(
        conn: &mut PgConnection,
        program_id: uuid::Uuid,
    ) -> Result<Option<Program>, diesel::result::Error> {
        use crate::schema::programs::dsl as p;
        diesel::update(
            p::programs
                .filter(p::id.eq(program_id))
                .filter(p::status.eq(ProgramStatus::Active)),
        )
        .set(p::week.eq(p::week + 1))
        .get_result::<Program>(conn)
        .optional()
    }

    pub fn complete_active_for_mentorship(
        conn: &mut PgConnection,
        mentorship: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::programs::dsl as p;
        diesel::update(
            p::programs
                .filter(p::mentorship_id.eq(mentorship))
                .filter(p::status.eq(ProgramStatus::Active)),
        )
        .set((
            p::status.eq(ProgramStatus::Completed),
            p::completed_at.eq(chrono::Utc::now()),
        ))
        .execute(conn)
    }
}
