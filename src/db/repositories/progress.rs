use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::db::models::progress::{NewProgressSnapshot, ProgressSnapshot};

pub struct ProgressRepo;

impl ProgressRepo {
    /// Replace-on-conflict upsert keyed by (mentorship_id, week).
    /// Recomputing a week any number of times leaves exactly the values of
    /// the last computation.
    pub fn upsert(
        conn: &mut PgConnection,
        snapshot: &NewProgressSnapshot,
    ) -> Result<ProgressSnapshot, diesel::result::Error> {
        use crate::schema::progress_snapshots::dsl as ps;
        diesel::insert_into(ps::progress_snapshots)
            .values(snapshot)
            .on_conflict((ps::mentorship_id, ps::week))
            .do_update()
            .set((
                ps::program_id.eq(excluded(ps::program_id)),
                ps::tasks_completed.eq(excluded(ps::tasks_completed)),
                ps::total_tasks.eq(excluded(ps::total_tasks)),
                ps::engagement_score.eq(excluded(ps::engagement_score)),
                ps::skill_improvement.eq(excluded(ps::skill_improvement)),
                ps::updated_at.eq(chrono::Utc::now()),
            ))
            .get_result(conn)
    }

    pub fn list_by_mentorship(
        conn: &mut PgConnection,
        mentorship: uuid::Uuid,
    ) -> Result<Vec<ProgressSnapshot>, diesel::result::Error> {
        use crate::schema::progress_snapshots::dsl::*;
        progress_snapshots
            .filter(mentorship_id.eq(mentorship))
            .order(week.asc())
            .load::<ProgressSnapshot>(conn)
    }

    pub fn latest_for_mentorship(
        conn: &mut PgConnection,
        mentorship: uuid::Uuid,
    ) -> Result<Option<ProgressSnapshot>, diesel::result::Error> {
        use crate::schema::progress_snapshots::dsl::*;
        progress_snapshots
            .filter(mentorship_id.eq(mentorship))
            .order(week.desc())
            .first::<ProgressSnapshot>(conn)
            .optional()
    }
}
