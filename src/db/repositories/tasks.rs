use diesel::prelude::*;

use crate::db::enums::TaskStatus;
use crate::db::models::task::{NewTask, Task};

pub struct TasksRepo;

impl TasksRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_task: &NewTask,
    ) -> Result<Task, diesel::result::Error> {
        diesel::insert_into(crate::schema::tasks::table)
            .values(new_task)
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        task_id: uuid::Uuid,
    ) -> Result<Option<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        tasks.filter(id.eq(task_id)).first::<Task>(conn).optional()
    }

    pub fn list_for_week(
        conn: &mut PgConnection,
        mentorship: uuid::Uuid,
        week_val: i32,
    ) -> Result<Vec<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        tasks
            .filter(mentorship_id.eq(mentorship))
            .filter(week.eq(week_val))
            .order(created_at.asc())
            .load::<Task>(conn)
    }

    pub fn list_by_program(
        conn: &mut PgConnection,
        program: uuid::Uuid,
    ) -> Result<Vec<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        tasks
            .filter(program_id.eq(program))
            .order((week.asc(), created_at.asc()))
            .load::<Task>(conn)
    }

    pub fn start_if_pending(
        conn: &mut PgConnection,
        task_id: uuid::Uuid,
    ) -> Result<Option<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl as t;
        diesel::update(
            t::tasks
                .filter(t::id.eq(task_id))
                .filter(t::status.eq(TaskStatus::Pending)),
        )
        .set(t::status.eq(TaskStatus::InProgress))
        .get_result::<Task>(conn)
        .optional()
    }

    /// One-way completion: stamps completed_at on the transition and only
    /// on the transition. Returns None when the task was already
    /// COMPLETED (or does not exist); the caller decides which.
    pub fn complete_if_open(
        conn: &mut PgConnection,
        task_id: uuid::Uuid,
        feedback_val: Option<&str>,
    ) -> Result<Option<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl as t;
        diesel::update(
            t::tasks
                .filter(t::id.eq(task_id))
                .filter(t::status.ne(TaskStatus::Completed)),
        )
        .set((
            t::status.eq(TaskStatus::Completed),
            t::feedback.eq(feedback_val),
            t::completed_at.eq(chrono::Utc::now()),
        ))
        .get_result::<Task>(conn)
        .optional()
    }
}
