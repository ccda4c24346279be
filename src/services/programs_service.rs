use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{ProgramStatus, TaskKind, TaskStatus},
    db::models::progress::{NewProgressSnapshot, ProgressSnapshot},
    db::models::program::Program,
    db::models::task::{NewTask, Task},
    db::repositories::mentorships::MentorshipsRepo,
    db::repositories::programs::ProgramsRepo,
    db::repositories::progress::ProgressRepo,
    db::repositories::tasks::TasksRepo,
    error::AppError,
    notifications::{NotificationEvent, Notifier},
    validation,
};

/// Derived, recomputable progress figures for one week's tasks.
/// Engagement is the completion share; skill improvement weighs only the
/// learning and practice work. Pure, so recomputation is byte-stable.
pub fn derive_progress(tasks: &[Task]) -> (i32, i32, i32, i32) {
    let total = tasks.len() as i32;
    let completed = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count() as i32;

    let skill_total = tasks
        .iter()
        .filter(|t| matches!(t.kind, TaskKind::Learning | TaskKind::Practice))
        .count() as i32;
    let skill_completed = tasks
        .iter()
        .filter(|t| {
            matches!(t.kind, TaskKind::Learning | TaskKind::Practice)
                && t.status == TaskStatus::Completed
        })
        .count() as i32;

    let engagement = if total > 0 { completed * 100 / total } else { 0 };
    let skill = if skill_total > 0 {
        skill_completed * 100 / skill_total
    } else {
        0
    };
    (completed, total, engagement, skill)
}

pub struct ProgramsService;

impl ProgramsService {
    pub fn get_by_id(conn: &mut PgConnection, program_id: Uuid) -> Result<Program, AppError> {
        let program = ProgramsRepo::find_by_id(conn, program_id)?
            .ok_or_else(|| AppError::not_found("program"))?;
        Ok(program)
    }

    /// Advances the week counter by one. On a COMPLETED program this is
    /// the documented no-op guard: the program is returned unchanged.
    pub fn advance_week(
        conn: &mut PgConnection,
        notifier: &Notifier,
        program_id: Uuid,
    ) -> Result<Program, AppError> {
        let program = Self::get_by_id(conn, program_id)?;
        if program.status == ProgramStatus::Completed {
            return Ok(program);
        }
        let advanced = match ProgramsRepo::advance_week_if_active(conn, program_id)? {
            Some(advanced) => advanced,
            // completed between the read and the update; same no-op
            None => return Self::get_by_id(conn, program_id),
        };

        notifier.publish(NotificationEvent::WeekAdvanced {
            program_id,
            mentorship_id: advanced.mentorship_id,
            week: advanced.week,
        });
        Ok(advanced)
    }

    /// New tasks always land in the program's current week and start
    /// PENDING.
    pub fn create_task(
        conn: &mut PgConnection,
        program_id: Uuid,
        kind: TaskKind,
        title: &str,
        description: Option<String>,
    ) -> Result<Task, AppError> {
        validation::program::validate_task_title(title)?;
        let program = Self::get_by_id(conn, program_id)?;
        if program.status == ProgramStatus::Completed {
            return Err(AppError::precondition(
                "tasks cannot be added to a completed program",
            ));
        }

        let task = TasksRepo::insert(
            conn,
            &NewTask {
                program_id,
                mentorship_id: program.mentorship_id,
                week: program.week,
                kind,
                title: title.to_string(),
                description,
                status: TaskStatus::Pending,
            },
        )?;
        Ok(task)
    }

    pub fn list_tasks(conn: &mut PgConnection, program_id: Uuid) -> Result<Vec<Task>, AppError> {
        let _program = Self::get_by_id(conn, program_id)?;
        let tasks = TasksRepo::list_by_program(conn, program_id)?;
        Ok(tasks)
    }

    pub fn start_task(conn: &mut PgConnection, task_id: Uuid) -> Result<Task, AppError> {
        let task = TasksRepo::find_by_id(conn, task_id)?
            .ok_or_else(|| AppError::not_found("task"))?;
        if !task.status.can_transition(TaskStatus::InProgress) {
            return Err(AppError::precondition(format!(
                "task cannot start from status {}",
                task.status.as_str()
            )));
        }
        TasksRepo::start_if_pending(conn, task_id)?
            .ok_or_else(|| AppError::conflict("task state changed concurrently"))
    }

    /// PENDING or IN_PROGRESS -> COMPLETED, stamping completed_at once.
    /// Completing an already-completed task returns it unchanged.
    pub fn complete_task(
        conn: &mut PgConnection,
        notifier: &Notifier,
        task_id: Uuid,
        feedback: Option<&str>,
    ) -> Result<Task, AppError> {
        match TasksRepo::complete_if_open(conn, task_id, feedback)? {
            Some(task) => {
                notifier.publish(NotificationEvent::TaskCompleted {
                    task_id,
                    mentorship_id: task.mentorship_id,
                });
                Ok(task)
            }
            None => TasksRepo::find_by_id(conn, task_id)?
                .ok_or_else(|| AppError::not_found("task")),
        }
    }

    /// Counts the week's tasks and replaces the snapshot for that exact
    /// week. Safe to call any number of times; unchanged task data
    /// reproduces identical fields.
    pub fn recompute_progress(
        conn: &mut PgConnection,
        mentorship_id: Uuid,
        week: i32,
    ) -> Result<ProgressSnapshot, AppError> {
        validation::program::validate_week(week)?;
        let _mentorship = MentorshipsRepo::find_by_id(conn, mentorship_id)?
            .ok_or_else(|| AppError::not_found("mentorship"))?;
        let program = ProgramsRepo::find_by_mentorship(conn, mentorship_id)?
            .ok_or_else(|| AppError::not_found("program"))?;

        let tasks = TasksRepo::list_for_week(conn, mentorship_id, week)?;
        let (completed, total, engagement, skill) = derive_progress(&tasks);

        let snapshot = ProgressRepo::upsert(
            conn,
            &NewProgressSnapshot {
                mentorship_id,
                program_id: program.id,
                week,
                tasks_completed: completed,
                total_tasks: total,
                engagement_score: engagement,
                skill_improvement: skill,
            },
        )?;
        Ok(snapshot)
    }

    pub fn list_progress(
        conn: &mut PgConnection,
        mentorship_id: Uuid,
    ) -> Result<Vec<ProgressSnapshot>, AppError> {
        let _mentorship = MentorshipsRepo::find_by_id(conn, mentorship_id)?
            .ok_or_else(|| AppError::not_found("mentorship"))?;
        let snapshots = ProgressRepo::list_by_mentorship(conn, mentorship_id)?;
        Ok(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(kind: TaskKind, status: TaskStatus) -> Task {
        Task {
            id: Uuid::new_v4(),
            program_id: Uuid::new_v4(),
            mentorship_id: Uuid::new_v4(),
            week: 1,
            kind,
            title: "task".to_string(),
            description: None,
            status,
            feedback: None,
            completed_at: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn empty_week_derives_zeroes() {
        assert_eq!(derive_progress(&[]), (0, 0, 0, 0));
    }

    #[test]
    fn engagement_is_the_completion_share() {
        let tasks = vec![
            task(TaskKind::Learning, TaskStatus::Completed),
            task(TaskKind::Practice, TaskStatus::Pending),
            task(TaskKind::Reflection, TaskStatus::Completed),
            task(TaskKind::Reflection, TaskStatus::InProgress),
        ];
        let (completed, total, engagement, skill) = derive_progress(&tasks);
        assert_eq!(completed, 2);
        assert_eq!(total, 4);
        assert_eq!(engagement, 50);
        // one of the two learning/practice tasks is done
        assert_eq!(skill, 50);
    }

    #[test]
    fn reflection_only_weeks_have_no_skill_signal() {
        let tasks = vec![task(TaskKind::Reflection, TaskStatus::Completed)];
        let (_, _, engagement, skill) = derive_progress(&tasks);
        assert_eq!(engagement, 100);
        assert_eq!(skill, 0);
    }

    #[test]
    fn derivation_is_deterministic() {
        let tasks = vec![
            task(TaskKind::Learning, TaskStatus::Completed),
            task(TaskKind::Practice, TaskStatus::InProgress),
        ];
        assert_eq!(derive_progress(&tasks), derive_progress(&tasks));
    }
}
