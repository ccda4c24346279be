use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::CycleStatus,
    db::models::cycle::{Cycle, NewCycle},
    db::repositories::cycles::CyclesRepo,
    db::repositories::interests::InterestsRepo,
    db::repositories::matches::MatchesRepo,
    error::AppError,
    notifications::{NotificationEvent, Notifier},
    validation,
};

pub struct CyclesService;

impl CyclesService {
    pub fn create(
        conn: &mut PgConnection,
        req: &crate::routes::cycles::CreateCycleRequest,
    ) -> Result<Cycle, AppError> {
        validation::cycle::validate_create_cycle(
            &req.name,
            req.start_date,
            req.end_date,
            req.max_mentorships,
        )?;
        let new_cycle = NewCycle {
            name: req.name.clone(),
            start_date: req.start_date,
            end_date: req.end_date,
            status: CycleStatus::Upcoming,
            max_mentorships: req.max_mentorships,
        };
        let created = CyclesRepo::insert(conn, &new_cycle)?;
        tracing::info!(cycle_id = %created.id, name = %created.name, "cycle created");
        Ok(created)
    }

    pub fn list(conn: &mut PgConnection) -> Result<Vec<Cycle>, AppError> {
        let list = CyclesRepo::list(conn)?;
        Ok(list)
    }

    pub fn get_by_id(conn: &mut PgConnection, cycle_id: Uuid) -> Result<Cycle, AppError> {
        let cycle = CyclesRepo::find_by_id(conn, cycle_id)?
            .ok_or_else(|| AppError::not_found("cycle"))?;
        Ok(cycle)
    }

    /// UPCOMING -> ACTIVE, then fans a launch notification out to every
    /// interest holder. The fan-out happens after the transition commits
    /// and never fails it.
    pub fn launch(
        conn: &mut PgConnection,
        notifier: &Notifier,
        cycle_id: Uuid,
    ) -> Result<Cycle, AppError> {
        let cycle = Self::get_by_id(conn, cycle_id)?;
        let launched = CyclesRepo::launch_if_upcoming(conn, cycle_id)?.ok_or_else(|| {
            AppError::precondition(format!(
                "cycle cannot launch from status {}",
                cycle.status.as_str()
            ))
        })?;

        let interests = InterestsRepo::list_interested_by_cycle(conn, cycle_id)?;
        let recipients = interests.len();
        for interest in interests {
            notifier.publish(NotificationEvent::CycleLaunched {
                cycle_id,
                user_id: interest.user_id,
            });
        }
        tracing::info!(cycle_id = %cycle_id, recipients, "cycle launched");
        Ok(launched)
    }

    /// ACTIVE -> COMPLETED. Forward-only, like launch.
    pub fn complete(conn: &mut PgConnection, cycle_id: Uuid) -> Result<Cycle, AppError> {
        let cycle = Self::get_by_id(conn, cycle_id)?;
        let completed = CyclesRepo::complete_if_active(conn, cycle_id)?.ok_or_else(|| {
            AppError::precondition(format!(
                "cycle cannot complete from status {}",
                cycle.status.as_str()
            ))
        })?;
        Ok(completed)
    }

    /// A cycle with matches is refused rather than cascaded away.
    pub fn delete(conn: &mut PgConnection, cycle_id: Uuid) -> Result<(), AppError> {
        let _cycle = Self::get_by_id(conn, cycle_id)?;
        if MatchesRepo::count_by_cycle(conn, cycle_id)? > 0 {
            return Err(AppError::conflict_with_code(
                "cycle still owns matches; delete is refused",
                None,
                "CYCLE_HAS_DEPENDENTS",
            ));
        }
        CyclesRepo::delete_by_id(conn, cycle_id)?;
        Ok(())
    }
}
