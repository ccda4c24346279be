use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{CycleStatus, InterestRole, InterestStatus},
    db::models::interest::{Interest, NewInterest},
    db::repositories::cycles::CyclesRepo,
    db::repositories::interests::InterestsRepo,
    db::repositories::profiles::ProfilesRepo,
    error::AppError,
    notifications::{NotificationEvent, Notifier},
};

pub struct InterestsService;

impl InterestsService {
    /// Declares (or renews a withdrawn) interest. One row per
    /// (cycle, user); re-registering while interested is a conflict.
    pub fn register(
        conn: &mut PgConnection,
        cycle_id: Uuid,
        user_id: Uuid,
        role: InterestRole,
    ) -> Result<Interest, AppError> {
        let cycle = CyclesRepo::find_by_id(conn, cycle_id)?
            .ok_or_else(|| AppError::not_found("cycle"))?;
        if cycle.status == CycleStatus::Completed {
            return Err(AppError::precondition(
                "interest cannot be declared for a completed cycle",
            ));
        }

        if let Some(existing) = InterestsRepo::find_by_cycle_and_user(conn, cycle_id, user_id)? {
            return match existing.status {
                InterestStatus::Interested => Err(AppError::conflict_with_code(
                    "user already declared interest in this cycle",
                    Some("user_id".into()),
                    "INTEREST_EXISTS",
                )),
                InterestStatus::Withdrawn => {
                    let renewed = InterestsRepo::renew(conn, existing.id, role)?;
                    Ok(renewed)
                }
            };
        }

        let new_interest = NewInterest {
            cycle_id,
            user_id,
            role,
            status: InterestStatus::Interested,
        };
        InterestsRepo::insert(conn, &new_interest).map_err(|e| {
            AppError::on_unique_violation(
                e,
                AppError::conflict_with_code(
                    "user already declared interest in this cycle",
                    Some("user_id".into()),
                    "INTEREST_EXISTS",
                ),
            )
        })
    }

    pub fn withdraw(conn: &mut PgConnection, interest_id: Uuid) -> Result<Interest, AppError> {
        let _existing = InterestsRepo::find_by_id(conn, interest_id)?
            .ok_or_else(|| AppError::not_found("interest"))?;
        InterestsRepo::withdraw_if_interested(conn, interest_id)?
            .ok_or_else(|| AppError::precondition("interest was already withdrawn"))
    }

    pub fn list_by_cycle(
        conn: &mut PgConnection,
        cycle_id: Uuid,
    ) -> Result<Vec<Interest>, AppError> {
        let _cycle = CyclesRepo::find_by_id(conn, cycle_id)?
            .ok_or_else(|| AppError::not_found("cycle"))?;
        let list = InterestsRepo::list_interested_by_cycle(conn, cycle_id)?;
        Ok(list)
    }

    /// Onboarding fan-out, delegated entirely to notification dispatch.
    /// With a cycle it targets that cycle's interested users of the role;
    /// without one it targets the standing profile pools.
    pub fn send_onboarding_notifications(
        conn: &mut PgConnection,
        notifier: &Notifier,
        role: InterestRole,
        cycle_id: Option<Uuid>,
    ) -> Result<usize, AppError> {
        let user_ids: Vec<Uuid> = match cycle_id {
            Some(cycle) => {
                CyclesRepo::find_by_id(conn, cycle)?
                    .ok_or_else(|| AppError::not_found("cycle"))?;
                InterestsRepo::list_interested_by_cycle_and_role(conn, cycle, role)?
                    .into_iter()
                    .map(|i| i.user_id)
                    .collect()
            }
            None => match role {
                InterestRole::Mentor => ProfilesRepo::list_active_mentors(conn)?
                    .into_iter()
                    .map(|p| p.user_id)
                    .collect(),
                InterestRole::Mentee => ProfilesRepo::list_committed_mentees(conn)?
                    .into_iter()
                    .map(|p| p.user_id)
                    .collect(),
            },
        };

        let count = user_ids.len();
        for user_id in user_ids {
            notifier.publish(NotificationEvent::OnboardingInvite {
                user_id,
                role,
                cycle_id,
            });
        }
        tracing::info!(?role, recipients = count, "onboarding notifications queued");
        Ok(count)
    }
}
