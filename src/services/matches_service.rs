use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::enums::{MatchStatus, MentorshipStatus},
    db::models::matches::Match,
    db::models::mentorship::{Mentorship, NewMentorship},
    db::repositories::matches::MatchesRepo,
    db::repositories::mentorships::MentorshipsRepo,
    db::repositories::profiles::ProfilesRepo,
    error::AppError,
    notifications::{NotificationEvent, Notifier},
};

#[derive(Serialize)]
pub struct ApprovalOutcome {
    pub record: Match,
    /// Present only on the call that observed the PENDING -> APPROVED
    /// transition.
    pub mentorship: Option<Mentorship>,
}

#[derive(Serialize)]
pub struct BatchApprovalResult {
    pub match_id: Uuid,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub mentorship_created: bool,
}

pub struct MatchesService;

impl MatchesService {
    /// Records the caller's approval. When both sides have approved, the
    /// status flips PENDING -> APPROVED exactly once, and that winning
    /// call instantiates the mentorship; the unique match_id constraint
    /// rejects any concurrent double-instantiation.
    pub fn approve(
        conn: &mut PgConnection,
        notifier: &Notifier,
        match_id: Uuid,
        actor_id: Uuid,
    ) -> Result<ApprovalOutcome, AppError> {
        let record = MatchesRepo::find_by_id(conn, match_id)?
            .ok_or_else(|| AppError::not_found("match"))?;
        if !record.is_participant(actor_id) {
            return Err(AppError::precondition(
                "actor is not a participant in this match",
            ));
        }
        if record.status == MatchStatus::Rejected {
            return Err(AppError::precondition("match was already rejected"));
        }
        let as_mentor = actor_id == record.mentor_id;

        let outcome = conn.transaction::<ApprovalOutcome, AppError, _>(|tx| {
            let updated = MatchesRepo::set_approval_flag(tx, match_id, as_mentor)?;
            match MatchesRepo::promote_if_both_approved(tx, match_id)? {
                Some(approved) => {
                    let mentorship = MentorshipsRepo::insert(
                        tx,
                        &NewMentorship {
                            match_id: approved.id,
                            cycle_id: approved.cycle_id,
                            mentor_id: approved.mentor_id,
                            mentee_id: approved.mentee_id,
                            status: MentorshipStatus::Pending,
                        },
                    )
                    .map_err(|e| {
                        AppError::on_unique_violation(
                            e,
                            AppError::conflict_with_code(
                                "a concurrent approval already instantiated this mentorship",
                                None,
                                "MENTORSHIP_EXISTS",
                            ),
                        )
                    })?;
                    Ok(ApprovalOutcome {
                        record: approved,
                        mentorship: Some(mentorship),
                    })
                }
                None => Ok(ApprovalOutcome {
                    record: updated,
                    mentorship: None,
                }),
            }
        })?;

        if let Some(mentorship) = &outcome.mentorship {
            notifier.publish(NotificationEvent::MatchApproved {
                match_id,
                mentor_id: mentorship.mentor_id,
                mentee_id: mentorship.mentee_id,
            });
        }
        Ok(outcome)
    }

    /// Bulk form of `approve` acting as both participants at once (admin
    /// path). Reports per-id outcomes instead of failing the batch on the
    /// first bad id.
    pub fn approve_many(
        conn: &mut PgConnection,
        notifier: &Notifier,
        match_ids: &[Uuid],
    ) -> Result<Vec<BatchApprovalResult>, AppError> {
        let mut results = Vec::with_capacity(match_ids.len());
        for &match_id in match_ids {
            let entry = match Self::approve_as_both(conn, notifier, match_id) {
                Ok(outcome) => BatchApprovalResult {
                    match_id,
                    success: true,
                    error: None,
                    mentorship_created: outcome.mentorship.is_some(),
                },
                Err(AppError::Database(e)) => return Err(AppError::Database(e)),
                Err(AppError::Pool(e)) => return Err(AppError::Pool(e)),
                Err(e) => BatchApprovalResult {
                    match_id,
                    success: false,
                    error: Some(e.to_string()),
                    mentorship_created: false,
                },
            };
            results.push(entry);
        }
        Ok(results)
    }

    fn approve_as_both(
        conn: &mut PgConnection,
        notifier: &Notifier,
        match_id: Uuid,
    ) -> Result<ApprovalOutcome, AppError> {
        let record = MatchesRepo::find_by_id(conn, match_id)?
            .ok_or_else(|| AppError::not_found("match"))?;
        let first = Self::approve(conn, notifier, match_id, record.mentor_id)?;
        if first.mentorship.is_some() {
            return Ok(first);
        }
        Self::approve(conn, notifier, match_id, record.mentee_id)
    }

    /// PENDING -> REJECTED by either participant. Releases the capacity
    /// slot reserved when the match was created; the row is kept so that
    /// future matching runs do not re-propose the pair.
    pub fn reject(
        conn: &mut PgConnection,
        notifier: &Notifier,
        match_id: Uuid,
        actor_id: Uuid,
    ) -> Result<Match, AppError> {
        let record = MatchesRepo::find_by_id(conn, match_id)?
            .ok_or_else(|| AppError::not_found("match"))?;
        if !record.is_participant(actor_id) {
            return Err(AppError::precondition(
                "actor is not a participant in this match",
            ));
        }

        let rejected = conn.transaction::<Match, AppError, _>(|tx| {
            let rejected = MatchesRepo::reject_if_pending(tx, match_id)?
                .ok_or_else(|| {
                    AppError::precondition("only a pending match can be rejected")
                })?;
            ProfilesRepo::release_slot(tx, rejected.mentor_id)?;
            Ok(rejected)
        })?;

        notifier.publish(NotificationEvent::MatchRejected {
            match_id,
            mentor_id: rejected.mentor_id,
            mentee_id: rejected.mentee_id,
        });
        Ok(rejected)
    }

    pub fn get_by_id(conn: &mut PgConnection, match_id: Uuid) -> Result<Match, AppError> {
        let record = MatchesRepo::find_by_id(conn, match_id)?
            .ok_or_else(|| AppError::not_found("match"))?;
        Ok(record)
    }

    pub fn list(
        conn: &mut PgConnection,
        cycle_id: Option<Uuid>,
    ) -> Result<Vec<Match>, AppError> {
        let list = match cycle_id {
            Some(cycle) => MatchesRepo::list_by_cycle(conn, cycle)?,
            None => MatchesRepo::list_all(conn)?,
        };
        Ok(list)
    }
}
