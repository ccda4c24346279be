use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{MentorshipStatus, ProgramStatus},
    db::models::evaluation::Evaluation,
    db::models::mentorship::Mentorship,
    db::models::program::NewProgram,
    db::repositories::evaluations::EvaluationsRepo,
    db::repositories::mentorships::MentorshipsRepo,
    db::repositories::profiles::ProfilesRepo,
    db::repositories::programs::ProgramsRepo,
    error::AppError,
    notifications::{NotificationEvent, Notifier},
};

/// Mean of the overall ratings, split by which side submitted them. Falls
/// back to the combined mean when one side has not evaluated, and to None
/// when there are no evaluations at all.
pub fn evaluation_score_means(evaluations: &[Evaluation]) -> (Option<f64>, Option<f64>) {
    fn mean(ratings: &[i32]) -> Option<f64> {
        if ratings.is_empty() {
            return None;
        }
        Some(ratings.iter().map(|r| *r as f64).sum::<f64>() / ratings.len() as f64)
    }

    let mentor_side: Vec<i32> = evaluations
        .iter()
        .filter(|e| e.is_mentor)
        .map(|e| e.rating)
        .collect();
    let mentee_side: Vec<i32> = evaluations
        .iter()
        .filter(|e| !e.is_mentor)
        .map(|e| e.rating)
        .collect();
    let all: Vec<i32> = evaluations.iter().map(|e| e.rating).collect();

    let engagement = mean(&mentor_side).or_else(|| mean(&all));
    let satisfaction = mean(&mentee_side).or_else(|| mean(&all));
    (engagement, satisfaction)
}

pub struct MentorshipsService;

impl MentorshipsService {
    pub fn get_by_id(
        conn: &mut PgConnection,
        mentorship_id: Uuid,
    ) -> Result<Mentorship, AppError> {
        let mentorship = MentorshipsRepo::find_by_id(conn, mentorship_id)?
            .ok_or_else(|| AppError::not_found("mentorship"))?;
        Ok(mentorship)
    }

    pub fn list(
        conn: &mut PgConnection,
        cycle_id: Option<Uuid>,
    ) -> Result<Vec<Mentorship>, AppError> {
        let list = match cycle_id {
            Some(cycle) => MentorshipsRepo::list_by_cycle(conn, cycle)?,
            None => MentorshipsRepo::list_all(conn)?,
        };
        Ok(list)
    }

    /// PENDING -> ACTIVE. Creates the week-1 program for mentorships that
    /// came out of the two-sided approval flow (the auto-approve and
    /// manual-assignment paths already carry one).
    pub fn start(
        conn: &mut PgConnection,
        notifier: &Notifier,
        mentorship_id: Uuid,
    ) -> Result<Mentorship, AppError> {
        let mentorship = Self::get_by_id(conn, mentorship_id)?;
        if !mentorship.status.can_transition(MentorshipStatus::Active) {
            return Err(AppError::precondition(format!(
                "mentorship cannot start from status {}",
                mentorship.status.as_str()
            )));
        }

        let activated = conn.transaction::<Mentorship, AppError, _>(|tx| {
            let activated = MentorshipsRepo::activate_if_pending(tx, mentorship_id)?
                .ok_or_else(|| AppError::conflict("mentorship state changed concurrently"))?;
            if ProgramsRepo::find_by_mentorship(tx, mentorship_id)?.is_none() {
                ProgramsRepo::insert(
                    tx,
                    &NewProgram {
                        mentorship_id,
                        cycle_id: activated.cycle_id,
                        week: 1,
                        status: ProgramStatus::Active,
                    },
                )?;
            }
            Ok(activated)
        })?;

        notifier.publish(NotificationEvent::MentorshipActivated {
            mentorship_id,
            mentor_id: activated.mentor_id,
            mentee_id: activated.mentee_id,
        });
        Ok(activated)
    }

    pub fn record_session(
        conn: &mut PgConnection,
        mentorship_id: Uuid,
    ) -> Result<Mentorship, AppError> {
        let _mentorship = Self::get_by_id(conn, mentorship_id)?;
        MentorshipsRepo::record_session_if_active(conn, mentorship_id)?.ok_or_else(|| {
            AppError::precondition("sessions are recorded only on an active mentorship")
        })
    }

    /// ACTIVE -> COMPLETED. Final scores are the means of the FINAL
    /// evaluation ratings; when none exist yet the mid-program checkpoint
    /// is used instead, which is the documented fallback rather than
    /// silent data loss.
    pub fn complete(
        conn: &mut PgConnection,
        notifier: &Notifier,
        mentorship_id: Uuid,
    ) -> Result<Mentorship, AppError> {
        use crate::db::enums::EvaluationKind;

        let mentorship = Self::get_by_id(conn, mentorship_id)?;
        if !mentorship.status.can_transition(MentorshipStatus::Completed) {
            return Err(AppError::precondition(format!(
                "mentorship cannot complete from status {}",
                mentorship.status.as_str()
            )));
        }

        let mut evaluations =
            EvaluationsRepo::list_by_mentorship_and_kind(conn, mentorship_id, EvaluationKind::Final)?;
        if evaluations.is_empty() {
            evaluations = EvaluationsRepo::list_by_mentorship_and_kind(
                conn,
                mentorship_id,
                EvaluationKind::MidProgram,
            )?;
            if !evaluations.is_empty() {
                tracing::info!(mentorship_id = %mentorship_id,
                    "no final evaluations yet, scoring from mid-program checkpoint");
            }
        }
        let (engagement, satisfaction) = evaluation_score_means(&evaluations);

        let completed = conn.transaction::<Mentorship, AppError, _>(|tx| {
            let completed =
                MentorshipsRepo::complete_if_active(tx, mentorship_id, engagement, satisfaction)?
                    .ok_or_else(|| {
                        AppError::conflict("mentorship state changed concurrently")
                    })?;
            ProgramsRepo::complete_active_for_mentorship(tx, mentorship_id)?;
            ProfilesRepo::release_slot(tx, completed.mentor_id)?;
            Ok(completed)
        })?;

        notifier.publish(NotificationEvent::MentorshipCompleted {
            mentorship_id,
            mentor_id: completed.mentor_id,
            mentee_id: completed.mentee_id,
        });
        Ok(completed)
    }

    /// PENDING or ACTIVE -> CANCELLED.
    pub fn cancel(
        conn: &mut PgConnection,
        notifier: &Notifier,
        mentorship_id: Uuid,
        reason: &str,
    ) -> Result<Mentorship, AppError> {
        let mentorship = Self::get_by_id(conn, mentorship_id)?;
        if !mentorship.status.can_transition(MentorshipStatus::Cancelled) {
            return Err(AppError::precondition(format!(
                "mentorship cannot be cancelled from status {}",
                mentorship.status.as_str()
            )));
        }

        let cancelled = conn.transaction::<Mentorship, AppError, _>(|tx| {
            let cancelled = MentorshipsRepo::cancel_if_open(tx, mentorship_id, reason)?
                .ok_or_else(|| AppError::conflict("mentorship state changed concurrently"))?;
            ProgramsRepo::complete_active_for_mentorship(tx, mentorship_id)?;
            ProfilesRepo::release_slot(tx, cancelled.mentor_id)?;
            Ok(cancelled)
        })?;

        notifier.publish(NotificationEvent::MentorshipCancelled {
            mentorship_id,
            reason: reason.to_string(),
        });
        Ok(cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::EvaluationKind;

    fn evaluation(is_mentor: bool, rating: i32) -> Evaluation {
        Evaluation {
            id: Uuid::new_v4(),
            mentorship_id: Uuid::new_v4(),
            program_id: None,
            kind: EvaluationKind::Final,
            evaluator_id: Uuid::new_v4(),
            is_mentor,
            rating,
            communication_rating: rating,
            helpfulness_rating: rating,
            feedback: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn one_final_rating_of_five_from_each_side_scores_five() {
        let evals = vec![evaluation(true, 5), evaluation(false, 5)];
        let (engagement, satisfaction) = evaluation_score_means(&evals);
        assert_eq!(engagement, Some(5.0));
        assert_eq!(satisfaction, Some(5.0));
    }

    #[test]
    fn sides_are_averaged_independently() {
        let evals = vec![evaluation(true, 4), evaluation(true, 2), evaluation(false, 5)];
        let (engagement, satisfaction) = evaluation_score_means(&evals);
        assert_eq!(engagement, Some(3.0));
        assert_eq!(satisfaction, Some(5.0));
    }

    #[test]
    fn missing_side_falls_back_to_the_combined_mean() {
        let evals = vec![evaluation(true, 4), evaluation(true, 2)];
        let (engagement, satisfaction) = evaluation_score_means(&evals);
        assert_eq!(engagement, Some(3.0));
        assert_eq!(satisfaction, Some(3.0));
    }

    #[test]
    fn no_evaluations_yield_no_scores() {
        let (engagement, satisfaction) = evaluation_score_means(&[]);
        assert_eq!(engagement, None);
        assert_eq!(satisfaction, None);
    }
}
