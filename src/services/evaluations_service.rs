use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::{EvaluationKind, MentorshipStatus},
    db::models::certificate::{Certificate, NewCertificate},
    db::models::evaluation::{Evaluation, NewEvaluation},
    db::repositories::certificates::CertificatesRepo,
    db::repositories::evaluations::EvaluationsRepo,
    db::repositories::mentorships::MentorshipsRepo,
    db::repositories::programs::ProgramsRepo,
    error::AppError,
    notifications::{NotificationEvent, Notifier},
    validation,
};

/// Deterministic composition of issue date and mentorship id. Globally
/// unique because each mentorship carries at most one certificate and the
/// number column is itself uniquely indexed.
pub fn certificate_number(mentorship_id: Uuid, issued_at: chrono::DateTime<chrono::Utc>) -> String {
    format!(
        "MC-{}-{}",
        issued_at.format("%Y%m%d"),
        mentorship_id.simple()
    )
}

pub struct EvaluationsService;

impl EvaluationsService {
    /// Accepts one evaluation per (mentorship, checkpoint, evaluator).
    /// The second submission from the same evaluator is rejected as a
    /// duplicate, backed by the unique index.
    pub fn submit(
        conn: &mut PgConnection,
        notifier: &Notifier,
        mentorship_id: Uuid,
        req: &crate::routes::evaluations::SubmitEvaluationRequest,
    ) -> Result<Evaluation, AppError> {
        validation::evaluation::validate_ratings(&[
            req.rating,
            req.communication_rating,
            req.helpfulness_rating,
        ])?;

        let mentorship = MentorshipsRepo::find_by_id(conn, mentorship_id)?
            .ok_or_else(|| AppError::not_found("mentorship"))?;
        if !matches!(
            mentorship.status,
            MentorshipStatus::Active | MentorshipStatus::Completed
        ) {
            return Err(AppError::precondition(
                "evaluations are accepted only on active or completed mentorships",
            ));
        }
        let is_mentor = if req.evaluator_id == mentorship.mentor_id {
            true
        } else if req.evaluator_id == mentorship.mentee_id {
            false
        } else {
            return Err(AppError::precondition(
                "evaluator is not a participant in this mentorship",
            ));
        };

        if EvaluationsRepo::exists_for(conn, mentorship_id, req.kind, req.evaluator_id)? {
            return Err(AppError::precondition(
                "evaluator already submitted an evaluation for this checkpoint",
            ));
        }

        let program_id = ProgramsRepo::find_by_mentorship(conn, mentorship_id)?.map(|p| p.id);
        let evaluation = EvaluationsRepo::insert(
            conn,
            &NewEvaluation {
                mentorship_id,
                program_id,
                kind: req.kind,
                evaluator_id: req.evaluator_id,
                is_mentor,
                rating: req.rating,
                communication_rating: req.communication_rating,
                helpfulness_rating: req.helpfulness_rating,
                feedback: req.feedback.clone(),
            },
        )
        .map_err(|e| {
            AppError::on_unique_violation(
                e,
                AppError::precondition(
                    "evaluator already submitted an evaluation for this checkpoint",
                ),
            )
        })?;

        notifier.publish(NotificationEvent::EvaluationSubmitted {
            mentorship_id,
            evaluator_id: req.evaluator_id,
        });
        Ok(evaluation)
    }

    pub fn list_by_mentorship(
        conn: &mut PgConnection,
        mentorship_id: Uuid,
    ) -> Result<Vec<Evaluation>, AppError> {
        let _mentorship = MentorshipsRepo::find_by_id(conn, mentorship_id)?
            .ok_or_else(|| AppError::not_found("mentorship"))?;
        let list = EvaluationsRepo::list_by_mentorship(conn, mentorship_id)?;
        Ok(list)
    }

    /// Issues the one certificate a COMPLETED mentorship is entitled to.
    /// Gated on status, and issued at most once: the certificate row, its
    /// number, and the mentorship's certificate_id column are all
    /// write-once, inside one transaction.
    pub fn issue_certificate(
        conn: &mut PgConnection,
        notifier: &Notifier,
        mentorship_id: Uuid,
    ) -> Result<Certificate, AppError> {
        let mentorship = MentorshipsRepo::find_by_id(conn, mentorship_id)?
            .ok_or_else(|| AppError::not_found("mentorship"))?;
        if mentorship.status != MentorshipStatus::Completed {
            return Err(AppError::precondition(
                "certificates are issued only for completed mentorships",
            ));
        }
        if mentorship.certificate_id.is_some()
            || CertificatesRepo::find_by_mentorship(conn, mentorship_id)?.is_some()
        {
            return Err(AppError::conflict_with_code(
                "certificate already issued for this mentorship",
                None,
                "CERTIFICATE_EXISTS",
            ));
        }

        let issued_at = chrono::Utc::now();
        let number = certificate_number(mentorship_id, issued_at);
        let certificate = conn.transaction::<Certificate, AppError, _>(|tx| {
            let certificate = CertificatesRepo::insert(
                tx,
                &NewCertificate {
                    mentorship_id,
                    certificate_number: number.clone(),
                    issued_at,
                },
            )
            .map_err(|e| {
                AppError::on_unique_violation(
                    e,
                    AppError::conflict_with_code(
                        "certificate already issued for this mentorship",
                        None,
                        "CERTIFICATE_EXISTS",
                    ),
                )
            })?;
            let linked =
                MentorshipsRepo::link_certificate_once(tx, mentorship_id, certificate.id)?;
            if linked == 0 {
                // lost the race after the read above; roll the insert back
                return Err(AppError::conflict_with_code(
                    "certificate already issued for this mentorship",
                    None,
                    "CERTIFICATE_EXISTS",
                ));
            }
            Ok(certificate)
        })?;

        notifier.publish(NotificationEvent::CertificateIssued {
            mentorship_id,
            certificate_number: certificate.certificate_number.clone(),
        });
        tracing::info!(mentorship_id = %mentorship_id,
            certificate_number = %certificate.certificate_number, "certificate issued");
        Ok(certificate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certificate_numbers_embed_date_and_mentorship() {
        let id = Uuid::new_v4();
        let issued = chrono::DateTime::parse_from_rfc3339("2026-03-02T10:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&chrono::Utc);
        let number = certificate_number(id, issued);
        assert!(number.starts_with("MC-20260302-"));
        assert!(number.ends_with(&id.simple().to_string()));
    }

    #[test]
    fn distinct_mentorships_get_distinct_numbers() {
        let issued = chrono::Utc::now();
        let a = certificate_number(Uuid::new_v4(), issued);
        let b = certificate_number(Uuid::new_v4(), issued);
        assert_ne!(a, b);
    }

    #[test]
    fn number_is_deterministic_for_fixed_inputs() {
        let id = Uuid::new_v4();
        let issued = chrono::Utc::now();
        assert_eq!(certificate_number(id, issued), certificate_number(id, issued));
    }
}
