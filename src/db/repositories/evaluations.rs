use diesel::prelude::*;

use crate::db::enums::EvaluationKind;
use crate::db::models::evaluation::{Evaluation, NewEvaluation};

pub struct EvaluationsRepo;

impl EvaluationsRepo {
    /// The unique index on (mentorship_id, kind, evaluator_id) turns a
    /// duplicate submission into a UniqueViolation for the caller to map.
    pub fn insert(
        conn: &mut PgConnection,
        new_evaluation: &NewEvaluation,
    ) -> Result<Evaluation, diesel::result::Error> {
        diesel::insert_into(crate::schema::evaluations::table)
            .values(new_evaluation)
            .get_result(conn)
    }

    pub fn exists_for(
        conn: &mut PgConnection,
        mentorship: uuid::Uuid,
        kind_val: EvaluationKind,
        evaluator: uuid::Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::evaluations::dsl::*;
        diesel::select(diesel::dsl::exists(
            evaluations
                .filter(mentorship_id.eq(mentorship))
                .filter(kind.eq(kind_val))
                .filter(evaluator_id.eq(evaluator)),
        ))
        .get_result(conn)
    }

    pub fn list_by_mentorship_and_kind(
        conn: &mut PgConnection,
        mentorship: uuid::Uuid,
        kind_val: EvaluationKind,
    ) -> Result<Vec<Evaluation>, diesel::result::Error> {
        use crate::schema::evaluations::dsl::*;
        evaluations
            .filter(mentorship_id.eq(mentorship))
            .filter(kind.eq(kind_val))
            .order(created_at.asc())
            .load::<Evaluation>(conn)
    }

    pub fn list_by_mentorship(
        conn: &mut PgConnection,
        mentorship: uuid::Uuid,
    ) -> Result<Vec<Evaluation>, diesel::result::Error> {
        use crate::schema::evaluations::dsl::*;
        evaluations
            .filter(mentorship_id.eq(mentorship))
            .order(created_at.asc())
            .load::<Evaluation>(conn)
    }
}
