use crate::db::enums::EvaluationKind;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rated checkpoint assessment from one side of a mentorship. At most one
/// per (mentorship, kind, evaluator).
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::evaluations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Evaluation {
    pub id: Uuid,
    pub mentorship_id: Uuid,
    pub program_id: Option<Uuid>,
    pub kind: EvaluationKind,
    pub evaluator_id: Uuid,
    pub is_mentor: bool,
    pub rating: i32,
    pub communication_rating: i32,
    pub helpfulness_rating: i32,
    pub feedback: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::evaluations)]
pub struct NewEvaluation {
    pub mentorship_id: Uuid,
    pub program_id: Option<Uuid>,
    pub kind: EvaluationKind,
    pub evaluator_id: Uuid,
    pub is_mentor: bool,
    pub rating: i32,
    pub communication_rating: i32,
    pub helpfulness_rating: i32,
    pub feedback: Option<String>,
}
