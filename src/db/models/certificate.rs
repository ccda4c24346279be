use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Terminal artifact of a completed mentorship. certificate_number is
/// globally unique and never changes after issuance.
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::certificates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Certificate {
    pub id: Uuid,
    pub mentorship_id: Uuid,
    pub certificate_number: String,
    pub issued_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::certificates)]
pub struct NewCertificate {
    pub mentorship_id: Uuid,
    pub certificate_number: String,
    pub issued_at: chrono::DateTime<chrono::Utc>,
}
