use diesel::prelude::*;

use crate::db::models::certificate::{Certificate, NewCertificate};

pub struct CertificatesRepo;

impl CertificatesRepo {
    /// Unique constraints on mentorship_id and certificate_number make the
    /// losing side of a double-issue race a UniqueViolation.
    pub fn insert(
        conn: &mut PgConnection,
        new_certificate: &NewCertificate,
    ) -> Result<Certificate, diesel::result::Error> {
        diesel::insert_into(crate::schema::certificates::table)
            .values(new_certificate)
            .get_result(conn)
    }

    pub fn find_by_mentorship(
        conn: &mut PgConnection,
        mentorship: uuid::Uuid,
    ) -> Result<Option<Certificate>, diesel::result::Error> {
        use crate::schema::certificates::dsl::*;
        certificates
            .filter(mentorship_id.eq(mentorship))
            .first::<Certificate>(conn)
            .optional()
    }

    pub fn count(conn: &mut PgConnection) -> Result<i64, diesel::result::Error> {
        use crate::schema::certificates::dsl::*;
        certificates.count().get_result::<i64>(conn)
    }

    pub fn count_by_cycle(
        conn: &mut PgConnection,
        cycle: uuid::Uuid,
    ) -> Result<i64, diesel::result::Error> {
        use crate::schema::{certificates, mentorships};
        certificates::table
            .inner_join(mentorships::table.on(certificates::mentorship_id.eq(mentorships::id)))
            .filter(mentorships::cycle_id.eq(cycle))
            .count()
            .get_result::<i64>(conn)
    }
}
