use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::enums::{MatchStatus, MentorshipStatus, ProgramStatus},
    db::repositories::certificates::CertificatesRepo,
    db::repositories::matches::MatchesRepo,
    db::repositories::mentorships::MentorshipsRepo,
    db::repositories::progress::ProgressRepo,
    db::repositories::programs::ProgramsRepo,
    error::AppError,
};

#[derive(Serialize)]
pub struct MentorshipProgressReport {
    pub mentorship_id: Uuid,
    pub cycle_id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub status: MentorshipStatus,
    pub sessions_completed: i32,
    pub current_week: Option<i32>,
    pub program_status: Option<ProgramStatus>,
    pub tasks_completed: i32,
    pub total_tasks: i32,
    pub engagement_score: i32,
    pub skill_improvement: i32,
}

#[derive(Serialize)]
pub struct MentorshipAnalytics {
    pub total_matches: i64,
    pub pending_matches: i64,
    pub approved_matches: i64,
    pub rejected_matches: i64,
    pub average_match_score: f64,
    pub total_mentorships: i64,
    pub active_mentorships: i64,
    pub completed_mentorships: i64,
    pub cancelled_mentorships: i64,
    pub completion_rate: f64,
    pub certificates_issued: i64,
}

pub struct AnalyticsService;

impl AnalyticsService {
    /// Per-mentorship progress rollup: current program week plus the
    /// latest recomputed snapshot.
    pub fn mentorship_progress(
        conn: &mut PgConnection,
        cycle_id: Option<Uuid>,
    ) -> Result<Vec<MentorshipProgressReport>, AppError> {
        let mentorships = match cycle_id {
            Some(cycle) => MentorshipsRepo::list_by_cycle(conn, cycle)?,
            None => MentorshipsRepo::list_all(conn)?,
        };

        let mut reports = Vec::with_capacity(mentorships.len());
        for mentorship in mentorships {
            let program = ProgramsRepo::find_by_mentorship(conn, mentorship.id)?;
            let snapshot = ProgressRepo::latest_for_mentorship(conn, mentorship.id)?;
            reports.push(MentorshipProgressReport {
                mentorship_id: mentorship.id,
                cycle_id: mentorship.cycle_id,
                mentor_id: mentorship.mentor_id,
                mentee_id: mentorship.mentee_id,
                status: mentorship.status,
                sessions_completed: mentorship.sessions_completed,
                current_week: program.as_ref().map(|p| p.week),
                program_status: program.as_ref().map(|p| p.status),
                tasks_completed: snapshot.as_ref().map(|s| s.tasks_completed).unwrap_or(0),
                total_tasks: snapshot.as_ref().map(|s| s.total_tasks).unwrap_or(0),
                engagement_score: snapshot.as_ref().map(|s| s.engagement_score).unwrap_or(0),
                skill_improvement: snapshot.as_ref().map(|s| s.skill_improvement).unwrap_or(0),
            });
        }
        Ok(reports)
    }

    /// Cohort-level counters. The mentor-load figure everywhere else is
    /// the transactional `current_mentees` counter; the derived counts
    /// here are read-only reporting.
    pub fn summary(
        conn: &mut PgConnection,
        cycle_id: Option<Uuid>,
    ) -> Result<MentorshipAnalytics, AppError> {
        let matches = match cycle_id {
            Some(cycle) => MatchesRepo::list_by_cycle(conn, cycle)?,
            None => MatchesRepo::list_all(conn)?,
        };
        let mentorships = match cycle_id {
            Some(cycle) => MentorshipsRepo::list_by_cycle(conn, cycle)?,
            None => MentorshipsRepo::list_all(conn)?,
        };
        let certificates_issued = match cycle_id {
            Some(cycle) => CertificatesRepo::count_by_cycle(conn, cycle)?,
            None => CertificatesRepo::count(conn)?,
        };

        let total_matches = matches.len() as i64;
        let pending_matches = matches
            .iter()
            .filter(|m| m.status == MatchStatus::Pending)
            .count() as i64;
        let approved_matches = matches
            .iter()
            .filter(|m| m.status == MatchStatus::Approved)
            .count() as i64;
        let rejected_matches = matches
            .iter()
            .filter(|m| m.status == MatchStatus::Rejected)
            .count() as i64;
        let average_match_score = if matches.is_empty() {
            0.0
        } else {
            matches.iter().map(|m| m.match_score as f64).sum::<f64>() / matches.len() as f64
        };

        let total_mentorships = mentorships.len() as i64;
        let active_mentorships = mentorships
            .iter()
            .filter(|m| m.status == MentorshipStatus::Active)
            .count() as i64;
        let completed_mentorships = mentorships
            .iter()
            .filter(|m| m.status == MentorshipStatus::Completed)
            .count() as i64;
        let cancelled_mentorships = mentorships
            .iter()
            .filter(|m| m.status == MentorshipStatus::Cancelled)
            .count() as i64;
        let completion_rate = if total_mentorships > 0 {
            completed_mentorships as f64 / total_mentorships as f64
        } else {
            0.0
        };

        Ok(MentorshipAnalytics {
            total_matches,
            pending_matches,
            approved_matches,
            rejected_matches,
            average_match_score,
            total_mentorships,
            active_mentorships,
            completed_mentorships,
            cancelled_mentorships,
            completion_rate,
            certificates_issued,
        })
    }
}
