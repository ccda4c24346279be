use diesel::prelude::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use uuid::Uuid;

use crate::{
    db::enums::{CycleStatus, MatchStatus, MentorshipStatus, ProgramStatus},
    db::models::matches::{Match, MatchOutcome, NewMatch},
    db::models::mentorship::{Mentorship, NewMentorship},
    db::models::profile::{MenteeProfile, MentorProfile},
    db::models::program::NewProgram,
    db::repositories::cycles::CyclesRepo,
    db::repositories::interests::InterestsRepo,
    db::repositories::matches::MatchesRepo,
    db::repositories::mentorships::MentorshipsRepo,
    db::repositories::profiles::ProfilesRepo,
    db::repositories::programs::ProgramsRepo,
    error::AppError,
    notifications::{NotificationEvent, Notifier},
};

// Sub-score ceilings; together they cap the total at 100.
const SKILL_MATCH_CAP: i32 = 35;
const INDUSTRY_RELEVANCE_CAP: i32 = 20;
const AVAILABILITY_MATCH_CAP: i32 = 20;
const COMMUNICATION_MATCH_CAP: i32 = 15;
const PERSONALITY_FIT_CAP: i32 = 10;
const PERSONALITY_NEUTRAL: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub skill_match: i32,
    pub industry_relevance: i32,
    pub availability_match: i32,
    pub communication_match: i32,
    pub personality_fit: i32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i32 {
        self.skill_match
            + self.industry_relevance
            + self.availability_match
            + self.communication_match
            + self.personality_fit
    }
}

/// A scored mentor x mentee pairing awaiting selection. `mentor_load` and
/// `order` are the documented tie-break keys: a pair generated earlier
/// from a less-loaded mentor wins among equal scores.
#[derive(Debug, Clone)]
pub struct CandidatePair {
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub score: ScoreBreakdown,
    mentor_load: i32,
    order: usize,
}

fn normalize(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

/// Share of `wanted` entries the mentor covers, scaled to `cap`. Integer
/// arithmetic throughout so the same inputs always yield the same score.
fn overlap_score(offered: &[String], wanted: &[String], cap: i32) -> i32 {
    let wanted: BTreeSet<String> = wanted
        .iter()
        .map(|s| normalize(s))
        .filter(|s| !s.is_empty())
        .collect();
    if wanted.is_empty() {
        return 0;
    }
    let offered: HashSet<String> = offered.iter().map(|s| normalize(s)).collect();
    let matched = wanted.iter().filter(|w| offered.contains(*w)).count() as i32;
    cap * matched / wanted.len() as i32
}

fn personality_fit(mentor_traits: &[String], mentee_traits: &[String]) -> i32 {
    // No declared signal on either side: neutral midpoint, not zero.
    if mentor_traits.is_empty() || mentee_traits.is_empty() {
        return PERSONALITY_NEUTRAL;
    }
    overlap_score(mentor_traits, mentee_traits, PERSONALITY_FIT_CAP)
}

/// Pure function of the two profiles; no clock, no randomness. Repeated
/// matching runs over unchanged profiles reproduce identical scores.
pub fn score_pair(mentor: &MentorProfile, mentee: &MenteeProfile) -> ScoreBreakdown {
    let mut wanted_skills = mentee.skills.clone();
    wanted_skills.push(mentee.field_of_interest.clone());

    ScoreBreakdown {
        skill_match: overlap_score(&mentor.themes, &wanted_skills, SKILL_MATCH_CAP),
        industry_relevance: overlap_score(&mentor.industries, &mentee.goals, INDUSTRY_RELEVANCE_CAP),
        availability_match: overlap_score(
            &mentor.weekly_availability,
            &mentee.availability,
            AVAILABILITY_MATCH_CAP,
        ),
        communication_match: overlap_score(
            &mentor.preferred_styles,
            &mentee.preferred_styles,
            COMMUNICATION_MATCH_CAP,
        ),
        personality_fit: personality_fit(&mentor.personality_traits, &mentee.personality_traits),
    }
}

/// Scores every pair, drops those under `min_score` or already rejected in
/// this cycle, and sorts by (score desc, mentor load asc, generation
/// order asc).
pub fn rank_candidates(
    mentors: &[MentorProfile],
    mentees: &[MenteeProfile],
    min_score: i32,
    rejected: &HashSet<(Uuid, Uuid)>,
) -> Vec<CandidatePair> {
    let mut pairs = Vec::new();
    for mentor in mentors {
        for mentee in mentees {
            if rejected.contains(&(mentor.user_id, mentee.user_id)) {
                continue;
            }
            let score = score_pair(mentor, mentee);
            if score.total() < min_score {
                continue;
            }
            pairs.push(CandidatePair {
                mentor_id: mentor.user_id,
                mentee_id: mentee.user_id,
                score,
                mentor_load: mentor.current_mentees,
                order: pairs.len(),
            });
        }
    }
    pairs.sort_by(|a, b| {
        b.score
            .total()
            .cmp(&a.score.total())
            .then(a.mentor_load.cmp(&b.mentor_load))
            .then(a.order.cmp(&b.order))
    });
    pairs
}

/// Greedy walk over the ranked list: a pair is taken only while the mentor
/// has remaining capacity, the mentee is unassigned, and the cycle ceiling
/// has room. `capacity` is decremented in place for the duration of the
/// run.
pub fn select_assignments(
    ranked: Vec<CandidatePair>,
    capacity: &mut HashMap<Uuid, i32>,
    mut slots_left: i64,
) -> Vec<CandidatePair> {
    let mut assigned_mentees: HashSet<Uuid> = HashSet::new();
    let mut selected = Vec::new();
    for pair in ranked {
        if slots_left <= 0 {
            break;
        }
        if assigned_mentees.contains(&pair.mentee_id) {
            continue;
        }
        match capacity.get_mut(&pair.mentor_id) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                assigned_mentees.insert(pair.mentee_id);
                slots_left -= 1;
                selected.push(pair);
            }
            _ => {}
        }
    }
    selected
}

#[derive(Debug, Clone, Copy)]
pub struct MatchingRunParams {
    pub min_score: i32,
    pub auto_approve: bool,
    /// Upper bound on new assignments in one run; a large cycle is worked
    /// through in successive bounded runs, each pair committed atomically.
    pub max_assignments: usize,
}

#[derive(Serialize)]
pub struct AvailablePool {
    pub mentors: Vec<MentorProfile>,
    pub mentees: Vec<MenteeProfile>,
}

pub struct MatchingService;

impl MatchingService {
    /// Automated matching over a cycle's candidate pools. Idempotent: a
    /// second run over unchanged state finds every selected pair already
    /// present and creates nothing.
    pub fn run_automated_matching(
        conn: &mut PgConnection,
        notifier: &Notifier,
        cycle_id: Uuid,
        params: &MatchingRunParams,
    ) -> Result<Vec<MatchOutcome>, AppError> {
        let cycle = CyclesRepo::find_by_id(conn, cycle_id)?
            .ok_or_else(|| AppError::not_found("cycle"))?;
        if cycle.status != CycleStatus::Active {
            return Err(AppError::precondition(
                "matching runs only against an active cycle",
            ));
        }

        let (mentors, mentees) = Self::load_pools(conn, cycle_id)?;
        let rejected: HashSet<(Uuid, Uuid)> = MatchesRepo::rejected_pairs(conn, cycle_id)?
            .into_iter()
            .collect();
        let ranked = rank_candidates(&mentors, &mentees, params.min_score, &rejected);

        let mut capacity: HashMap<Uuid, i32> = mentors
            .iter()
            .map(|m| (m.user_id, m.remaining_capacity()))
            .collect();
        let open = MatchesRepo::count_open_by_cycle(conn, cycle_id)?;
        let slots_left = (cycle.max_mentorships as i64 - open)
            .min(params.max_assignments as i64)
            .max(0);
        let selected = select_assignments(ranked, &mut capacity, slots_left);

        let mut outcomes = Vec::new();
        for pair in &selected {
            match Self::commit_pair(conn, cycle_id, pair, params.auto_approve) {
                Ok(Some((outcome, mentorship))) => {
                    if outcome.created {
                        Self::notify_outcome(notifier, &outcome, mentorship.as_ref());
                    }
                    outcomes.push(outcome);
                }
                // Lost a capacity race since the pool was loaded; the pair
                // is dropped from this run, not an error.
                Ok(None) => {
                    tracing::debug!(mentor_id = %pair.mentor_id, mentee_id = %pair.mentee_id,
                        "skipping pair, mentor filled up mid-run");
                }
                Err(AppError::Conflict { ref message, .. }) => {
                    tracing::debug!(mentor_id = %pair.mentor_id, mentee_id = %pair.mentee_id,
                        %message, "skipping pair lost to a concurrent run");
                }
                Err(other) => return Err(other),
            }
        }

        tracing::info!(cycle_id = %cycle_id, candidates = selected.len(),
            created = outcomes.iter().filter(|o| o.created).count(),
            "automated matching run finished");
        Ok(outcomes)
    }

    /// Direct mentor+mentee assignment for admin tooling. Bypasses scoring
    /// thresholds but never the capacity or uniqueness invariants; the
    /// resulting mentorship starts ACTIVE with its week-1 program.
    pub fn assign(
        conn: &mut PgConnection,
        notifier: &Notifier,
        cycle_id: Uuid,
        mentor_id: Uuid,
        mentee_id: Uuid,
    ) -> Result<MatchOutcome, AppError> {
        let cycle = CyclesRepo::find_by_id(conn, cycle_id)?
            .ok_or_else(|| AppError::not_found("cycle"))?;
        if cycle.status != CycleStatus::Active {
            return Err(AppError::precondition(
                "manual assignment requires an active cycle",
            ));
        }
        let mentor = ProfilesRepo::find_mentor(conn, mentor_id)?
            .ok_or_else(|| AppError::not_found("mentor profile"))?;
        let mentee = ProfilesRepo::find_mentee(conn, mentee_id)?
            .ok_or_else(|| AppError::not_found("mentee profile"))?;

        let open = MatchesRepo::count_open_by_cycle(conn, cycle_id)?;
        if open >= cycle.max_mentorships as i64 {
            return Err(AppError::capacity("cycle is at its mentorship ceiling"));
        }
        if MatchesRepo::find_by_pair(conn, cycle_id, mentor_id, mentee_id)?.is_some() {
            return Err(AppError::conflict_with_code(
                "a match already exists for this mentor and mentee in this cycle",
                None,
                "MATCH_EXISTS",
            ));
        }

        let score = score_pair(&mentor, &mentee);
        let (outcome, mentorship) =
            conn.transaction::<(MatchOutcome, Mentorship), AppError, _>(
                |tx| {
                    if !ProfilesRepo::reserve_slot(tx, mentor_id)? {
                        return Err(AppError::capacity("mentor has no remaining capacity"));
                    }
                    let record =
                        Self::insert_match(tx, cycle_id, mentor_id, mentee_id, &score, true)?;
                    let mentorship = Self::instantiate_mentorship(tx, &record)?;
                    Ok((
                        MatchOutcome {
                            record,
                            created: true,
                        },
                        mentorship,
                    ))
                },
            )?;

        notifier.publish(NotificationEvent::MentorshipActivated {
            mentorship_id: mentorship.id,
            mentor_id,
            mentee_id,
        });
        Ok(outcome)
    }

    /// Pool listing for manual assignment UIs.
    pub fn available(
        conn: &mut PgConnection,
        cycle_id: Option<Uuid>,
    ) -> Result<AvailablePool, AppError> {
        match cycle_id {
            Some(cycle) => {
                CyclesRepo::find_by_id(conn, cycle)?
                    .ok_or_else(|| AppError::not_found("cycle"))?;
                let (mentors, mentees) = Self::load_pools(conn, cycle)?;
                Ok(AvailablePool { mentors, mentees })
            }
            None => {
                let mentors = ProfilesRepo::mentor_pool(conn, &[])?;
                let mentees = ProfilesRepo::mentee_pool(conn, &[])?;
                Ok(AvailablePool { mentors, mentees })
            }
        }
    }

    fn load_pools(
        conn: &mut PgConnection,
        cycle_id: Uuid,
    ) -> Result<(Vec<MentorProfile>, Vec<MenteeProfile>), AppError> {
        use crate::db::enums::InterestRole;

        let mentor_excluded =
            InterestsRepo::disqualified_user_ids(conn, cycle_id, InterestRole::Mentor)?;
        let mentors = ProfilesRepo::mentor_pool(conn, &mentor_excluded)?;

        let mut mentee_excluded =
            InterestsRepo::disqualified_user_ids(conn, cycle_id, InterestRole::Mentee)?;
        mentee_excluded.extend(MatchesRepo::engaged_mentee_ids(conn, cycle_id)?);
        let mentees = ProfilesRepo::mentee_pool(conn, &mentee_excluded)?;

        Ok((mentors, mentees))
    }

    /// One pair, one transaction: reuse-or-create the match row with the
    /// capacity reservation (and, under auto-approve, the mentorship and
    /// week-1 program) inside the same atomic unit.
    fn commit_pair(
        conn: &mut PgConnection,
        cycle_id: Uuid,
        pair: &CandidatePair,
        auto_approve: bool,
    ) -> Result<Option<(MatchOutcome, Option<Mentorship>)>, AppError> {
        conn.transaction::<Option<(MatchOutcome, Option<Mentorship>)>, AppError, _>(|tx| {
            if let Some(existing) =
                MatchesRepo::find_by_pair(tx, cycle_id, pair.mentor_id, pair.mentee_id)?
            {
                return Ok(Some((
                    MatchOutcome {
                        record: existing,
                        created: false,
                    },
                    None,
                )));
            }
            if !ProfilesRepo::reserve_slot(tx, pair.mentor_id)? {
                return Ok(None);
            }
            let record = Self::insert_match(
                tx,
                cycle_id,
                pair.mentor_id,
                pair.mentee_id,
                &pair.score,
                auto_approve,
            )?;
            let mentorship = if auto_approve {
                Some(Self::instantiate_mentorship(tx, &record)?)
            } else {
                None
            };
            Ok(Some((
                MatchOutcome {
                    record,
                    created: true,
                },
                mentorship,
            )))
        })
    }

    fn insert_match(
        tx: &mut PgConnection,
        cycle_id: Uuid,
        mentor_id: Uuid,
        mentee_id: Uuid,
        score: &ScoreBreakdown,
        approved: bool,
    ) -> Result<Match, AppError> {
        let status = if approved {
            MatchStatus::Approved
        } else {
            MatchStatus::Pending
        };
        MatchesRepo::insert(
            tx,
            &NewMatch {
                cycle_id,
                mentor_id,
                mentee_id,
                match_score: score.total(),
                skill_match: score.skill_match,
                industry_relevance: score.industry_relevance,
                availability_match: score.availability_match,
                communication_match: score.communication_match,
                personality_fit: score.personality_fit,
                status,
                mentor_approved: approved,
                mentee_approved: approved,
            },
        )
        .map_err(|e| {
            AppError::on_unique_violation(
                e,
                AppError::conflict_with_code(
                    "match already created for this pair",
                    None,
                    "MATCH_EXISTS",
                ),
            )
        })
    }

    /// PENDING -> ACTIVE with the first program week, for the auto-approve
    /// and manual assignment paths.
    fn instantiate_mentorship(
        tx: &mut PgConnection,
        record: &Match,
    ) -> Result<Mentorship, AppError> {
        let mentorship = MentorshipsRepo::insert(
            tx,
            &NewMentorship {
                match_id: record.id,
                cycle_id: record.cycle_id,
                mentor_id: record.mentor_id,
                mentee_id: record.mentee_id,
                status: MentorshipStatus::Pending,
            },
        )
        .map_err(|e| {
            AppError::on_unique_violation(
                e,
                AppError::conflict_with_code(
                    "mentorship already exists for this match",
                    None,
                    "MENTORSHIP_EXISTS",
                ),
            )
        })?;
        let activated = MentorshipsRepo::activate_if_pending(tx, mentorship.id)?
            .ok_or_else(|| AppError::internal("freshly created mentorship was not pending"))?;
        ProgramsRepo::insert(
            tx,
            &NewProgram {
                mentorship_id: activated.id,
                cycle_id: record.cycle_id,
                week: 1,
                status: ProgramStatus::Active,
            },
        )?;
        Ok(activated)
    }

    fn notify_outcome(notifier: &Notifier, outcome: &MatchOutcome, mentorship: Option<&Mentorship>) {
        match mentorship {
            Some(m) => notifier.publish(NotificationEvent::MentorshipActivated {
                mentorship_id: m.id,
                mentor_id: m.mentor_id,
                mentee_id: m.mentee_id,
            }),
            None => notifier.publish(NotificationEvent::MatchProposed {
                match_id: outcome.record.id,
                mentor_id: outcome.record.mentor_id,
                mentee_id: outcome.record.mentee_id,
                match_score: outcome.record.match_score,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mentor(themes: &[&str], load: i32, cap: i32) -> MentorProfile {
        let now = chrono::Utc::now();
        MentorProfile {
            user_id: Uuid::new_v4(),
            max_mentees: cap,
            current_mentees: load,
            themes: themes.iter().map(|s| s.to_string()).collect(),
            industries: vec!["fintech".to_string()],
            weekly_availability: vec!["mon_evening".to_string(), "wed_evening".to_string()],
            preferred_styles: vec!["pairing".to_string()],
            personality_traits: vec!["patient".to_string()],
            is_verified: true,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn mentee(skills: &[&str], field: &str) -> MenteeProfile {
        let now = chrono::Utc::now();
        MenteeProfile {
            user_id: Uuid::new_v4(),
            field_of_interest: field.to_string(),
            goals: vec!["fintech".to_string()],
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience_level: "junior".to_string(),
            availability: vec!["mon_evening".to_string(), "wed_evening".to_string()],
            preferred_styles: vec!["pairing".to_string()],
            personality_traits: vec!["patient".to_string()],
            commitment_agreed: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn full_overlap_hits_the_cap_exactly() {
        let m = mentor(&["rust", "databases"], 0, 3);
        let e = mentee(&["rust"], "databases");
        let score = score_pair(&m, &e);
        assert_eq!(score.skill_match, 35);
        assert_eq!(score.industry_relevance, 20);
        assert_eq!(score.availability_match, 20);
        assert_eq!(score.communication_match, 15);
        assert_eq!(score.personality_fit, 10);
        assert_eq!(score.total(), 100);
    }

    #[test]
    fn total_is_always_the_sum_of_sub_scores_and_bounded() {
        let m = mentor(&["rust"], 1, 3);
        let e = mentee(&["go", "rust", "kubernetes"], "distributed systems");
        let score = score_pair(&m, &e);
        assert_eq!(
            score.total(),
            score.skill_match
                + score.industry_relevance
                + score.availability_match
                + score.communication_match
                + score.personality_fit
        );
        assert!(score.total() >= 0);
        assert!(score.total() <= 100);
    }

    #[test]
    fn scoring_is_deterministic() {
        let m = mentor(&["rust", "storage"], 2, 4);
        let e = mentee(&["storage"], "rust");
        assert_eq!(score_pair(&m, &e), score_pair(&m, &e));
    }

    #[test]
    fn missing_trait_signal_defaults_to_neutral_midpoint() {
        let mut m = mentor(&["rust"], 0, 1);
        m.personality_traits.clear();
        let e = mentee(&["rust"], "rust");
        assert_eq!(score_pair(&m, &e).personality_fit, PERSONALITY_NEUTRAL);
    }

    #[test]
    fn overlap_ignores_case_and_duplicate_entries() {
        let offered = vec!["Rust".to_string(), "rust".to_string()];
        let wanted = vec!["RUST".to_string(), " rust ".to_string()];
        assert_eq!(overlap_score(&offered, &wanted, 20), 20);
    }

    #[test]
    fn pairs_below_threshold_are_discarded() {
        let m = mentor(&["haskell"], 0, 2);
        let mut e = mentee(&["python"], "machine learning");
        e.goals = vec!["gamedev".to_string()];
        e.availability = vec!["sun_morning".to_string()];
        e.preferred_styles = vec!["async_review".to_string()];
        e.personality_traits = vec!["driven".to_string()];
        let ranked = rank_candidates(
            std::slice::from_ref(&m),
            std::slice::from_ref(&e),
            70,
            &HashSet::new(),
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn rejected_pairs_are_not_reproposed() {
        let m = mentor(&["rust"], 0, 2);
        let e = mentee(&["rust"], "rust");
        let rejected: HashSet<(Uuid, Uuid)> = [(m.user_id, e.user_id)].into_iter().collect();
        let ranked = rank_candidates(
            std::slice::from_ref(&m),
            std::slice::from_ref(&e),
            0,
            &rejected,
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn single_capacity_mentor_takes_only_the_higher_scoring_mentee() {
        let m = mentor(&["rust", "databases"], 0, 1);
        let strong = mentee(&["rust"], "databases");
        let mut weak = mentee(&["rust"], "databases");
        weak.availability = vec!["sun_morning".to_string()];

        let ranked = rank_candidates(
            std::slice::from_ref(&m),
            &[strong.clone(), weak.clone()],
            70,
            &HashSet::new(),
        );
        let mut capacity = HashMap::from([(m.user_id, 1)]);
        let selected = select_assignments(ranked, &mut capacity, 10);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].mentee_id, strong.user_id);
        assert_eq!(capacity[&m.user_id], 0);
    }

    #[test]
    fn mentor_without_remaining_capacity_gets_no_assignment() {
        let m = mentor(&["rust"], 3, 3);
        let e = mentee(&["rust"], "rust");
        let ranked = rank_candidates(
            std::slice::from_ref(&m),
            std::slice::from_ref(&e),
            0,
            &HashSet::new(),
        );
        let mut capacity = HashMap::from([(m.user_id, m.remaining_capacity())]);
        let selected = select_assignments(ranked, &mut capacity, 10);
        assert!(selected.is_empty());
    }

    #[test]
    fn equal_scores_break_ties_toward_the_less_loaded_mentor() {
        let busy = mentor(&["rust", "databases"], 2, 5);
        let idle = mentor(&["rust", "databases"], 0, 5);
        let e = mentee(&["rust"], "databases");

        let ranked = rank_candidates(
            &[busy.clone(), idle.clone()],
            std::slice::from_ref(&e),
            70,
            &HashSet::new(),
        );
        assert_eq!(ranked[0].mentor_id, idle.user_id);

        let mut capacity = HashMap::from([(busy.user_id, 3), (idle.user_id, 5)]);
        let selected = select_assignments(ranked, &mut capacity, 10);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].mentor_id, idle.user_id);
    }

    #[test]
    fn selection_respects_the_cycle_ceiling() {
        let m = mentor(&["rust", "databases"], 0, 5);
        let mentees: Vec<MenteeProfile> =
            (0..4).map(|_| mentee(&["rust"], "databases")).collect();
        let ranked = rank_candidates(std::slice::from_ref(&m), &mentees, 70, &HashSet::new());
        let mut capacity = HashMap::from([(m.user_id, 5)]);
        let selected = select_assignments(ranked, &mut capacity, 2);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn each_mentee_is_assigned_at_most_once() {
        let a = mentor(&["rust", "databases"], 0, 3);
        let b = mentor(&["rust", "databases"], 0, 3);
        let e = mentee(&["rust"], "databases");
        let ranked = rank_candidates(&[a, b], std::slice::from_ref(&e), 0, &HashSet::new());
        assert_eq!(ranked.len(), 2);
        let mut capacity: HashMap<Uuid, i32> =
            ranked.iter().map(|p| (p.mentor_id, 3)).collect();
        let selected = select_assignments(ranked, &mut capacity, 10);
        assert_eq!(selected.len(), 1);
    }
}
