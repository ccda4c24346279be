use mentorship_backend::db::models::profile::{MenteeProfile, MentorProfile};
use mentorship_backend::services::matching_service::{
    rank_candidates, score_pair, select_assignments,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

fn mentor(themes: &[&str], industries: &[&str], load: i32, cap: i32) -> MentorProfile {
    let now = chrono::Utc::now();
    MentorProfile {
        user_id: Uuid::new_v4(),
        max_mentees: cap,
        current_mentees: load,
        themes: themes.iter().map(|s| s.to_string()).collect(),
        industries: industries.iter().map(|s| s.to_string()).collect(),
        weekly_availability: vec!["tue_evening".to_string()],
        preferred_styles: vec!["one_on_one".to_string()],
        personality_traits: vec!["direct".to_string()],
        is_verified: true,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn mentee(skills: &[&str], goals: &[&str]) -> MenteeProfile {
    let now = chrono::Utc::now();
    MenteeProfile {
        user_id: Uuid::new_v4(),
        field_of_interest: "backend engineering".to_string(),
        goals: goals.iter().map(|s| s.to_string()).collect(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        experience_level: "mid".to_string(),
        availability: vec!["tue_evening".to_string()],
        preferred_styles: vec!["one_on_one".to_string()],
        personality_traits: vec!["direct".to_string()],
        commitment_agreed: true,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn scores_stay_bounded_over_varied_profiles() {
    let mentors = vec![
        mentor(&[], &[], 0, 1),
        mentor(&["rust"], &["fintech"], 1, 2),
        mentor(
            &["rust", "backend engineering", "databases"],
            &["fintech", "healthcare"],
            2,
            5,
        ),
    ];
    let mentees = vec![
        mentee(&[], &[]),
        mentee(&["rust"], &["fintech"]),
        mentee(&["rust", "databases", "kafka"], &["healthcare", "iot"]),
    ];

    for m in &mentors {
        for e in &mentees {
            let score = score_pair(m, e);
            assert!(score.skill_match >= 0 && score.skill_match <= 35);
            assert!(score.industry_relevance >= 0 && score.industry_relevance <= 20);
            assert!(score.availability_match >= 0 && score.availability_match <= 20);
            assert!(score.communication_match >= 0 && score.communication_match <= 15);
            assert!(score.personality_fit >= 0 && score.personality_fit <= 10);
            let total = score.total();
            assert!(total >= 0 && total <= 100);
            assert_eq!(
                total,
                score.skill_match
                    + score.industry_relevance
                    + score.availability_match
                    + score.communication_match
                    + score.personality_fit
            );
        }
    }
}

#[test]
fn ranking_is_reproducible_for_identical_input() {
    let mentors = vec![
        mentor(&["rust", "backend engineering"], &["fintech"], 0, 3),
        mentor(&["rust"], &["fintech"], 1, 2),
    ];
    let mentees = vec![mentee(&["rust"], &["fintech"]), mentee(&["rust"], &[])];

    let first = rank_candidates(&mentors, &mentees, 0, &HashSet::new());
    let second = rank_candidates(&mentors, &mentees, 0, &HashSet::new());
    let keys = |pairs: &[mentorship_backend::services::matching_service::CandidatePair]| {
        pairs
            .iter()
            .map(|p| (p.mentor_id, p.mentee_id, p.score.total()))
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&first), keys(&second));
}

#[test]
fn selection_never_exceeds_any_mentor_capacity() {
    let mentors: Vec<MentorProfile> = (0..3)
        .map(|i| mentor(&["rust", "backend engineering"], &["fintech"], i, 2))
        .collect();
    let mentees: Vec<MenteeProfile> = (0..10)
        .map(|_| mentee(&["rust"], &["fintech"]))
        .collect();

    let ranked = rank_candidates(&mentors, &mentees, 0, &HashSet::new());
    let mut capacity: HashMap<Uuid, i32> = mentors
        .iter()
        .map(|m| (m.user_id, m.remaining_capacity()))
        .collect();
    let selected = select_assignments(ranked, &mut capacity, 100);

    let mut per_mentor: HashMap<Uuid, i32> = HashMap::new();
    let mut seen_mentees: HashSet<Uuid> = HashSet::new();
    for pair in &selected {
        *per_mentor.entry(pair.mentor_id).or_insert(0) += 1;
        assert!(seen_mentees.insert(pair.mentee_id), "mentee assigned twice");
    }
    for m in &mentors {
        let assigned = per_mentor.get(&m.user_id).copied().unwrap_or(0);
        assert!(assigned <= m.remaining_capacity());
    }
    for (_, remaining) in capacity {
        assert!(remaining >= 0);
    }
}

#[test]
fn full_mentor_is_never_selected() {
    let full = mentor(&["rust", "backend engineering"], &["fintech"], 3, 3);
    let mentees = vec![mentee(&["rust"], &["fintech"])];
    let ranked = rank_candidates(std::slice::from_ref(&full), &mentees, 0, &HashSet::new());
    let mut capacity = HashMap::from([(full.user_id, full.remaining_capacity())]);
    let selected = select_assignments(ranked, &mut capacity, 100);
    assert!(selected.is_empty());
}
