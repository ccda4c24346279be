use mentorship_backend::db::enums::{
    CycleStatus, MatchStatus, MentorshipStatus, ProgramStatus, TaskStatus,
};

#[test]
fn cycle_transition_table_is_exactly_forward() {
    let all = [
        CycleStatus::Upcoming,
        CycleStatus::Active,
        CycleStatus::Completed,
    ];
    let allowed = [
        (CycleStatus::Upcoming, CycleStatus::Active),
        (CycleStatus::Active, CycleStatus::Completed),
    ];
    for from in all {
        for to in all {
            assert_eq!(
                from.can_transition(to),
                allowed.contains(&(from, to)),
                "{:?} -> {:?}",
                from,
                to
            );
        }
    }
}

#[test]
fn match_transition_table_resolves_pending_once() {
    let all = [
        MatchStatus::Pending,
        MatchStatus::Approved,
        MatchStatus::Rejected,
    ];
    let allowed = [
        (MatchStatus::Pending, MatchStatus::Approved),
        (MatchStatus::Pending, MatchStatus::Rejected),
    ];
    for from in all {
        for to in all {
            assert_eq!(
                from.can_transition(to),
                allowed.contains(&(from, to)),
                "{:?} -> {:?}",
                from,
                to
            );
        }
    }
}

#[test]
fn mentorship_transition_table_matches_the_lifecycle() {
    let all = [
        MentorshipStatus::Pending,
        MentorshipStatus::Active,
        MentorshipStatus::Completed,
        MentorshipStatus::Cancelled,
    ];
    let allowed = [
        (MentorshipStatus::Pending, MentorshipStatus::Active),
        (MentorshipStatus::Pending, MentorshipStatus::Cancelled),
        (MentorshipStatus::Active, MentorshipStatus::Completed),
        (MentorshipStatus::Active, MentorshipStatus::Cancelled),
    ];
    for from in all {
        for to in all {
            assert_eq!(
                from.can_transition(to),
                allowed.contains(&(from, to)),
                "{:?} -> {:?}",
                from,
                to
            );
        }
    }
}

#[test]
fn program_and_task_tables_only_complete_forward() {
    assert!(ProgramStatus::Active.can_transition(ProgramStatus::Completed));
    assert!(!ProgramStatus::Completed.can_transition(ProgramStatus::Active));

    let all = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];
    let allowed = [
        (TaskStatus::Pending, TaskStatus::InProgress),
        (TaskStatus::Pending, TaskStatus::Completed),
        (TaskStatus::InProgress, TaskStatus::Completed),
    ];
    for from in all {
        for to in all {
            assert_eq!(
                from.can_transition(to),
                allowed.contains(&(from, to)),
                "{:?} -> {:?}",
                from,
                to
            );
        }
    }
}
