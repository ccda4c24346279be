use chrono::NaiveDate;
use mentorship_backend::validation::{cycle, evaluation, matching, program};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn validate_create_cycle_rules() {
    assert!(cycle::validate_create_cycle("Autumn", date(2026, 9, 1), date(2026, 12, 1), 10).is_ok());
    assert!(cycle::validate_create_cycle(" ", date(2026, 9, 1), date(2026, 12, 1), 10).is_err());
    assert!(cycle::validate_create_cycle("Autumn", date(2026, 12, 1), date(2026, 9, 1), 10).is_err());
    assert!(cycle::validate_create_cycle("Autumn", date(2026, 9, 1), date(2026, 9, 1), 10).is_err());
    assert!(cycle::validate_create_cycle("Autumn", date(2026, 9, 1), date(2026, 12, 1), 0).is_err());
}

#[test]
fn validate_min_score_bounds() {
    assert!(matching::validate_min_score(0).is_ok());
    assert!(matching::validate_min_score(70).is_ok());
    assert!(matching::validate_min_score(100).is_ok());
    assert!(matching::validate_min_score(-1).is_err());
    assert!(matching::validate_min_score(101).is_err());
}

#[test]
fn validate_rating_bounds() {
    assert!(evaluation::validate_ratings(&[1, 3, 5]).is_ok());
    assert!(evaluation::validate_ratings(&[0, 3, 5]).is_err());
    assert!(evaluation::validate_ratings(&[1, 6, 5]).is_err());
    assert!(evaluation::validate_ratings(&[]).is_ok());
}

#[test]
fn validate_task_and_week_rules() {
    assert!(program::validate_task_title("Read the ownership chapter").is_ok());
    assert!(program::validate_task_title("   ").is_err());
    assert!(program::validate_week(1).is_ok());
    assert!(program::validate_week(0).is_err());
    assert!(program::validate_week(-3).is_err());
}
