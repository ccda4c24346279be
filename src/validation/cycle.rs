use crate::error::AppError;

pub fn validate_create_cycle(
    name: &str,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
    max_mentorships: i32,
) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Cycle name is required"));
    }
    if start_date >= end_date {
        return Err(AppError::validation(
            "Cycle start date must be before its end date",
        ));
    }
    if max_mentorships < 1 {
        return Err(AppError::validation(
            "Cycle capacity must allow at least one mentorship",
        ));
    }
    Ok(())
}
