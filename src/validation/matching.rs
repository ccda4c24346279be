use crate::error::AppError;

pub fn validate_min_score(min_score: i32) -> Result<(), AppError> {
    if !(0..=100).contains(&min_score) {
        return Err(AppError::validation(
            "Minimum match score must be within 0..=100",
        ));
    }
    Ok(())
}
