use crate::error::AppError;

pub fn validate_ratings(ratings: &[i32]) -> Result<(), AppError> {
    if ratings.iter().any(|r| !(1..=5).contains(r)) {
        return Err(AppError::validation("Ratings must be integers within 1..=5"));
    }
    Ok(())
}
