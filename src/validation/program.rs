use crate::error::AppError;

pub fn validate_task_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Task title is required"));
    }
    Ok(())
}

pub fn validate_week(week: i32) -> Result<(), AppError> {
    if week < 1 {
        return Err(AppError::validation("Week numbering starts at 1"));
    }
    Ok(())
}
