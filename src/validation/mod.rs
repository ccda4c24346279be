pub mod cycle;
pub mod evaluation;
pub mod matching;
pub mod program;

use axum::{
    Json,
    async_trait,
    extract::FromRequest,
    http::Request,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON extractor that runs the request DTO's `validator` rules before the
/// handler sees it.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|_| AppError::Validation {
                message: "Invalid JSON format".to_string(),
            })?;

        value.validate().map_err(|errors| {
            let details: Vec<String> = errors
                .field_errors()
                .iter()
                .map(|(field, field_errors)| {
                    let codes: Vec<String> =
                        field_errors.iter().map(|e| e.code.to_string()).collect();
                    format!("{}: {}", field, codes.join(", "))
                })
                .collect();
            AppError::Validation {
                message: format!("Validation failed: {}", details.join("; ")),
            }
        })?;

        Ok(ValidatedJson(value))
    }
}
