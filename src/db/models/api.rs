use serde::Serialize;

// Uniform API response envelope
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: &str) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.to_string(),
            data: Some(data),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn created(data: T, message: &str) -> Self {
        Self {
            success: true,
            code: 201,
            message: message.to_string(),
            data: Some(data),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.to_string(),
            data: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn failure(code: u16, error_code: &str, message: &str, field: Option<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.to_string(),
            data: None,
            errors: Some(vec![ErrorDetail {
                field,
                code: error_code.to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::failure(400, "BAD_REQUEST", message, None)
    }

    pub fn not_found(message: &str) -> Self {
        Self::failure(404, "NOT_FOUND", message, None)
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self::failure(409, error_code, message, field)
    }

    pub fn precondition_failed(message: &str) -> Self {
        Self::failure(422, "PRECONDITION_FAILED", message, None)
    }

    pub fn capacity_exceeded(message: &str) -> Self {
        Self::failure(409, "CAPACITY_EXCEEDED", message, None)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::failure(500, "INTERNAL_ERROR", message, None)
    }

}
