use crate::models::Question;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Success envelope. Failures go through `AppError::into_response`,
/// which produces the matching `{ success: false, error }` shape.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Verdict-phase request body: the original subject, the first phase's
/// questions echoed back, and the positional answers. Missing fields
/// deserialize to empty values and are rejected by validation rather
/// than by the JSON extractor, so the client sees a 400 either way.
#[derive(Debug, Deserialize, Validate)]
pub struct VerdictRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "subject is required"))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "questions are required"))]
    pub questions: Vec<Question>,
    #[serde(default)]
    #[validate(length(min = 1, message = "answers are required"))]
    pub answers: Vec<String>,
}
