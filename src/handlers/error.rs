//! HTTP error responses
//!
//! Maps `CampusEventsError` onto status codes and a `{code, message}` JSON body.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use tracing::error;
use crate::utils::errors::{CampusEventsError, ErrorKind};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

fn error_code(error: &CampusEventsError) -> &'static str {
    match error {
        CampusEventsError::EventNotFound { .. } => "EVENT_NOT_FOUND",
        CampusEventsError::StudentNotFound { .. } => "STUDENT_NOT_FOUND",
        CampusEventsError::RegistrationNotFound { .. } => "REGISTRATION_NOT_FOUND",
        CampusEventsError::FeedbackNotFound { .. } => "FEEDBACK_NOT_FOUND",
        CampusEventsError::DuplicateEmail { .. } => "DUPLICATE_EMAIL",
        CampusEventsError::DuplicateRegistration { .. } => "DUPLICATE_REGISTRATION",
        CampusEventsError::DuplicateFeedback { .. } => "DUPLICATE_FEEDBACK",
        CampusEventsError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
        CampusEventsError::NotRegistered { .. } => "NOT_REGISTERED",
        CampusEventsError::Validation(_) | CampusEventsError::InvalidInput(_) => "VALIDATION_ERROR",
        CampusEventsError::Database(_)
        | CampusEventsError::Migration(_)
        | CampusEventsError::Config(_) => "INTERNAL_SERVER_ERROR",
    }
}

impl From<CampusEventsError> for ApiError {
    fn from(err: CampusEventsError) -> Self {
        let code = error_code(&err);
        match err.kind() {
            ErrorKind::NotFound => Self::new(StatusCode::NOT_FOUND, code, err.to_string()),
            ErrorKind::Validation | ErrorKind::BusinessRule => Self::new(StatusCode::BAD_REQUEST, code, err.to_string()),
            ErrorKind::Infrastructure => {
                error!(error = %err, severity = %err.severity(), "Request failed on infrastructure error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, "An internal error occurred")
            }
        }
    }
}

// Extractor rejections are caller mistakes: a missing field, a wrong type or
// an unparsable path segment all surface as validation errors.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
