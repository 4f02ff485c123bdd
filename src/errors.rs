use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::models::booking::Phase;
use crate::services::gateway::interface::SubmissionError;

/// One failing form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub failures: Vec<FieldError>,
}

impl ValidationError {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.failures.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.failures.iter().any(|f| f.field == field)
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.failures.iter().map(|f| f.field).collect();
        write!(f, "Invalid or missing fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug)]
pub enum BookingError {
    Validation(ValidationError),
    Submission(SubmissionError),
    RoomNotFound(String),
    SessionNotFound(Uuid),
    DraftLocked(Phase),
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::Validation(err) => write!(f, "Validation error: {}", err),
            BookingError::Submission(err) => write!(f, "Submission error: {}", err),
            BookingError::RoomNotFound(id) => write!(f, "Room type not found: {}", id),
            BookingError::SessionNotFound(id) => write!(f, "Booking session not found: {}", id),
            BookingError::DraftLocked(phase) => {
                write!(f, "Booking cannot be edited while {:?}", phase)
            }
        }
    }
}

impl std::error::Error for BookingError {}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        BookingError::Validation(err)
    }
}

impl From<SubmissionError> for BookingError {
    fn from(err: SubmissionError) -> Self {
        BookingError::Submission(err)
    }
}

impl ResponseError for BookingError {
    fn status_code(&self) -> StatusCode {
        match self {
            BookingError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::Submission(SubmissionError::TimedOut(_)) => StatusCode::GATEWAY_TIMEOUT,
            BookingError::Submission(_) => StatusCode::BAD_GATEWAY,
            BookingError::RoomNotFound(_) | BookingError::SessionNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            BookingError::DraftLocked(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            BookingError::Validation(err) => json!({
                "error": self.to_string(),
                "fields": err.failures,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
