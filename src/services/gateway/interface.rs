use async_trait::async_trait;
use std::time::Duration;

use crate::models::booking::{BookingDraft, Confirmation};
use crate::models::contact::ContactMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    Rejected(String),
    Unavailable(String),
    TimedOut(Duration),
}

impl std::fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionError::Rejected(reason) => write!(f, "Submission rejected: {}", reason),
            SubmissionError::Unavailable(reason) => {
                write!(f, "Submission backend unavailable: {}", reason)
            }
            SubmissionError::TimedOut(after) => {
                write!(f, "Submission timed out after {} ms", after.as_millis())
            }
        }
    }
}

impl std::error::Error for SubmissionError {}

/// Backend that accepts completed bookings and contact messages.
///
/// Each call is a single attempt; retries are left to the caller.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit_booking(&self, draft: &BookingDraft) -> Result<Confirmation, SubmissionError>;
    async fn submit_inquiry(
        &self,
        message: &ContactMessage,
    ) -> Result<Confirmation, SubmissionError>;

    fn describe(&self) -> String {
        "custom gateway".to_string()
    }
}
