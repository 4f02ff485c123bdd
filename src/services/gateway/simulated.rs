use async_trait::async_trait;
use log::debug;
use std::time::Duration;

use super::interface::{SubmissionError, SubmissionGateway};
use crate::models::booking::{BookingDraft, Confirmation};
use crate::models::contact::ContactMessage;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

/// Stand-in backend: waits a fixed delay, then always acknowledges.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl SubmissionGateway for SimulatedGateway {
    async fn submit_booking(&self, draft: &BookingDraft) -> Result<Confirmation, SubmissionError> {
        tokio::time::sleep(self.delay).await;
        let confirmation = Confirmation::new();
        debug!(
            "Simulated booking accepted for room {:?}: {}",
            draft.room_type, confirmation.reference
        );
        Ok(confirmation)
    }

    async fn submit_inquiry(
        &self,
        message: &ContactMessage,
    ) -> Result<Confirmation, SubmissionError> {
        tokio::time::sleep(self.delay).await;
        let confirmation = Confirmation::new();
        debug!(
            "Simulated inquiry accepted ({}): {}",
            message.subject, confirmation.reference
        );
        Ok(confirmation)
    }

    fn describe(&self) -> String {
        format!("simulated, delay {} ms", self.delay.as_millis())
    }
}
