use log::{info, warn};
use std::time::Duration;

use crate::errors::BookingError;
use crate::models::booking::Confirmation;
use crate::models::contact::{ContactMessage, ContactPhase};
use crate::services::gateway::interface::SubmissionGateway;
use crate::services::gateway::with_timeout;
use crate::services::validation;

/// Contact page form: Editing -> Submitting -> Sent.
#[derive(Debug, Clone)]
pub struct ContactForm {
    phase: ContactPhase,
    message: ContactMessage,
    confirmation: Option<Confirmation>,
}

impl ContactForm {
    pub fn new(message: ContactMessage) -> Self {
        Self {
            phase: ContactPhase::Editing,
            message,
            confirmation: None,
        }
    }

    pub fn phase(&self) -> ContactPhase {
        self.phase
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    pub async fn submit(
        &mut self,
        gateway: &dyn SubmissionGateway,
        timeout: Option<Duration>,
    ) -> Result<ContactPhase, BookingError> {
        if self.phase != ContactPhase::Editing {
            return Ok(self.phase);
        }
        validation::validate_contact(&self.message)?;

        self.phase = ContactPhase::Submitting;
        match with_timeout(gateway.submit_inquiry(&self.message), timeout).await {
            Ok(confirmation) => {
                info!("Contact message sent: {}", confirmation.reference);
                self.phase = ContactPhase::Sent;
                self.confirmation = Some(confirmation);
                Ok(self.phase)
            }
            Err(err) => {
                warn!("Contact message failed: {}", err);
                self.phase = ContactPhase::Editing;
                Err(err.into())
            }
        }
    }
}
