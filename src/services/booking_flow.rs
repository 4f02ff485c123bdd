use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use crate::errors::BookingError;
use crate::models::booking::{BookingDraft, Confirmation, DraftField, PaymentMethod, Phase, Step};
use crate::models::room::RoomType;
use crate::services::catalog_service::CatalogService;
use crate::services::gateway::interface::{SubmissionError, SubmissionGateway};
use crate::services::gateway::with_timeout;
use crate::services::pricing_service::PricingService;
use crate::services::validation;

/// Which checks the flow applies on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowPolicy {
    /// Run the full validation pass before handing the draft to the gateway.
    pub validate_on_submit: bool,
    /// Refuse `advance` while the current step has missing fields.
    pub gate_step_navigation: bool,
}

impl Default for FlowPolicy {
    fn default() -> Self {
        Self {
            validate_on_submit: true,
            gate_step_navigation: false,
        }
    }
}

impl FlowPolicy {
    /// No checks at all: navigation and submission accept incomplete drafts.
    pub fn permissive() -> Self {
        Self {
            validate_on_submit: false,
            gate_step_navigation: false,
        }
    }
}

/// Read-only projection handed to the view layer.
#[derive(Debug, Clone, Serialize)]
pub struct FlowSnapshot {
    pub current_step: u8,
    pub step_title: &'static str,
    pub progress_percent: u8,
    pub phase: Phase,
    pub draft: BookingDraft,
    pub room: Option<&'static RoomType>,
    pub nights: Option<i64>,
    pub total: f64,
    pub confirmation: Option<ConfirmationSummary>,
}

/// Summary shown once the booking is confirmed. Derived from the draft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmationSummary {
    pub reference: Uuid,
    pub received_at: DateTime<Utc>,
    pub room_name: Option<&'static str>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Option<u32>,
    pub payment_method: Option<&'static str>,
    pub total: f64,
}

/// State machine behind the three-step booking wizard.
///
/// `step` and `phase` move independently: the step pointer only changes
/// while editing, and the phase walks Editing -> Submitting -> Confirmed
/// (or back to Editing when the gateway fails).
#[derive(Debug, Clone)]
pub struct BookingFlow {
    step: Step,
    phase: Phase,
    draft: BookingDraft,
    confirmation: Option<Confirmation>,
    policy: FlowPolicy,
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new(FlowPolicy::default())
    }
}

impl BookingFlow {
    pub fn new(policy: FlowPolicy) -> Self {
        Self {
            step: Step::DatesAndRoom,
            phase: Phase::Editing,
            draft: BookingDraft::default(),
            confirmation: None,
            policy,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    pub fn policy(&self) -> FlowPolicy {
        self.policy
    }

    pub fn total(&self) -> f64 {
        PricingService::quote(&self.draft)
    }

    fn ensure_editing(&self) -> Result<(), BookingError> {
        match self.phase {
            Phase::Editing => Ok(()),
            phase => Err(BookingError::DraftLocked(phase)),
        }
    }

    pub fn set_field(&mut self, field: DraftField) -> Result<(), BookingError> {
        self.ensure_editing()?;
        self.draft.apply(field);
        Ok(())
    }

    pub fn select_room_type(&mut self, id: impl Into<String>) -> Result<(), BookingError> {
        self.set_field(DraftField::RoomType(Some(id.into())))
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) -> Result<(), BookingError> {
        self.set_field(DraftField::PaymentMethod(Some(method)))
    }

    /// Move to the next step. Stays put on the last step.
    pub fn advance(&mut self) -> Result<Step, BookingError> {
        self.ensure_editing()?;
        if let Some(next) = self.step.next() {
            if self.policy.gate_step_navigation {
                validation::validate_step(&self.draft, self.step)?;
            }
            self.step = next;
        }
        Ok(self.step)
    }

    /// Move to the previous step. Stays put on the first step.
    pub fn retreat(&mut self) -> Result<Step, BookingError> {
        self.ensure_editing()?;
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        Ok(self.step)
    }

    /// Enter `Submitting` and hand back the payload for the gateway.
    ///
    /// Returns `Ok(None)` when a submission is already in flight or the
    /// booking is confirmed, so a repeated confirm never reaches the gateway.
    pub fn begin_submit(&mut self) -> Result<Option<BookingDraft>, BookingError> {
        if self.phase != Phase::Editing {
            debug!("Ignoring submit while {:?}", self.phase);
            return Ok(None);
        }
        if self.policy.validate_on_submit {
            validation::validate_draft(&self.draft)?;
        }

        self.phase = Phase::Submitting;
        Ok(Some(self.draft.clone()))
    }

    /// Apply the gateway outcome of a submission started with `begin_submit`.
    pub fn finish_submit(
        &mut self,
        outcome: Result<Confirmation, SubmissionError>,
    ) -> Result<Phase, BookingError> {
        if self.phase != Phase::Submitting {
            warn!("Dropping gateway outcome received while {:?}", self.phase);
            return Ok(self.phase);
        }

        match outcome {
            Ok(confirmation) => {
                info!("Booking confirmed: {}", confirmation.reference);
                self.phase = Phase::Confirmed;
                self.confirmation = Some(confirmation);
                Ok(self.phase)
            }
            Err(err) => {
                warn!("Booking submission failed: {}", err);
                self.phase = Phase::Editing;
                Err(err.into())
            }
        }
    }

    /// Submit the draft and wait for the gateway.
    pub async fn submit(
        &mut self,
        gateway: &dyn SubmissionGateway,
        timeout: Option<Duration>,
    ) -> Result<Phase, BookingError> {
        let Some(draft) = self.begin_submit()? else {
            return Ok(self.phase);
        };

        let outcome = with_timeout(gateway.submit_booking(&draft), timeout).await;
        self.finish_submit(outcome)
    }

    /// Start over with an empty draft. Not allowed mid-submission.
    pub fn reset(&mut self) -> Result<(), BookingError> {
        if self.phase == Phase::Submitting {
            return Err(BookingError::DraftLocked(self.phase));
        }

        self.step = Step::DatesAndRoom;
        self.phase = Phase::Editing;
        self.draft = BookingDraft::default();
        self.confirmation = None;
        Ok(())
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        let room = self.draft.room_type.as_deref().and_then(CatalogService::find);
        let total = self.total();

        let confirmation = self.confirmation.as_ref().map(|c| ConfirmationSummary {
            reference: c.reference,
            received_at: c.received_at,
            room_name: room.map(|r| r.display_name),
            check_in: self.draft.check_in,
            check_out: self.draft.check_out,
            guests: self.draft.guests,
            payment_method: self.draft.payment_method.map(|m| m.label()),
            total,
        });

        FlowSnapshot {
            current_step: self.step.number(),
            step_title: self.step.title(),
            progress_percent: self.step.progress_percent(),
            phase: self.phase,
            draft: self.draft.clone(),
            room,
            nights: PricingService::nights(self.draft.check_in, self.draft.check_out),
            total,
            confirmation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::models::contact::ContactMessage;

    struct CountingGateway {
        calls: AtomicUsize,
        fail_with: Option<SubmissionError>,
    }

    impl CountingGateway {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
            }
        }

        fn failing(err: SubmissionError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: Some(err),
            }
        }
    }

    #[async_trait]
    impl SubmissionGateway for CountingGateway {
        async fn submit_booking(&self, _: &BookingDraft) -> Result<Confirmation, SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(Confirmation::new()),
            }
        }

        async fn submit_inquiry(&self, _: &ContactMessage) -> Result<Confirmation, SubmissionError> {
            Ok(Confirmation::new())
        }
    }

    fn filled_flow(policy: FlowPolicy) -> BookingFlow {
        let mut flow = BookingFlow::new(policy);
        for field in [
            DraftField::CheckIn(NaiveDate::from_ymd_opt(2024, 6, 1)),
            DraftField::CheckOut(NaiveDate::from_ymd_opt(2024, 6, 4)),
            DraftField::Guests(Some(2)),
            DraftField::Name("Ada Lovelace".to_string()),
            DraftField::Email("ada@example.com".to_string()),
            DraftField::Phone("555-0100".to_string()),
        ] {
            flow.set_field(field).unwrap();
        }
        flow.select_room_type("deluxe").unwrap();
        flow.select_payment_method(PaymentMethod::CreditCard).unwrap();
        flow
    }

    #[test]
    fn test_initial_state() {
        let flow = BookingFlow::default();
        assert_eq!(flow.step(), Step::DatesAndRoom);
        assert_eq!(flow.phase(), Phase::Editing);
        assert_eq!(flow.draft(), &BookingDraft::default());
        assert_eq!(flow.total(), 0.0);
    }

    #[test]
    fn test_step_pointer_stays_in_bounds() {
        let mut flow = BookingFlow::default();
        assert_eq!(flow.retreat().unwrap(), Step::DatesAndRoom);

        assert_eq!(flow.advance().unwrap(), Step::GuestDetails);
        assert_eq!(flow.advance().unwrap(), Step::Payment);
        assert_eq!(flow.advance().unwrap(), Step::Payment);

        let moves = [false, true, true, false, false, false, true, true, true, true];
        for forward in moves {
            let step = (if forward { flow.advance() } else { flow.retreat() }).unwrap();
            assert!((1..=3).contains(&step.number()));
        }
    }

    #[test]
    fn test_navigation_is_permissive_by_default() {
        let mut flow = BookingFlow::default();
        flow.advance().unwrap();
        flow.advance().unwrap();
        assert_eq!(flow.step(), Step::Payment);
    }

    #[test]
    fn test_gated_navigation_reports_step_fields() {
        let mut flow = BookingFlow::new(FlowPolicy {
            validate_on_submit: true,
            gate_step_navigation: true,
        });

        match flow.advance() {
            Err(BookingError::Validation(err)) => {
                assert!(err.has_field("check_in"));
                assert!(!err.has_field("name"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(flow.step(), Step::DatesAndRoom);
    }

    #[test]
    fn test_begin_submit_is_idempotent() {
        let mut flow = filled_flow(FlowPolicy::default());
        assert!(flow.begin_submit().unwrap().is_some());
        assert_eq!(flow.phase(), Phase::Submitting);
        assert!(flow.begin_submit().unwrap().is_none());
    }

    #[test]
    fn test_edits_are_rejected_while_submitting() {
        let mut flow = filled_flow(FlowPolicy::default());
        flow.begin_submit().unwrap();

        assert!(matches!(
            flow.set_field(DraftField::Name("Someone Else".to_string())),
            Err(BookingError::DraftLocked(Phase::Submitting))
        ));
        assert!(flow.advance().is_err());
        assert!(flow.reset().is_err());
    }

    #[tokio::test]
    async fn test_submit_confirms_and_freezes_draft() {
        let gateway = CountingGateway::ok();
        let mut flow = filled_flow(FlowPolicy::default());

        let phase = flow.submit(&gateway, None).await.unwrap();
        assert_eq!(phase, Phase::Confirmed);
        assert!(flow.confirmation().is_some());

        let before = flow.draft().clone();
        assert!(flow.set_field(DraftField::Guests(Some(5))).is_err());
        assert_eq!(flow.draft(), &before);

        // Second confirm is a no-op
        assert_eq!(flow.submit(&gateway, None).await.unwrap(), Phase::Confirmed);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_confirmation_projection() {
        let gateway = CountingGateway::ok();
        let mut flow = filled_flow(FlowPolicy::default());
        flow.submit(&gateway, None).await.unwrap();

        let snapshot = flow.snapshot();
        let summary = snapshot.confirmation.unwrap();
        assert_eq!(summary.room_name, Some("Deluxe Room"));
        assert_eq!(summary.check_in, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(summary.check_out, NaiveDate::from_ymd_opt(2024, 6, 4));
        assert_eq!(summary.guests, Some(2));
        assert_eq!(summary.total, 600.0);
        assert_eq!(snapshot.nights, Some(3));
    }

    #[tokio::test]
    async fn test_gateway_failure_returns_to_editing() {
        let gateway = CountingGateway::failing(SubmissionError::Unavailable("down".to_string()));
        let mut flow = filled_flow(FlowPolicy::default());
        let before = flow.draft().clone();

        let result = flow.submit(&gateway, None).await;
        assert!(matches!(
            result,
            Err(BookingError::Submission(SubmissionError::Unavailable(_)))
        ));
        assert_eq!(flow.phase(), Phase::Editing);
        assert_eq!(flow.draft(), &before);
        assert!(flow.confirmation().is_none());

        // Retry is allowed after a failure
        assert!(flow.submit(&gateway, None).await.is_err());
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_validation_blocks_incomplete_submit() {
        let gateway = CountingGateway::ok();
        let mut flow = BookingFlow::default();

        let result = flow.submit(&gateway, None).await;
        assert!(matches!(result, Err(BookingError::Validation(_))));
        assert_eq!(flow.phase(), Phase::Editing);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_permissive_policy_submits_incomplete_draft() {
        let gateway = CountingGateway::ok();
        let mut flow = BookingFlow::new(FlowPolicy::permissive());

        assert_eq!(flow.submit(&gateway, None).await.unwrap(), Phase::Confirmed);
        assert_eq!(flow.snapshot().confirmation.unwrap().total, 0.0);
    }

    #[test]
    fn test_reset_after_confirmation() {
        let mut flow = filled_flow(FlowPolicy::default());
        flow.advance().unwrap();
        flow.begin_submit().unwrap();
        flow.finish_submit(Ok(Confirmation::new())).unwrap();

        flow.reset().unwrap();
        assert_eq!(flow.step(), Step::DatesAndRoom);
        assert_eq!(flow.phase(), Phase::Editing);
        assert_eq!(flow.draft(), &BookingDraft::default());
        assert!(flow.snapshot().confirmation.is_none());
    }

    #[test]
    fn test_stale_outcome_is_ignored() {
        let mut flow = BookingFlow::default();
        assert_eq!(flow.finish_submit(Ok(Confirmation::new())).unwrap(), Phase::Editing);
        assert!(flow.confirmation().is_none());
    }
}
