#![allow(dead_code)]

use actix_web::{web, App};
use actix_cors::Cors;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hotel_booking_api::config::AppConfig;
use hotel_booking_api::models::booking::{BookingDraft, Confirmation};
use hotel_booking_api::models::contact::ContactMessage;
use hotel_booking_api::services::booking_flow::FlowPolicy;
use hotel_booking_api::services::gateway::interface::{SubmissionError, SubmissionGateway};
use hotel_booking_api::AppState;

/// Deterministic gateway: optional delay, optional failure, counts calls.
pub struct FakeGateway {
    pub calls: AtomicUsize,
    delay: Duration,
    fail_with: Option<SubmissionError>,
}

impl FakeGateway {
    pub fn succeeding() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
            fail_with: None,
        }
    }

    pub fn failing(err: SubmissionError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::succeeding()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::succeeding()
        }
    }

    /// Delay the response, success or failure, by `delay`.
    pub fn after(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond(&self) -> Result<Confirmation, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(Confirmation::new()),
        }
    }
}

#[async_trait]
impl SubmissionGateway for FakeGateway {
    async fn submit_booking(&self, _: &BookingDraft) -> Result<Confirmation, SubmissionError> {
        self.respond().await
    }

    async fn submit_inquiry(&self, _: &ContactMessage) -> Result<Confirmation, SubmissionError> {
        self.respond().await
    }
}

pub struct TestApp {
    pub state: AppState,
    pub gateway: Arc<FakeGateway>,
}

impl TestApp {
    pub fn new(gateway: FakeGateway) -> Self {
        Self::with_config(gateway, AppConfig::default())
    }

    pub fn with_policy(gateway: FakeGateway, policy: FlowPolicy) -> Self {
        Self::with_config(
            gateway,
            AppConfig {
                policy,
                ..AppConfig::default()
            },
        )
    }

    pub fn with_config(gateway: FakeGateway, config: AppConfig) -> Self {
        let gateway = Arc::new(gateway);
        let state = AppState::new(config, gateway.clone());
        Self { state, gateway }
    }

    pub fn create_app(&self) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = self.state.clone();
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .configure(move |cfg: &mut web::ServiceConfig| state.configure(cfg))
    }
}

/// Field edits for a complete Deluxe booking, 2024-06-01 to 2024-06-04.
pub fn deluxe_booking_fields() -> Vec<Value> {
    vec![
        json!({"field": "check_in", "value": "2024-06-01"}),
        json!({"field": "check_out", "value": "2024-06-04"}),
        json!({"field": "guests", "value": 2}),
        json!({"field": "room_type", "value": "deluxe"}),
        json!({"field": "name", "value": "Test Guest"}),
        json!({"field": "email", "value": "test@example.com"}),
        json!({"field": "phone", "value": "555-0100"}),
        json!({"field": "special_requests", "value": "Late arrival"}),
        json!({"field": "payment_method", "value": "Credit Card"}),
    ]
}

pub fn contact_message() -> Value {
    json!({
        "name": "Test Guest",
        "email": "test@example.com",
        "subject": "Parking",
        "message": "Is there parking on site?"
    })
}
