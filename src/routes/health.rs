use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::config::AppConfig;
use crate::services::gateway::interface::SubmissionGateway;
use crate::sessions::SessionStore;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(
    store: web::Data<SessionStore>,
    gateway: web::Data<dyn SubmissionGateway>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let timeout = match config.gateway_timeout {
        Some(limit) => format!("timeout {} ms", limit.as_millis()),
        None => "no timeout".to_string(),
    };
    health.services.insert(
        "gateway".to_string(),
        ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("{}, {}", gateway.describe(), timeout)),
        },
    );

    health.services.insert(
        "sessions".to_string(),
        ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("{} active booking sessions", store.len())),
        },
    );

    HttpResponse::Ok().json(health)
}
