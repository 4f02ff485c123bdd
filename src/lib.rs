pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;
pub mod sessions;

use actix_web::web;
use std::sync::Arc;

use config::AppConfig;
use services::gateway::interface::SubmissionGateway;
use sessions::SessionStore;

/// Shared application data handed to every worker.
#[derive(Clone)]
pub struct AppState {
    pub store: web::Data<SessionStore>,
    pub gateway: web::Data<dyn SubmissionGateway>,
    pub config: web::Data<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, gateway: Arc<dyn SubmissionGateway>) -> Self {
        Self {
            store: web::Data::new(SessionStore::new(config.policy, config.session_idle)),
            gateway: web::Data::from(gateway),
            config: web::Data::new(config),
        }
    }

    /// Register shared data and all routes.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.store.clone())
            .app_data(self.gateway.clone())
            .app_data(self.config.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _| {
                let message = err.to_string();
                actix_web::error::InternalError::from_response(
                    err,
                    actix_web::HttpResponse::BadRequest()
                        .json(serde_json::json!({ "error": message })),
                )
                .into()
            }));
        routes::configure(cfg);
    }
}
