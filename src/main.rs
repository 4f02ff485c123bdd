use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use env_logger::Env;
use log::info;

use hotel_booking_api::config::AppConfig;
use hotel_booking_api::services::gateway::simulated::SimulatedGateway;
use hotel_booking_api::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    info!("Application starting...");

    let config = AppConfig::from_env();
    info!("Loaded configuration: {:?}", config);

    let gateway = Arc::new(SimulatedGateway::new(config.gateway_delay));
    let bind = (config.host.clone(), config.port);
    let state = AppState::new(config, gateway);

    info!("Starting HTTP server on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .configure(move |cfg| state.configure(cfg))
    })
    .bind(bind)?
    .run()
    .await
}
