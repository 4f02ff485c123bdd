use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::config::AppConfig;
use crate::errors::BookingError;
use crate::models::contact::ContactMessage;
use crate::services::contact_service::ContactForm;
use crate::services::gateway::interface::SubmissionGateway;

pub async fn send_message(
    gateway: web::Data<dyn SubmissionGateway>,
    config: web::Data<AppConfig>,
    input: web::Json<ContactMessage>,
) -> Result<HttpResponse, BookingError> {
    let mut form = ContactForm::new(input.into_inner());
    let phase = form.submit(&**gateway, config.gateway_timeout).await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": phase,
        "confirmation": form.confirmation(),
    })))
}
