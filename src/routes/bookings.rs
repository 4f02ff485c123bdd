use actix_web::{rt, web, HttpResponse};
use log::{error, info};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::BookingError;
use crate::models::booking::DraftField;
use crate::services::gateway::interface::{SubmissionError, SubmissionGateway};
use crate::services::gateway::with_timeout;
use crate::sessions::{SessionStore, Settled};

pub async fn create(store: web::Data<SessionStore>) -> HttpResponse {
    let (id, snapshot) = store.create();
    HttpResponse::Created().json(serde_json::json!({
        "session_id": id,
        "booking": snapshot,
    }))
}

pub async fn get_by_id(
    store: web::Data<SessionStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, BookingError> {
    let snapshot = store.snapshot(path.into_inner())?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub async fn set_field(
    store: web::Data<SessionStore>,
    path: web::Path<Uuid>,
    input: web::Json<DraftField>,
) -> Result<HttpResponse, BookingError> {
    let id = path.into_inner();
    let field = input.into_inner();

    let snapshot = store.with_flow(id, |flow| {
        flow.set_field(field)?;
        Ok(flow.snapshot())
    })?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub async fn advance(
    store: web::Data<SessionStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, BookingError> {
    let snapshot = store.with_flow(path.into_inner(), |flow| {
        flow.advance()?;
        Ok(flow.snapshot())
    })?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub async fn retreat(
    store: web::Data<SessionStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, BookingError> {
    let snapshot = store.with_flow(path.into_inner(), |flow| {
        flow.retreat()?;
        Ok(flow.snapshot())
    })?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// Confirm the booking. The session lock is released while the gateway
/// call is pending, so a second confirm sees `Submitting` and does nothing.
///
/// The gateway call runs in its own task and settles the session even if
/// this request is dropped before it completes.
pub async fn submit(
    store: web::Data<SessionStore>,
    gateway: web::Data<dyn SubmissionGateway>,
    config: web::Data<AppConfig>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, BookingError> {
    let id = path.into_inner();

    let Some(draft) = store.with_flow(id, |flow| flow.begin_submit())? else {
        let snapshot = store.snapshot(id)?;
        return Ok(HttpResponse::Ok().json(snapshot));
    };

    info!("Submitting booking session {}", id);
    let timeout = config.gateway_timeout;
    let task_store = store.clone();
    let task = rt::spawn(async move {
        let outcome = with_timeout(gateway.submit_booking(&draft), timeout).await;
        task_store.settle(id, outcome)
    });

    let settled = match task.await {
        Ok(settled) => settled?,
        Err(err) => {
            error!("Submission task for session {} failed: {}", id, err);
            let lost = SubmissionError::Unavailable("submission was interrupted".to_string());
            store.settle(id, Err(lost))?
        }
    };

    match settled {
        Settled::Flow(snapshot) => Ok(HttpResponse::Ok().json(snapshot)),
        Settled::Orphaned(confirmation) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "session_id": id,
            "confirmation": confirmation,
        }))),
    }
}

pub async fn reset(
    store: web::Data<SessionStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, BookingError> {
    let snapshot = store.with_flow(path.into_inner(), |flow| {
        flow.reset()?;
        Ok(flow.snapshot())
    })?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub async fn discard(
    store: web::Data<SessionStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, BookingError> {
    store.remove(path.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
