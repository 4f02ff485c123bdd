use regex::Regex;
use std::sync::LazyLock;

use crate::errors::ValidationError;
use crate::models::booking::{BookingDraft, Step};
use crate::models::contact::ContactMessage;
use crate::services::catalog_service::CatalogService;

static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    )
    .ok()
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(email))
}

fn require_text(errors: &mut ValidationError, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, "is required");
    }
}

fn check_email(errors: &mut ValidationError, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, "is required");
    } else if !is_valid_email(value.trim()) {
        errors.push(field, "is not a valid email address");
    }
}

/// Collect failures for the fields collected on one wizard step.
fn collect_step(draft: &BookingDraft, step: Step, errors: &mut ValidationError) {
    match step {
        Step::DatesAndRoom => {
            if draft.check_in.is_none() {
                errors.push("check_in", "is required");
            }
            if draft.check_out.is_none() {
                errors.push("check_out", "is required");
            }
            match draft.guests {
                None => errors.push("guests", "is required"),
                Some(0) => errors.push("guests", "must be at least 1"),
                Some(_) => {}
            }
            match draft.room_type.as_deref() {
                None => errors.push("room_type", "is required"),
                Some(id) if CatalogService::find(id).is_none() => {
                    errors.push("room_type", format!("unknown room type '{}'", id))
                }
                Some(_) => {}
            }
        }
        Step::GuestDetails => {
            require_text(errors, "name", &draft.name);
            check_email(errors, "email", &draft.email);
            require_text(errors, "phone", &draft.phone);
        }
        Step::Payment => {
            if draft.payment_method.is_none() {
                errors.push("payment_method", "is required");
            }
        }
    }
}

pub fn validate_step(draft: &BookingDraft, step: Step) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();
    collect_step(draft, step, &mut errors);
    errors.into_result()
}

/// Full pass over every required field, reporting all failures at once.
pub fn validate_draft(draft: &BookingDraft) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();
    for step in [Step::DatesAndRoom, Step::GuestDetails, Step::Payment] {
        collect_step(draft, step, &mut errors);
    }
    errors.into_result()
}

pub fn validate_contact(message: &ContactMessage) -> Result<(), ValidationError> {
    let mut errors = ValidationError::default();
    require_text(&mut errors, "name", &message.name);
    check_email(&mut errors, "email", &message.email);
    require_text(&mut errors, "subject", &message.subject);
    require_text(&mut errors, "message", &message.message);
    errors.into_result()
}
