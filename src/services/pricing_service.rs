use chrono::NaiveDate;

use crate::models::booking::BookingDraft;
use crate::services::catalog_service::CatalogService;

pub struct PricingService;

impl PricingService {
    /// Number of nights between two dates; `None` until both are set.
    /// Reversed or equal dates give zero or negative nights.
    pub fn nights(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> Option<i64> {
        match (check_in, check_out) {
            (Some(check_in), Some(check_out)) => Some((check_out - check_in).num_days()),
            _ => None,
        }
    }

    /// Calculate the stay total (nights x nightly price).
    /// Returns 0 while the room or either date is missing, or the room is unknown.
    pub fn compute_total(
        room_type: Option<&str>,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> f64 {
        let Some(room) = room_type.and_then(CatalogService::find) else {
            return 0.0;
        };

        match Self::nights(check_in, check_out) {
            Some(nights) => nights as f64 * room.nightly_price,
            None => 0.0,
        }
    }

    pub fn quote(draft: &BookingDraft) -> f64 {
        Self::compute_total(draft.room_type.as_deref(), draft.check_in, draft.check_out)
    }
}
