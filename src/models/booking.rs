use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "PayPal")]
    PayPal,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }
}

/// The in-progress booking record. Every field may be empty while the
/// guest is still moving through the wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Option<u32>,
    pub room_type: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub special_requests: String,
    pub payment_method: Option<PaymentMethod>,
}

/// A single field edit coming from the booking form.
///
/// Serialized as `{"field": "check_in", "value": "2024-06-01"}`. A `null`
/// or missing `value` clears the field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "FieldEdit")]
pub enum DraftField {
    CheckIn(Option<NaiveDate>),
    CheckOut(Option<NaiveDate>),
    Guests(Option<u32>),
    RoomType(Option<String>),
    Name(String),
    Email(String),
    Phone(String),
    SpecialRequests(String),
    PaymentMethod(Option<PaymentMethod>),
}

#[derive(Deserialize)]
struct FieldEdit {
    field: String,
    #[serde(default)]
    value: Value,
}

fn text(value: Value) -> serde_json::Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        value => serde_json::from_value(value),
    }
}

impl TryFrom<FieldEdit> for DraftField {
    type Error = String;

    fn try_from(edit: FieldEdit) -> Result<Self, Self::Error> {
        let FieldEdit { field, value } = edit;
        let parsed = match field.as_str() {
            "check_in" => serde_json::from_value(value).map(DraftField::CheckIn),
            "check_out" => serde_json::from_value(value).map(DraftField::CheckOut),
            "guests" => serde_json::from_value(value).map(DraftField::Guests),
            "room_type" => serde_json::from_value(value).map(DraftField::RoomType),
            "name" => text(value).map(DraftField::Name),
            "email" => text(value).map(DraftField::Email),
            "phone" => text(value).map(DraftField::Phone),
            "special_requests" => text(value).map(DraftField::SpecialRequests),
            "payment_method" => serde_json::from_value(value).map(DraftField::PaymentMethod),
            other => return Err(format!("unknown field `{}`", other)),
        };
        parsed.map_err(|err| format!("invalid value for `{}`: {}", field, err))
    }
}

impl BookingDraft {
    pub fn apply(&mut self, field: DraftField) {
        match field {
            DraftField::CheckIn(value) => self.check_in = value,
            DraftField::CheckOut(value) => self.check_out = value,
            DraftField::Guests(value) => self.guests = value,
            DraftField::RoomType(value) => self.room_type = value,
            DraftField::Name(value) => self.name = value,
            DraftField::Email(value) => self.email = value,
            DraftField::Phone(value) => self.phone = value,
            DraftField::SpecialRequests(value) => self.special_requests = value,
            DraftField::PaymentMethod(value) => self.payment_method = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Editing,
    Submitting,
    Confirmed,
}

/// Acknowledgment returned by the submission gateway.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confirmation {
    pub reference: Uuid,
    pub received_at: DateTime<Utc>,
}

impl Confirmation {
    pub fn new() -> Self {
        Self {
            reference: Uuid::new_v4(),
            received_at: Utc::now(),
        }
    }
}

impl Default for Confirmation {
    fn default() -> Self {
        Self::new()
    }
}

/// Wizard position. Ordered: Dates & Room, Guest Details, Payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    DatesAndRoom,
    GuestDetails,
    Payment,
}

impl Step {
    pub fn number(&self) -> u8 {
        match self {
            Step::DatesAndRoom => 1,
            Step::GuestDetails => 2,
            Step::Payment => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::DatesAndRoom => "Dates & Room",
            Step::GuestDetails => "Guest Details",
            Step::Payment => "Payment",
        }
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::DatesAndRoom => Some(Step::GuestDetails),
            Step::GuestDetails => Some(Step::Payment),
            Step::Payment => None,
        }
    }

    pub fn previous(&self) -> Option<Step> {
        match self {
            Step::DatesAndRoom => None,
            Step::GuestDetails => Some(Step::DatesAndRoom),
            Step::Payment => Some(Step::GuestDetails),
        }
    }

    /// Width of the progress bar: 0, 50 or 100.
    pub fn progress_percent(&self) -> u8 {
        (self.number() - 1) * 50
    }
}
