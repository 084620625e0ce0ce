//! Registration domain models.
//!
//! A registration is one participant signed up for the event: personal data,
//! district/church affiliation, payment state, and the check-in token that
//! the participant presents as a QR code at the gate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use shared::pagination::PageParams;

/// Payment state of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a confirmed payment was made.
///
/// Wire and database values keep the original Portuguese terms
/// (`pix`, `dinheiro`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "pix")]
    Pix,
    #[serde(rename = "dinheiro")]
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::Cash => "dinheiro",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pix" => Ok(PaymentMethod::Pix),
            "dinheiro" => Ok(PaymentMethod::Cash),
            _ => Err(format!("Invalid payment method: {}", s)),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A participant registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Registration {
    pub id: Uuid,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub age: i32,
    pub district_id: Uuid,
    pub church_id: Uuid,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub checkin_status: bool,
    pub checkin_datetime: Option<DateTime<Utc>>,
    pub checkin_token: String,
    pub registration_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_full_name_field(name: &str) -> Result<(), ValidationError> {
    shared::validation::validate_full_name(name)
}

fn validate_birth_date_field(birth_date: &NaiveDate) -> Result<(), ValidationError> {
    shared::validation::validate_birth_date(*birth_date)
}

/// Request payload for creating a registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateRegistrationRequest {
    #[validate(custom(function = "validate_full_name_field"))]
    pub full_name: String,

    #[validate(custom(function = "validate_birth_date_field"))]
    pub birth_date: NaiveDate,

    pub district_id: Uuid,
    pub church_id: Uuid,
}

/// A registration as returned by list endpoints, with resolved district and
/// church names and the computed admission fee.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegistrationSummary {
    pub id: Uuid,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub age: i32,
    pub district_id: Uuid,
    pub district_name: String,
    pub church_id: Uuid,
    pub church_name: String,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub checkin_status: bool,
    pub checkin_datetime: Option<DateTime<Utc>>,
    pub amount_due_cents: i64,
    pub registration_date: DateTime<Utc>,
}

/// Response for a newly created registration.
///
/// This is the only place the check-in token leaves the server; the client
/// renders it as the participant's QR code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateRegistrationResponse {
    pub id: Uuid,
    pub full_name: String,
    pub age: i32,
    pub district_id: Uuid,
    pub church_id: Uuid,
    pub payment_status: PaymentStatus,
    pub amount_due_cents: i64,
    pub checkin_token: String,
    pub registration_date: DateTime<Utc>,
}

/// Query parameters for registration listing.
///
/// Pagination fields are inlined rather than flattened because query-string
/// deserialization cannot type-hint through `#[serde(flatten)]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRegistrationsQuery {
    /// Case-insensitive substring match on the full name.
    pub search: Option<String>,
    pub district_id: Option<Uuid>,
    pub church_id: Option<Uuid>,
    pub payment_status: Option<PaymentStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListRegistrationsQuery {
    pub fn page(&self) -> PageParams {
        PageParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Response for registration listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListRegistrationsResponse {
    pub data: Vec<RegistrationSummary>,
    pub count: usize,
    /// Total rows matching the filters, ignoring pagination.
    pub total: i64,
}

/// Request payload for updating a registration's payment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdatePaymentRequest {
    pub status: PaymentStatus,
    pub method: Option<PaymentMethod>,
}

/// Response after a payment update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdatePaymentResponse {
    pub id: Uuid,
    pub full_name: String,
    pub age: i32,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub amount_due_cents: i64,
}

/// Aggregate counters shown on the management dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegistrationStats {
    pub total: i64,
    pub paid: i64,
    pub pending: i64,
    /// Registrations under the free-admission age limit.
    pub free: i64,
    /// Registrations that owe the admission fee.
    pub payable: i64,
    pub checked_in: i64,
}

/// Participant summary shown after scanning a check-in QR code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckinParticipant {
    pub id: Uuid,
    pub full_name: String,
    pub age: i32,
    pub district_name: String,
    pub church_name: String,
    pub checkin_status: bool,
    pub checkin_datetime: Option<DateTime<Utc>>,
}

/// Response after confirming a check-in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckinConfirmation {
    pub id: Uuid,
    pub full_name: String,
    pub checkin_datetime: DateTime<Utc>,
}
