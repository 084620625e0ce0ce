//! Registration entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{PaymentMethod, PaymentStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum that maps to the PostgreSQL `payment_status` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
pub enum PaymentStatusDb {
    Pending,
    Paid,
}

impl From<PaymentStatusDb> for PaymentStatus {
    fn from(db: PaymentStatusDb) -> Self {
        match db {
            PaymentStatusDb::Pending => PaymentStatus::Pending,
            PaymentStatusDb::Paid => PaymentStatus::Paid,
        }
    }
}

impl From<PaymentStatus> for PaymentStatusDb {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Pending => PaymentStatusDb::Pending,
            PaymentStatus::Paid => PaymentStatusDb::Paid,
        }
    }
}

/// Database enum that maps to the PostgreSQL `payment_method` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_method")]
pub enum PaymentMethodDb {
    #[sqlx(rename = "pix")]
    Pix,
    #[sqlx(rename = "dinheiro")]
    Cash,
}

impl From<PaymentMethodDb> for PaymentMethod {
    fn from(db: PaymentMethodDb) -> Self {
        match db {
            PaymentMethodDb::Pix => PaymentMethod::Pix,
            PaymentMethodDb::Cash => PaymentMethod::Cash,
        }
    }
}

impl From<PaymentMethod> for PaymentMethodDb {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Pix => PaymentMethodDb::Pix,
            PaymentMethod::Cash => PaymentMethodDb::Cash,
        }
    }
}

/// Database row mapping for the registrations table.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationEntity {
    pub id: Uuid,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub age: i32,
    pub district_id: Uuid,
    pub church_id: Uuid,
    pub payment_status: PaymentStatusDb,
    pub payment_method: Option<PaymentMethodDb>,
    pub checkin_status: bool,
    pub checkin_datetime: Option<DateTime<Utc>>,
    pub checkin_token: String,
    pub registration_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RegistrationEntity> for domain::models::Registration {
    fn from(entity: RegistrationEntity) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            birth_date: entity.birth_date,
            age: entity.age,
            district_id: entity.district_id,
            church_id: entity.church_id,
            payment_status: entity.payment_status.into(),
            payment_method: entity.payment_method.map(Into::into),
            checkin_status: entity.checkin_status,
            checkin_datetime: entity.checkin_datetime,
            checkin_token: entity.checkin_token,
            registration_date: entity.registration_date,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Registration row joined with district and church names.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationWithNamesEntity {
    pub id: Uuid,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub age: i32,
    pub district_id: Uuid,
    pub district_name: String,
    pub church_id: Uuid,
    pub church_name: String,
    pub payment_status: PaymentStatusDb,
    pub payment_method: Option<PaymentMethodDb>,
    pub checkin_status: bool,
    pub checkin_datetime: Option<DateTime<Utc>>,
    pub registration_date: DateTime<Utc>,
}

/// Aggregate counters over registrations.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationStatsRow {
    pub total: i64,
    pub paid: i64,
    pub pending: i64,
    pub free: i64,
    pub payable: i64,
    pub checked_in: i64,
}
