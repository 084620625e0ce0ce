//! Registration API routes.
//!
//! Covers the public registration form, the management listing with
//! filters, dashboard statistics, and payment confirmation.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use domain::models::{
    CreateRegistrationRequest, CreateRegistrationResponse, ListRegistrationsQuery,
    ListRegistrationsResponse, PaymentStatus, RegistrationStats, RegistrationSummary,
    UpdatePaymentRequest, UpdatePaymentResponse,
};
use domain::services::pricing::AdmissionPolicy;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_registration_created;
use persistence::entities::RegistrationWithNamesEntity;
use persistence::repositories::{
    ChurchRepository, DistrictRepository, RegistrationFilter, RegistrationRepository,
};
use shared::token::generate_checkin_token;
use shared::validation::current_age;

/// Admission policy for the running event edition.
pub(crate) fn admission_policy(state: &AppState) -> AdmissionPolicy {
    AdmissionPolicy::new(state.config.event.fee_cents, state.config.event.free_age_limit)
}

/// Maps a joined registration row to its API summary, pricing it under the
/// given policy.
pub(crate) fn to_summary(
    entity: RegistrationWithNamesEntity,
    policy: &AdmissionPolicy,
) -> RegistrationSummary {
    let amount_due_cents = if entity.payment_status == persistence::entities::PaymentStatusDb::Paid
    {
        0
    } else {
        policy.amount_due_cents(entity.age)
    };

    RegistrationSummary {
        id: entity.id,
        full_name: entity.full_name,
        birth_date: entity.birth_date,
        age: entity.age,
        district_id: entity.district_id,
        district_name: entity.district_name,
        church_id: entity.church_id,
        church_name: entity.church_name,
        payment_status: entity.payment_status.into(),
        payment_method: entity.payment_method.map(Into::into),
        checkin_status: entity.checkin_status,
        checkin_datetime: entity.checkin_datetime,
        amount_due_cents,
        registration_date: entity.registration_date,
    }
}

/// POST /api/v1/registrations
///
/// Register a participant for the event. Age is computed server-side from
/// the birth date; children within the free-admission limit owe nothing.
pub async fn create_registration(
    State(state): State<AppState>,
    Json(request): Json<CreateRegistrationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    // Deployments can tighten the name limit below the built-in cap
    let max_name_chars = state.config.limits.max_full_name_length;
    if request.full_name.trim().chars().count() > max_name_chars {
        return Err(ApiError::Validation(format!(
            "full_name: Full name must have at most {} characters",
            max_name_chars
        )));
    }

    if let Some(deadline) = state.config.event.registration_deadline {
        if Utc::now() > deadline {
            warn!(%deadline, "Rejected registration after deadline");
            return Err(ApiError::Conflict(
                "Registrations for this event are closed".to_string(),
            ));
        }
    }

    let district_repo = DistrictRepository::new(state.pool.clone());
    if district_repo.find_by_id(request.district_id).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "District {} not found",
            request.district_id
        )));
    }

    let church_repo = ChurchRepository::new(state.pool.clone());
    let church = church_repo
        .find_by_id(request.church_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Church {} not found", request.church_id)))?;

    if church.district_id != request.district_id {
        return Err(ApiError::Validation(
            "Church does not belong to the selected district".to_string(),
        ));
    }

    let age = current_age(request.birth_date);
    let policy = admission_policy(&state);
    let token = generate_checkin_token();

    let repo = RegistrationRepository::new(state.pool.clone());
    let registration = repo
        .create(
            request.full_name.trim(),
            request.birth_date,
            age,
            request.district_id,
            request.church_id,
            &token,
        )
        .await?;

    record_registration_created();

    info!(
        registration_id = %registration.id,
        age = registration.age,
        district_id = %registration.district_id,
        church_id = %registration.church_id,
        free = policy.is_free(registration.age),
        "Created registration"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateRegistrationResponse {
            id: registration.id,
            full_name: registration.full_name,
            age: registration.age,
            district_id: registration.district_id,
            church_id: registration.church_id,
            payment_status: registration.payment_status.into(),
            amount_due_cents: policy.amount_due_cents(registration.age),
            checkin_token: registration.checkin_token,
            registration_date: registration.registration_date,
        }),
    ))
}

/// GET /api/v1/registrations
///
/// List registrations newest first, with optional name search and
/// district/church/payment filters.
pub async fn list_registrations(
    State(state): State<AppState>,
    Query(query): Query<ListRegistrationsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = RegistrationRepository::new(state.pool.clone());
    let policy = admission_policy(&state);

    let filter = RegistrationFilter {
        search: query.search.clone(),
        district_id: query.district_id,
        church_id: query.church_id,
        payment_status: query.payment_status.map(Into::into),
    };

    let page = query.page();
    let limit = page.limit().min(state.config.limits.max_page_size as i64);
    let offset = page.offset();

    let rows = repo.list(&filter, limit, offset).await?;
    let total = repo.count(&filter).await?;

    let data: Vec<RegistrationSummary> =
        rows.into_iter().map(|row| to_summary(row, &policy)).collect();

    let count = data.len();
    Ok(Json(ListRegistrationsResponse { data, count, total }))
}

/// GET /api/v1/registrations/stats
///
/// Aggregate counters for the management dashboard.
pub async fn registration_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = RegistrationRepository::new(state.pool.clone());
    let row = repo.stats(state.config.event.free_age_limit).await?;

    Ok(Json(RegistrationStats {
        total: row.total,
        paid: row.paid,
        pending: row.pending,
        free: row.free,
        payable: row.payable,
        checked_in: row.checked_in,
    }))
}

/// PATCH /api/v1/registrations/:id/payment
///
/// Confirm or revert a registration's payment. Marking a registration paid
/// requires a payment method; reverting to pending clears the method.
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.status == PaymentStatus::Paid && request.method.is_none() {
        return Err(ApiError::Validation(
            "A payment method is required to confirm a payment".to_string(),
        ));
    }

    let repo = RegistrationRepository::new(state.pool.clone());
    let policy = admission_policy(&state);

    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Registration {} not found", id)))?;

    if request.status == PaymentStatus::Paid && policy.is_free(existing.age) {
        return Err(ApiError::Conflict(
            "Free registrations have no payment to confirm".to_string(),
        ));
    }

    // Pending never carries a method
    let method = match request.status {
        PaymentStatus::Paid => request.method,
        PaymentStatus::Pending => None,
    };

    let updated = repo
        .update_payment(id, request.status.into(), method.map(Into::into))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Registration {} not found", id)))?;

    info!(
        registration_id = %updated.id,
        payment_status = %PaymentStatus::from(updated.payment_status),
        "Updated registration payment"
    );

    Ok(Json(UpdatePaymentResponse {
        id: updated.id,
        full_name: updated.full_name,
        age: updated.age,
        payment_status: updated.payment_status.into(),
        payment_method: updated.payment_method.map(Into::into),
        amount_due_cents: match updated.payment_status.into() {
            PaymentStatus::Paid => 0,
            PaymentStatus::Pending => policy.amount_due_cents(updated.age),
        },
    }))
}
