//! Gate check-in API routes.
//!
//! The gate client scans a participant's QR code and calls these endpoints
//! with the embedded token: first a lookup to show who is arriving, then a
//! confirmation that stamps the arrival time. A token can only be confirmed
//! once.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use domain::models::{CheckinConfirmation, CheckinParticipant};
use tracing::{info, warn};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_checkin_confirmed;
use persistence::repositories::RegistrationRepository;
use shared::token::looks_like_checkin_token;

/// GET /api/v1/checkin/:token
///
/// Look up the participant behind a scanned check-in token.
pub async fn lookup_checkin(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !looks_like_checkin_token(&token) {
        return Err(ApiError::NotFound("Unknown check-in code".to_string()));
    }

    let repo = RegistrationRepository::new(state.pool.clone());
    let row = repo
        .find_by_checkin_token(&token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Unknown check-in code".to_string()))?;

    Ok(Json(CheckinParticipant {
        id: row.id,
        full_name: row.full_name,
        age: row.age,
        district_name: row.district_name,
        church_name: row.church_name,
        checkin_status: row.checkin_status,
        checkin_datetime: row.checkin_datetime,
    }))
}

/// POST /api/v1/checkin/:token/confirm
///
/// Confirm the participant's arrival. Returns 409 if the token was already
/// used, so a double scan at the gate cannot check someone in twice.
pub async fn confirm_checkin(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !looks_like_checkin_token(&token) {
        return Err(ApiError::NotFound("Unknown check-in code".to_string()));
    }

    let repo = RegistrationRepository::new(state.pool.clone());
    let row = repo
        .find_by_checkin_token(&token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Unknown check-in code".to_string()))?;

    let updated = repo.confirm_checkin(row.id, Utc::now()).await?;

    let Some(updated) = updated else {
        // Already checked in, possibly by a concurrent scan of the same
        // code. Re-read for the original stamp since the lookup snapshot
        // may predate it.
        warn!(registration_id = %row.id, "Repeated check-in attempt");
        let stamp = repo
            .find_by_id(row.id)
            .await?
            .and_then(|r| r.checkin_datetime);
        return Err(ApiError::Conflict(match stamp {
            Some(at) => format!("Participant already checked in at {}", at.to_rfc3339()),
            None => "Participant has already checked in".to_string(),
        }));
    };

    let checkin_datetime = updated
        .checkin_datetime
        .ok_or_else(|| ApiError::Internal("Check-in stamp missing after update".to_string()))?;

    record_checkin_confirmed();

    info!(
        registration_id = %updated.id,
        %checkin_datetime,
        "Confirmed check-in"
    );

    Ok(Json(CheckinConfirmation {
        id: updated.id,
        full_name: updated.full_name,
        checkin_datetime,
    }))
}
