//! Report export API routes.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use domain::models::PaymentStatus;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::registrations::{admission_policy, to_summary};
use crate::services::report_export::{
    self, build_attendance_report, build_registration_report, RegistrationReportRow, ReportFormat,
};
use persistence::repositories::{RegistrationFilter, RegistrationRepository};

/// Query parameters for report downloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub format: ReportFormat,
    pub district_id: Option<Uuid>,
    pub church_id: Option<Uuid>,
    pub payment_status: Option<PaymentStatus>,
}

impl ReportQuery {
    fn filter(&self) -> RegistrationFilter {
        RegistrationFilter {
            search: None,
            district_id: self.district_id,
            church_id: self.church_id,
            payment_status: self.payment_status.map(Into::into),
        }
    }
}

/// GET /api/v1/reports/registrations
///
/// Download the registration report, ordered by participant name, as CSV
/// or JSON. The general report (no district or church filter) includes a
/// per-district breakdown.
pub async fn registrations_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = fetch_report_rows(&state, &query).await?;

    let with_breakdown = query.district_id.is_none() && query.church_id.is_none();
    let report = build_registration_report(
        rows,
        state.config.event.free_age_limit,
        with_breakdown,
    );

    info!(
        rows = report.rows.len(),
        format = ?query.format,
        "Exported registrations report"
    );

    download_response(&report, &report.rows, query.format, "registrations")
}

/// GET /api/v1/reports/checkin
///
/// Download the attendance report: every registration with its check-in
/// status, plus present/absent totals.
pub async fn checkin_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = fetch_report_rows(&state, &query).await?;
    let report = build_attendance_report(rows);

    info!(
        rows = report.rows.len(),
        present = report.summary.present,
        format = ?query.format,
        "Exported attendance report"
    );

    download_response(&report, &report.rows, query.format, "checkin")
}

async fn fetch_report_rows(
    state: &AppState,
    query: &ReportQuery,
) -> Result<Vec<RegistrationReportRow>, ApiError> {
    let repo = RegistrationRepository::new(state.pool.clone());
    let policy = admission_policy(state);

    let rows = repo.report_rows(&query.filter()).await?;

    Ok(rows
        .into_iter()
        .map(|row| to_summary(row, &policy).into())
        .collect())
}

fn download_response<T: serde::Serialize>(
    report: &T,
    rows: &[RegistrationReportRow],
    format: ReportFormat,
    prefix: &str,
) -> Result<impl IntoResponse, ApiError> {
    let body = report_export::render(report, rows, format)
        .map_err(|e| ApiError::Internal(format!("Report serialization failed: {}", e)))?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        report_export::filename(prefix, format)
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
