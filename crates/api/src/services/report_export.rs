//! Report export service.
//!
//! Turns registration listings into downloadable CSV or JSON documents for
//! the event organizers. Exports are generated on demand and streamed back
//! in the response, they are never written to disk.
//!
//! JSON exports carry a summary block on top of the rows; CSV exports are
//! the rows alone, one line per participant.

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{PaymentMethod, PaymentStatus, RegistrationSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Report format types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    #[default]
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv; charset=utf-8",
            ReportFormat::Json => "application/json",
        }
    }
}

/// One row of a report, one registered participant.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationReportRow {
    pub full_name: String,
    pub age: i32,
    pub birth_date: NaiveDate,
    pub district: String,
    pub church: String,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub amount_due_cents: i64,
    pub checked_in: bool,
    pub checkin_datetime: Option<DateTime<Utc>>,
    pub registration_date: DateTime<Utc>,
}

impl From<RegistrationSummary> for RegistrationReportRow {
    fn from(summary: RegistrationSummary) -> Self {
        Self {
            full_name: summary.full_name,
            age: summary.age,
            birth_date: summary.birth_date,
            district: summary.district_name,
            church: summary.church_name,
            payment_status: summary.payment_status,
            payment_method: summary.payment_method,
            amount_due_cents: summary.amount_due_cents,
            checked_in: summary.checkin_status,
            checkin_datetime: summary.checkin_datetime,
            registration_date: summary.registration_date,
        }
    }
}

/// Registration counters for the whole report or one district.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegistrationCounters {
    pub total: i64,
    pub paid: i64,
    pub pending: i64,
    pub free: i64,
}

impl RegistrationCounters {
    fn add(&mut self, row: &RegistrationReportRow, free_age_limit: i32) {
        self.total += 1;
        match row.payment_status {
            PaymentStatus::Paid => self.paid += 1,
            PaymentStatus::Pending => self.pending += 1,
        }
        if row.age <= free_age_limit {
            self.free += 1;
        }
    }
}

/// Per-district slice of the general registration report.
#[derive(Debug, Clone, Serialize)]
pub struct DistrictBreakdown {
    pub district: String,
    #[serde(flatten)]
    pub counters: RegistrationCounters,
}

/// Registration report: summary, optional per-district breakdown, rows.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationReport {
    pub summary: RegistrationCounters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub districts: Option<Vec<DistrictBreakdown>>,
    pub rows: Vec<RegistrationReportRow>,
}

/// Build a registration report from its rows.
///
/// The per-district breakdown is only meaningful on the general report, so
/// it is included when `with_breakdown` is set.
pub fn build_registration_report(
    rows: Vec<RegistrationReportRow>,
    free_age_limit: i32,
    with_breakdown: bool,
) -> RegistrationReport {
    let mut summary = RegistrationCounters::default();
    let mut by_district: BTreeMap<String, RegistrationCounters> = BTreeMap::new();

    for row in &rows {
        summary.add(row, free_age_limit);
        if with_breakdown {
            by_district
                .entry(row.district.clone())
                .or_default()
                .add(row, free_age_limit);
        }
    }

    let districts = with_breakdown.then(|| {
        by_district
            .into_iter()
            .map(|(district, counters)| DistrictBreakdown { district, counters })
            .collect()
    });

    RegistrationReport {
        summary,
        districts,
        rows,
    }
}

/// Attendance counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttendanceCounters {
    pub total: i64,
    pub present: i64,
    pub absent: i64,
}

/// Attendance report: who showed up at the gate and who did not.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceReport {
    pub summary: AttendanceCounters,
    pub rows: Vec<RegistrationReportRow>,
}

/// Build an attendance report from registration rows.
pub fn build_attendance_report(rows: Vec<RegistrationReportRow>) -> AttendanceReport {
    let mut summary = AttendanceCounters::default();
    for row in &rows {
        summary.total += 1;
        if row.checked_in {
            summary.present += 1;
        } else {
            summary.absent += 1;
        }
    }

    AttendanceReport { summary, rows }
}

/// Render a report in the requested format. CSV keeps the rows only.
pub fn render<T: Serialize>(
    report: &T,
    rows: &[RegistrationReportRow],
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Json => serde_json::to_string_pretty(report),
        ReportFormat::Csv => Ok(to_csv(rows)),
    }
}

/// Timestamped download filename, e.g. `registrations_20250915143000.csv`.
pub fn filename(prefix: &str, format: ReportFormat) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        Utc::now().format("%Y%m%d%H%M%S"),
        format.extension()
    )
}

/// Convert report rows to CSV.
fn to_csv(rows: &[RegistrationReportRow]) -> String {
    let mut csv = String::new();
    csv.push_str(
        "full_name,age,birth_date,district,church,payment_status,payment_method,amount_due_cents,checked_in,checkin_datetime,registration_date\n",
    );

    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{}\n",
            csv_field(&row.full_name),
            row.age,
            row.birth_date,
            csv_field(&row.district),
            csv_field(&row.church),
            row.payment_status,
            row.payment_method.map(|m| m.as_str()).unwrap_or(""),
            row.amount_due_cents,
            row.checked_in,
            row.checkin_datetime
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default(),
            row.registration_date.to_rfc3339()
        ));
    }

    csv
}

/// Quote a CSV field if it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
