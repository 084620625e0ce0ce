//! Registration repository for database operations.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    PaymentMethodDb, PaymentStatusDb, RegistrationEntity, RegistrationStatsRow,
    RegistrationWithNamesEntity,
};
use crate::metrics::QueryTimer;

const REGISTRATION_COLUMNS: &str = "id, full_name, birth_date, age, district_id, church_id, \
     payment_status, payment_method, checkin_status, checkin_datetime, checkin_token, \
     registration_date, created_at, updated_at";

/// Optional filters applied to registration listings and reports.
#[derive(Debug, Clone, Default)]
pub struct RegistrationFilter {
    /// Case-insensitive substring match on the full name.
    pub search: Option<String>,
    pub district_id: Option<Uuid>,
    pub church_id: Option<Uuid>,
    pub payment_status: Option<PaymentStatusDb>,
}

impl RegistrationFilter {
    /// ILIKE pattern for the search term, with SQL wildcards escaped.
    fn search_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|s| {
            let escaped = s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
            format!("%{}%", escaped)
        })
    }
}

/// Repository for registration-related database operations.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Creates a new RegistrationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new registration.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        full_name: &str,
        birth_date: NaiveDate,
        age: i32,
        district_id: Uuid,
        church_id: Uuid,
        checkin_token: &str,
    ) -> Result<RegistrationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_registration");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            INSERT INTO registrations (full_name, birth_date, age, district_id, church_id, checkin_token)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {REGISTRATION_COLUMNS}
            "#,
        ))
        .bind(full_name)
        .bind(birth_date)
        .bind(age)
        .bind(district_id)
        .bind(church_id)
        .bind(checkin_token)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a registration by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_id");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM registrations
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List registrations newest first, with district and church names,
    /// applying the given filters and pagination.
    pub async fn list(
        &self,
        filter: &RegistrationFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RegistrationWithNamesEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_registrations");
        let result = sqlx::query_as::<_, RegistrationWithNamesEntity>(
            r#"
            SELECT
                r.id, r.full_name, r.birth_date, r.age,
                r.district_id, d.name AS district_name,
                r.church_id, c.name AS church_name,
                r.payment_status, r.payment_method,
                r.checkin_status, r.checkin_datetime,
                r.registration_date
            FROM registrations r
            JOIN districts d ON r.district_id = d.id
            JOIN churches c ON r.church_id = c.id
            WHERE ($1::text IS NULL OR r.full_name ILIKE $1)
              AND ($2::uuid IS NULL OR r.district_id = $2)
              AND ($3::uuid IS NULL OR r.church_id = $3)
              AND ($4::payment_status IS NULL OR r.payment_status = $4)
            ORDER BY r.created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filter.search_pattern())
        .bind(filter.district_id)
        .bind(filter.church_id)
        .bind(filter.payment_status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count registrations matching the given filters.
    pub async fn count(&self, filter: &RegistrationFilter) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_registrations");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM registrations r
            WHERE ($1::text IS NULL OR r.full_name ILIKE $1)
              AND ($2::uuid IS NULL OR r.district_id = $2)
              AND ($3::uuid IS NULL OR r.church_id = $3)
              AND ($4::payment_status IS NULL OR r.payment_status = $4)
            "#,
        )
        .bind(filter.search_pattern())
        .bind(filter.district_id)
        .bind(filter.church_id)
        .bind(filter.payment_status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Aggregate counters for the management dashboard.
    ///
    /// `free_age_limit` is the inclusive age up to which admission is free.
    pub async fn stats(&self, free_age_limit: i32) -> Result<RegistrationStatsRow, sqlx::Error> {
        let timer = QueryTimer::new("registration_stats");
        let result = sqlx::query_as::<_, RegistrationStatsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE payment_status = 'paid') AS paid,
                COUNT(*) FILTER (WHERE payment_status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE age <= $1) AS free,
                COUNT(*) FILTER (WHERE age > $1) AS payable,
                COUNT(*) FILTER (WHERE checkin_status) AS checked_in
            FROM registrations
            "#,
        )
        .bind(free_age_limit)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a registration's payment status and method.
    ///
    /// Returns the updated row, or None if the registration does not exist.
    pub async fn update_payment(
        &self,
        id: Uuid,
        status: PaymentStatusDb,
        method: Option<PaymentMethodDb>,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_registration_payment");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            UPDATE registrations
            SET payment_status = $2, payment_method = $3, updated_at = now()
            WHERE id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(status)
        .bind(method)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a registration by its check-in token, with district and church
    /// names for the gate display.
    pub async fn find_by_checkin_token(
        &self,
        token: &str,
    ) -> Result<Option<RegistrationWithNamesEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_checkin_token");
        let result = sqlx::query_as::<_, RegistrationWithNamesEntity>(
            r#"
            SELECT
                r.id, r.full_name, r.birth_date, r.age,
                r.district_id, d.name AS district_name,
                r.church_id, c.name AS church_name,
                r.payment_status, r.payment_method,
                r.checkin_status, r.checkin_datetime,
                r.registration_date
            FROM registrations r
            JOIN districts d ON r.district_id = d.id
            JOIN churches c ON r.church_id = c.id
            WHERE r.checkin_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark a registration as checked in at the given time.
    ///
    /// The update only applies if the participant has not checked in yet;
    /// None means the row was already checked in (or does not exist) and the
    /// caller should re-read it to distinguish the two.
    pub async fn confirm_checkin(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("confirm_checkin");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            UPDATE registrations
            SET checkin_status = true, checkin_datetime = $2, updated_at = now()
            WHERE id = $1 AND checkin_status = false
            RETURNING {REGISTRATION_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All registrations matching the filters, ordered by name, for report
    /// export.
    pub async fn report_rows(
        &self,
        filter: &RegistrationFilter,
    ) -> Result<Vec<RegistrationWithNamesEntity>, sqlx::Error> {
        let timer = QueryTimer::new("registration_report_rows");
        let result = sqlx::query_as::<_, RegistrationWithNamesEntity>(
            r#"
            SELECT
                r.id, r.full_name, r.birth_date, r.age,
                r.district_id, d.name AS district_name,
                r.church_id, c.name AS church_name,
                r.payment_status, r.payment_method,
                r.checkin_status, r.checkin_datetime,
                r.registration_date
            FROM registrations r
            JOIN districts d ON r.district_id = d.id
            JOIN churches c ON r.church_id = c.id
            WHERE ($1::text IS NULL OR r.full_name ILIKE $1)
              AND ($2::uuid IS NULL OR r.district_id = $2)
              AND ($3::uuid IS NULL OR r.church_id = $3)
              AND ($4::payment_status IS NULL OR r.payment_status = $4)
            ORDER BY r.full_name
            "#,
        )
        .bind(filter.search_pattern())
        .bind(filter.district_id)
        .bind(filter.church_id)
        .bind(filter.payment_status)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        let filter = RegistrationFilter {
            search: Some("50%_off".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_pattern(), Some("%50\\%\\_off%".to_string()));
    }

    #[test]
    fn test_search_pattern_none_when_no_search() {
        let filter = RegistrationFilter::default();
        assert_eq!(filter.search_pattern(), None);
    }

    #[test]
    fn test_search_pattern_escapes_backslash() {
        let filter = RegistrationFilter {
            search: Some(r"a\b".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_pattern(), Some("%a\\\\b%".to_string()));
    }
}
