//! Church repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ChurchEntity, ChurchWithDistrictEntity};
use crate::metrics::QueryTimer;

/// Repository for church-related database operations.
#[derive(Clone)]
pub struct ChurchRepository {
    pool: PgPool,
}

impl ChurchRepository {
    /// Creates a new ChurchRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List churches ordered by name, optionally restricted to a district.
    pub async fn list(
        &self,
        district_id: Option<Uuid>,
    ) -> Result<Vec<ChurchWithDistrictEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_churches");
        let result = sqlx::query_as::<_, ChurchWithDistrictEntity>(
            r#"
            SELECT c.id, c.name, c.district_id, d.name AS district_name, c.created_at
            FROM churches c
            JOIN districts d ON c.district_id = d.id
            WHERE ($1::uuid IS NULL OR c.district_id = $1)
            ORDER BY c.name
            "#,
        )
        .bind(district_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a new church under a district.
    pub async fn create(
        &self,
        name: &str,
        district_id: Uuid,
    ) -> Result<ChurchEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_church");
        let result = sqlx::query_as::<_, ChurchEntity>(
            r#"
            INSERT INTO churches (name, district_id)
            VALUES ($1, $2)
            RETURNING id, name, district_id, created_at
            "#,
        )
        .bind(name)
        .bind(district_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a church by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ChurchEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_church_by_id");
        let result = sqlx::query_as::<_, ChurchEntity>(
            r#"
            SELECT id, name, district_id, created_at
            FROM churches
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a church by exact name within a district.
    pub async fn find_by_name_in_district(
        &self,
        name: &str,
        district_id: Uuid,
    ) -> Result<Option<ChurchEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_church_by_name_in_district");
        let result = sqlx::query_as::<_, ChurchEntity>(
            r#"
            SELECT id, name, district_id, created_at
            FROM churches
            WHERE name = $1 AND district_id = $2
            "#,
        )
        .bind(name)
        .bind(district_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
