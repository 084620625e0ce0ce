//! District repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::DistrictEntity;
use crate::metrics::QueryTimer;

/// Repository for district-related database operations.
#[derive(Clone)]
pub struct DistrictRepository {
    pool: PgPool,
}

impl DistrictRepository {
    /// Creates a new DistrictRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all districts ordered by name.
    pub async fn list_all(&self) -> Result<Vec<DistrictEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_districts");
        let result = sqlx::query_as::<_, DistrictEntity>(
            r#"
            SELECT id, name, created_at
            FROM districts
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a new district.
    pub async fn create(&self, name: &str) -> Result<DistrictEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_district");
        let result = sqlx::query_as::<_, DistrictEntity>(
            r#"
            INSERT INTO districts (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a district by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<DistrictEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_district_by_id");
        let result = sqlx::query_as::<_, DistrictEntity>(
            r#"
            SELECT id, name, created_at
            FROM districts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a district by exact name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<DistrictEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_district_by_name");
        let result = sqlx::query_as::<_, DistrictEntity>(
            r#"
            SELECT id, name, created_at
            FROM districts
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
