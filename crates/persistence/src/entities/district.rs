//! District entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the districts table.
#[derive(Debug, Clone, FromRow)]
pub struct DistrictEntity {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<DistrictEntity> for domain::models::District {
    fn from(entity: DistrictEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            created_at: entity.created_at,
        }
    }
}
