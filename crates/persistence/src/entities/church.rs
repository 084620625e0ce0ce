//! Church entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the churches table.
#[derive(Debug, Clone, FromRow)]
pub struct ChurchEntity {
    pub id: Uuid,
    pub name: String,
    pub district_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<ChurchEntity> for domain::models::Church {
    fn from(entity: ChurchEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            district_id: entity.district_id,
            created_at: entity.created_at,
        }
    }
}

/// Church row joined with its district name.
#[derive(Debug, Clone, FromRow)]
pub struct ChurchWithDistrictEntity {
    pub id: Uuid,
    pub name: String,
    pub district_id: Uuid,
    pub district_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChurchWithDistrictEntity> for domain::models::church::ChurchSummary {
    fn from(entity: ChurchWithDistrictEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            district_id: entity.district_id,
            district_name: entity.district_name,
            created_at: entity.created_at,
        }
    }
}
