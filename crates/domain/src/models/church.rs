//! Church domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A church belonging to a district.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Church {
    pub id: Uuid,
    pub name: String,
    pub district_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a church.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateChurchRequest {
    #[validate(length(
        min = 2,
        max = 150,
        message = "Name must be between 2 and 150 characters"
    ))]
    pub name: String,

    pub district_id: Uuid,
}

/// Query parameters for church listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListChurchesQuery {
    pub district_id: Option<Uuid>,
}

/// Church with its district name, as listed for selection dropdowns and
/// reports.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ChurchSummary {
    pub id: Uuid,
    pub name: String,
    pub district_id: Uuid,
    pub district_name: String,
    pub created_at: DateTime<Utc>,
}

/// Response for church listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListChurchesResponse {
    pub data: Vec<ChurchSummary>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_church_request_valid() {
        let request = CreateChurchRequest {
            name: "Igreja Central".to_string(),
            district_id: Uuid::new_v4(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_church_request_name_too_short() {
        let request = CreateChurchRequest {
            name: "I".to_string(),
            district_id: Uuid::new_v4(),
        };
        assert!(request.validate().is_err());
    }
}
