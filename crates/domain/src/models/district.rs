//! District domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A district grouping several churches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct District {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a district.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateDistrictRequest {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Name must be between 2 and 100 characters"
    ))]
    pub name: String,
}

/// Response for district listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListDistrictsResponse {
    pub data: Vec<District>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_district_request_valid() {
        let request = CreateDistrictRequest {
            name: "Distrito Central".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_district_request_name_too_short() {
        let request = CreateDistrictRequest {
            name: "D".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_district_request_name_too_long() {
        let request = CreateDistrictRequest {
            name: "d".repeat(101),
        };
        assert!(request.validate().is_err());
    }
}
