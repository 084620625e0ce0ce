//! District API routes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use domain::models::{CreateDistrictRequest, District, ListDistrictsResponse};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::DistrictRepository;

/// GET /api/v1/districts
///
/// List all districts ordered by name.
pub async fn list_districts(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = DistrictRepository::new(state.pool.clone());
    let districts: Vec<District> = repo
        .list_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let count = districts.len();
    Ok(Json(ListDistrictsResponse {
        data: districts,
        count,
    }))
}

/// POST /api/v1/districts
///
/// Create a new district. District names are unique.
pub async fn create_district(
    State(state): State<AppState>,
    Json(request): Json<CreateDistrictRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = DistrictRepository::new(state.pool.clone());
    let name = request.name.trim();

    if repo.find_by_name(name).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "District '{}' already exists",
            name
        )));
    }

    let district: District = repo.create(name).await?.into();

    info!(district_id = %district.id, name = %district.name, "Created district");

    Ok((StatusCode::CREATED, Json(district)))
}
