//! Church API routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{
    Church, ChurchSummary, CreateChurchRequest, ListChurchesQuery, ListChurchesResponse,
};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::{ChurchRepository, DistrictRepository};

/// GET /api/v1/churches
///
/// List churches ordered by name, optionally filtered by district.
pub async fn list_churches(
    State(state): State<AppState>,
    Query(query): Query<ListChurchesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ChurchRepository::new(state.pool.clone());
    let churches: Vec<ChurchSummary> = repo
        .list(query.district_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let count = churches.len();
    Ok(Json(ListChurchesResponse {
        data: churches,
        count,
    }))
}

/// POST /api/v1/churches
///
/// Create a new church under an existing district. Church names are unique
/// within a district.
pub async fn create_church(
    State(state): State<AppState>,
    Json(request): Json<CreateChurchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let district_repo = DistrictRepository::new(state.pool.clone());
    if district_repo.find_by_id(request.district_id).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "District {} not found",
            request.district_id
        )));
    }

    let repo = ChurchRepository::new(state.pool.clone());
    let name = request.name.trim();

    if repo
        .find_by_name_in_district(name, request.district_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "Church '{}' already exists in this district",
            name
        )));
    }

    let church: Church = repo.create(name, request.district_id).await?.into();

    info!(church_id = %church.id, district_id = %church.district_id, name = %church.name, "Created church");

    Ok((StatusCode::CREATED, Json(church)))
}
