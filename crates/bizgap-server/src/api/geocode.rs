use axum::{
    extract::{Query, State},
    Extension, Json,
};
use bizgap_osm::GeocodeCandidate;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_upstream_error, non_blank, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeParams {
    query: Option<String>,
}

pub(super) async fn geocode(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<ApiResponse<Vec<GeocodeCandidate>>>, ApiError> {
    let Some(query) = non_blank(params.query.as_deref()) else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "Missing query parameter",
        ));
    };

    let candidates = state
        .nominatim
        .search(query, state.geocode_limit)
        .await
        .map_err(|e| map_upstream_error(req_id.0.clone(), "Error fetching geocoding data", &e))?;

    Ok(Json(ApiResponse {
        data: candidates,
        meta: ResponseMeta::new(req_id.0),
    }))
}
