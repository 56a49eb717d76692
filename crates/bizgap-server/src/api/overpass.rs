use axum::{
    extract::{Query, State},
    Extension, Json,
};
use bizgap_core::OverpassResponse;

use crate::middleware::RequestId;

use super::{map_upstream_error, ApiError, ApiResponse, AppState, AreaParams, ResponseMeta};

pub(super) const OVERPASS_FAILURE: &str = "Error fetching data from Overpass API";

/// Returns the raw Overpass elements around a point, unaggregated.
pub(super) async fn elements_around(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<AreaParams>,
) -> Result<Json<ApiResponse<OverpassResponse>>, ApiError> {
    let (center, radius) = params.parse(&req_id.0)?;

    let data = state
        .overpass
        .elements_around(center, radius)
        .await
        .map_err(|e| map_upstream_error(req_id.0.clone(), OVERPASS_FAILURE, &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
