use axum::{
    extract::{Query, State},
    Extension, Json,
};
use bizgap_core::AnalysisReport;

use crate::middleware::RequestId;

use super::overpass::OVERPASS_FAILURE;
use super::{map_upstream_error, ApiError, ApiResponse, AppState, AreaParams, ResponseMeta};

/// Fetches elements around a point and returns counts plus ranked suggestions.
pub(super) async fn analyze_area(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<AreaParams>,
) -> Result<Json<ApiResponse<AnalysisReport>>, ApiError> {
    let (center, radius) = params.parse(&req_id.0)?;

    let data = state
        .overpass
        .elements_around(center, radius)
        .await
        .map_err(|e| map_upstream_error(req_id.0.clone(), OVERPASS_FAILURE, &e))?;

    let report = AnalysisReport::build(&data.elements, &state.thresholds);
    tracing::info!(
        request_id = %req_id.0,
        %center,
        radius = radius.metres(),
        elements = data.elements.len(),
        businesses = report.total_businesses,
        categories = report.total_categories,
        "analysis complete"
    );

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}
