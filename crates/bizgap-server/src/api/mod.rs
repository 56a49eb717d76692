mod analysis;
mod geocode;
mod overpass;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use bizgap_core::{Coordinate, SearchRadius, ThresholdTable};
use bizgap_osm::{NominatimClient, OsmError, OverpassClient};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub nominatim: Arc<NominatimClient>,
    pub overpass: Arc<OverpassClient>,
    pub thresholds: Arc<ThresholdTable>,
    pub geocode_limit: u32,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                detail: None,
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.error.detail = Some(detail.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "validation_error" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Logs an upstream failure and converts it into a 502 carrying the
/// underlying error text.
pub(super) fn map_upstream_error(request_id: String, message: &str, error: &OsmError) -> ApiError {
    tracing::error!(
        error = %error,
        upstream_status = ?error.status(),
        request_id = %request_id,
        "{message}"
    );
    ApiError::new(request_id, "upstream_error", message).with_detail(error.to_string())
}

/// Raw `lat`/`lon`/`radius` query parameters, validated by [`AreaParams::parse`].
#[derive(Debug, Default, Deserialize)]
pub(super) struct AreaParams {
    lat: Option<String>,
    lon: Option<String>,
    radius: Option<String>,
}

impl AreaParams {
    /// Validates the parameters before any upstream call is made.
    pub(super) fn parse(&self, request_id: &str) -> Result<(Coordinate, SearchRadius), ApiError> {
        let (Some(lat), Some(lon), Some(radius)) = (
            non_blank(self.lat.as_deref()),
            non_blank(self.lon.as_deref()),
            non_blank(self.radius.as_deref()),
        )
        else {
            return Err(ApiError::new(
                request_id,
                "validation_error",
                "Missing required parameters",
            ));
        };

        let invalid = |detail: String| {
            ApiError::new(request_id, "validation_error", "Invalid parameters").with_detail(detail)
        };

        let lat = lat
            .parse::<f64>()
            .map_err(|_| invalid(format!("lat '{lat}' is not a number")))?;
        let lon = lon
            .parse::<f64>()
            .map_err(|_| invalid(format!("lon '{lon}' is not a number")))?;
        let radius = radius
            .parse::<u32>()
            .map_err(|_| invalid(format!("radius '{radius}' is not a whole number of metres")))?;

        let center = Coordinate::new(lat, lon).map_err(|e| invalid(e.to_string()))?;
        let radius = SearchRadius::new(radius).map_err(|e| invalid(e.to_string()))?;
        Ok((center, radius))
    }
}

pub(super) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/geocode", get(geocode::geocode))
        .route("/api/v1/overpass", get(overpass::elements_around))
        .route("/api/v1/analysis", get(analysis::analyze_area))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}
