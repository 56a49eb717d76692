//! HTTP client for the Overpass API interpreter endpoint.

use bizgap_core::{build_overpass_query, Coordinate, OverpassResponse, SearchRadius};
use reqwest::{header, Client, Url};

use crate::error::OsmError;
use crate::http::{build_client, read_json};

const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Client that POSTs Overpass QL to an interpreter endpoint.
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
}

impl OverpassClient {
    /// Creates a client for the public `overpass-api.de` instance.
    ///
    /// # Errors
    ///
    /// Returns [`OsmError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, OsmError> {
        Self::with_endpoint(user_agent, timeout_secs, DEFAULT_ENDPOINT)
    }

    /// `endpoint` is the full interpreter URL, not a base.
    ///
    /// # Errors
    ///
    /// Returns [`OsmError::Http`] if the client cannot be constructed, or
    /// [`OsmError::InvalidBaseUrl`] if `endpoint` does not parse.
    pub fn with_endpoint(
        user_agent: &str,
        timeout_secs: u64,
        endpoint: &str,
    ) -> Result<Self, OsmError> {
        let client = build_client(user_agent, timeout_secs)?;
        let endpoint = Url::parse(endpoint).map_err(|e| OsmError::InvalidBaseUrl {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, endpoint })
    }

    /// Runs an Overpass QL query and returns the decoded JSON document.
    ///
    /// # Errors
    ///
    /// - [`OsmError::Http`] on network failure or timeout.
    /// - [`OsmError::UnexpectedStatus`] on a non-2xx status (e.g. 429 when
    ///   the public instance is busy; not retried).
    /// - [`OsmError::Deserialize`] if the body is not an `elements` document.
    pub async fn fetch(&self, query: &str) -> Result<OverpassResponse, OsmError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(query.to_owned())
            .send()
            .await?;

        let data: OverpassResponse = read_json(response, "overpass interpreter response").await?;
        tracing::debug!(elements = data.elements.len(), "overpass query complete");
        Ok(data)
    }

    /// Fetches every business-tagged node and way within `radius` of `center`.
    ///
    /// # Errors
    ///
    /// Same as [`OverpassClient::fetch`].
    pub async fn elements_around(
        &self,
        center: Coordinate,
        radius: SearchRadius,
    ) -> Result<OverpassResponse, OsmError> {
        tracing::debug!(%center, radius = radius.metres(), "overpass elements_around");
        self.fetch(&build_overpass_query(center, radius)).await
    }
}
