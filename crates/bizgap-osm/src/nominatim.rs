//! HTTP client for the Nominatim place search API.

use reqwest::{Client, Url};

use crate::error::OsmError;
use crate::http::{build_client, read_json};
use crate::types::GeocodeCandidate;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// Client for Nominatim's `search` endpoint.
///
/// Use [`NominatimClient::new`] for the public instance or
/// [`NominatimClient::with_base_url`] to point at a mock server in tests.
pub struct NominatimClient {
    client: Client,
    base_url: Url,
}

impl NominatimClient {
    /// Creates a client for the public Nominatim instance.
    ///
    /// `user_agent` identifies the application, as the service's usage
    /// policy requires.
    ///
    /// # Errors
    ///
    /// Returns [`OsmError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, OsmError> {
        Self::with_base_url(user_agent, timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`OsmError::Http`] if the client cannot be constructed, or
    /// [`OsmError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        user_agent: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, OsmError> {
        let client = build_client(user_agent, timeout_secs)?;

        // Exactly one trailing slash, so joining "search" appends a segment
        // instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| OsmError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Looks up places matching free text, best match first.
    ///
    /// # Errors
    ///
    /// - [`OsmError::Http`] on network failure.
    /// - [`OsmError::UnexpectedStatus`] on a non-2xx status.
    /// - [`OsmError::Deserialize`] if the body is not a list of places.
    pub async fn search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<GeocodeCandidate>, OsmError> {
        let url = self.search_url(query, limit);
        tracing::debug!(%url, "nominatim search");

        let response = self.client.get(url).send().await?;
        let candidates: Vec<GeocodeCandidate> =
            read_json(response, &format!("nominatim search(q={query})")).await?;

        tracing::debug!(query, results = candidates.len(), "nominatim search complete");
        Ok(candidates)
    }

    fn search_url(&self, query: &str, limit: u32) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("search");
        }
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", &limit.to_string());
        url
    }
}
