use thiserror::Error;

/// Errors returned by the Nominatim and Overpass clients.
#[derive(Debug, Error)]
pub enum OsmError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("HTTP error! Status: {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A geocoding candidate carried coordinates that do not parse or are out of range.
    #[error("geocoding candidate {place_id} has invalid coordinates ({lat}, {lon})")]
    InvalidCandidate {
        place_id: u64,
        lat: String,
        lon: String,
    },
}

impl OsmError {
    /// HTTP status reported by the upstream service, when there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            OsmError::UnexpectedStatus { status, .. } => Some(*status),
            OsmError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
