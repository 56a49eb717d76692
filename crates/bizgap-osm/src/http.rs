//! Request plumbing shared by both clients.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::OsmError;

pub(crate) fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client, OsmError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Asserts a 2xx status and parses the body as `T`.
///
/// # Errors
///
/// Returns [`OsmError::UnexpectedStatus`] for non-2xx responses,
/// [`OsmError::Http`] if the body cannot be read, and
/// [`OsmError::Deserialize`] if it does not match `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    context: &str,
) -> Result<T, OsmError> {
    let status = response.status();
    if !status.is_success() {
        return Err(OsmError::UnexpectedStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| OsmError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
