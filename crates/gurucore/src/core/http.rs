use std::time::Duration;

use crate::core::config::network;
use crate::core::error::FetchError;

/// Builds the HTTP client shared by every script.
///
/// One client per process so connection pools are reused between the
/// Last.fm and affiliation lookups.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(network::USER_AGENT)
        .build()?;
    Ok(client)
}

/// Reads a response body as JSON regardless of the status code.
///
/// Both upstream APIs put their error descriptions in JSON bodies with 4xx
/// statuses, so a non-2xx status is logged and handed to the caller.
pub async fn read_json_body(response: reqwest::Response) -> Result<serde_json::Value, FetchError> {
    let status = response.status();
    if !status.is_success() {
        log::debug!("Upstream {} returned status {}", response.url(), status);
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
