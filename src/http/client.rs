use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Custom error type for HTTP requests.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("HTTP error: {0} {1}. Response body: {2}")]
    HttpError(Url, u16, String),
    #[error("Error deserializing JSON: {0}")]
    JsonError(String),
    #[error("Other error: {0}")]
    Other(String),
}

/// Builds the shared client used for every gateway call.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, RequestError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| RequestError::Other(e.to_string()))
}

/// Makes a GET request to `path` relative to `base`, decoding the JSON body.
pub async fn get<T: DeserializeOwned>(
    client: &reqwest::Client,
    base: &Url,
    path: &str,                  // API path, relative to base.
    params: &[(&str, String)],   // Query parameters.
) -> Result<T, RequestError> {
    // Construct the URL.
    let mut url = base
        .join(path)
        .map_err(|e| RequestError::Other(e.to_string()))?;
    if !params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
    }

    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| RequestError::Other(e.to_string()))?;

    // Get the response status code.
    let status = response.status();

    // Handle non-success status codes.
    if !status.is_success() {
        let body = response
            .text()
            .await
            .map_err(|e| RequestError::Other(e.to_string()))?;
        log::warn!("{} returned {}: {}", url, status, body);
        return Err(RequestError::HttpError(url, status.as_u16(), body));
    }

    // Deserialize the JSON response.
    response
        .json()
        .await
        .map_err(|e| RequestError::JsonError(e.to_string()))
}
