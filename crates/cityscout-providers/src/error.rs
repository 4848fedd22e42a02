//! Provider error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid provider URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// Turn a non-success response into `ProviderError::Status`, keeping the
/// body text for the log line.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status { status, body });
    }
    Ok(response)
}
