//! Daily weather forecast lookup by coordinates.

use crate::error::{check_status, ProviderError};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const FORECAST_API_URL: &str = "https://api.darksky.net";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    data: Vec<ForecastDay>,
}

/// One day of the provider's daily forecast.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastDay {
    /// Unix timestamp (seconds) of the start of the forecast day.
    pub time: i64,
    #[serde(default)]
    pub summary: String,
}

/// Forecast API client
#[derive(Debug, Clone)]
pub struct ForecastClient {
    base_url: Url,
    client: Arc<Client>,
    api_key: String,
}

impl ForecastClient {
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, FORECAST_API_URL)
    }

    /// Create a client against a non-default endpoint (tests point this
    /// at a local mock server).
    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: Url::parse(base_url)?,
            client: Arc::new(client),
            api_key,
        })
    }

    /// Fetch the daily forecast for a coordinate pair.
    pub async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastDay>, ProviderError> {
        tracing::debug!("Fetching forecast for {},{}", latitude, longitude);

        let url = self
            .base_url
            .join(&format!("forecast/{}/{},{}", self.api_key, latitude, longitude))?;
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        let body: ForecastResponse = response.json().await?;

        tracing::debug!("Forecast returned {} days", body.daily.data.len());
        Ok(body.daily.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_daily_forecast_parses_days() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast/test-key/47.6062,-122.3321"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "daily": {
                    "summary": "Rain through the week.",
                    "data": [
                        {"time": 1_514_764_800i64, "summary": "Partly cloudy."},
                        {"time": 1_514_851_200i64, "summary": "Light rain."}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let client = ForecastClient::with_base_url("test-key".to_string(), &server.uri()).unwrap();
        let days = client.daily_forecast(47.6062, -122.3321).await.unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].time, 1_514_764_800);
        assert_eq!(days[0].summary, "Partly cloudy.");
        assert_eq!(days[1].summary, "Light rain.");
    }

    #[tokio::test]
    async fn test_daily_forecast_missing_summary_defaults_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast/test-key/10,20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "daily": {"data": [{"time": 1_514_764_800i64}]}
            })))
            .mount(&server)
            .await;

        let client = ForecastClient::with_base_url("test-key".to_string(), &server.uri()).unwrap();
        let days = client.daily_forecast(10.0, 20.0).await.unwrap();

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].summary, "");
    }

    #[tokio::test]
    async fn test_daily_forecast_unauthorized_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
            .mount(&server)
            .await;

        let client = ForecastClient::with_base_url("bad-key".to_string(), &server.uri()).unwrap();
        let err = client.daily_forecast(10.0, 20.0).await.unwrap_err();

        assert!(matches!(err, ProviderError::Status { .. }));
    }
}
