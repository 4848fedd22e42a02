//! Event search by address.

use crate::error::{check_status, ProviderError};
use reqwest::{header, Client};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const EVENTS_API_URL: &str = "https://www.eventbriteapi.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct EventSearchResponse {
    #[serde(default)]
    events: Vec<EventHit>,
}

#[derive(Debug, Deserialize)]
struct EventHit {
    url: String,
    name: Option<EventText>,
    start: EventStart,
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventText {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventStart {
    local: String,
}

/// One event returned by the search API.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundEvent {
    pub url: String,
    pub name: String,
    /// ISO local datetime, e.g. "2018-01-01T19:00:00".
    pub start_local: String,
    pub summary: String,
}

/// Event search API client
#[derive(Debug, Clone)]
pub struct EventsClient {
    base_url: Url,
    client: Arc<Client>,
    token: String,
}

impl EventsClient {
    pub fn new(token: String) -> Result<Self, ProviderError> {
        Self::with_base_url(token, EVENTS_API_URL)
    }

    /// Create a client against a non-default endpoint (tests point this
    /// at a local mock server).
    pub fn with_base_url(token: String, base_url: &str) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: Url::parse(base_url)?,
            client: Arc::new(client),
            token,
        })
    }

    /// Search for events near a formatted address.
    pub async fn search(&self, address: &str) -> Result<Vec<FoundEvent>, ProviderError> {
        tracing::debug!("Searching events near {:?}", address);

        let url = self.base_url.join("v3/events/search")?;
        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .query(&[("location.address", address)])
            .send()
            .await?;
        let response = check_status(response).await?;
        let body: EventSearchResponse = response.json().await?;

        tracing::debug!("Event search returned {} events", body.events.len());
        let found = body
            .events
            .into_iter()
            .map(|hit| FoundEvent {
                url: hit.url,
                name: hit.name.and_then(|n| n.text).unwrap_or_default(),
                start_local: hit.start.local,
                summary: hit.summary.unwrap_or_default(),
            })
            .collect();

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_parses_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/events/search"))
            .and(query_param("location.address", "Seattle, WA, USA"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "events": [{
                    "url": "https://example.com/e/1",
                    "name": {"text": "Night Market"},
                    "start": {"local": "2018-01-01T19:00:00"},
                    "summary": "An evening market."
                }]
            })))
            .mount(&server)
            .await;

        let client = EventsClient::with_base_url("test-token".to_string(), &server.uri()).unwrap();
        let events = client.search("Seattle, WA, USA").await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Night Market");
        assert_eq!(events[0].start_local, "2018-01-01T19:00:00");
        assert_eq!(events[0].summary, "An evening market.");
    }

    #[tokio::test]
    async fn test_search_tolerates_null_name_and_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/events/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "events": [{
                    "url": "https://example.com/e/2",
                    "name": null,
                    "start": {"local": "2018-01-02T10:00:00"},
                    "summary": null
                }]
            })))
            .mount(&server)
            .await;

        let client = EventsClient::with_base_url("test-token".to_string(), &server.uri()).unwrap();
        let events = client.search("anywhere").await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "");
        assert_eq!(events[0].summary, "");
    }

    #[tokio::test]
    async fn test_search_unauthorized_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("NOT_AUTHORIZED"))
            .mount(&server)
            .await;

        let client = EventsClient::with_base_url("bad-token".to_string(), &server.uri()).unwrap();
        let err = client.search("Seattle, WA, USA").await.unwrap_err();

        assert!(matches!(err, ProviderError::Status { .. }));
    }
}
