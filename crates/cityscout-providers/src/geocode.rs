//! Forward geocoding: convert a search string to coordinates and a
//! formatted address.

use crate::error::{check_status, ProviderError};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const GEOCODE_API_URL: &str = "https://maps.googleapis.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeHit>,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

#[derive(Debug, Deserialize)]
struct Coordinates {
    lat: f64,
    lng: f64,
}

/// The best match for a geocode query.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedAddress {
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Geocoding API client
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    base_url: Url,
    client: Arc<Client>,
    api_key: String,
}

impl GeocodeClient {
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, GEOCODE_API_URL)
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

    /// Resolve a search string to its best-matching address.
    pub async fn geocode(&self, query: &str) -> Result<GeocodedAddress, ProviderError> {
        tracing::debug!("Geocoding {:?}", query);

        let url = self.base_url.join("maps/api/geocode/json")?;
        let response = self
            .client
            .get(url)
            .query(&[("address", query), ("key", &self.api_key)])
            .send()
            .await?;
        let response = check_status(response).await?;
        let body: GeocodeResponse = response.json().await?;

        let hit = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Decode(format!("no geocode results for {:?}", query)))?;

        tracing::debug!("Geocoded {:?} to {:?}", query, hit.formatted_address);
        Ok(GeocodedAddress {
            formatted_address: hit.formatted_address,
            latitude: hit.geometry.location.lat,
            longitude: hit.geometry.location.lng,
        })
    }
}
