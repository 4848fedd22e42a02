//! CityScout Providers - clients for the external data sources
//!
//! Thin typed wrappers over the geocoding, forecast, and event-search
//! APIs. Each client holds its credential and a base URL that tests can
//! point at a local mock server.

pub mod error;
pub mod events;
pub mod forecast;
pub mod geocode;

pub use error::ProviderError;
pub use events::{EventsClient, FoundEvent};
pub use forecast::{ForecastClient, ForecastDay};
pub use geocode::{GeocodeClient, GeocodedAddress};
