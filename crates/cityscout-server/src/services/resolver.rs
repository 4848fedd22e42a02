//! Cache-aside resolution: check the store first, fetch from the
//! provider on miss, write the normalized records through, return them.

use crate::storage::Database;
use anyhow::Result;
use cityscout_providers::{EventsClient, ForecastClient, GeocodeClient};
use cityscout_types::{EventRecord, Location, WeatherDay};
use std::sync::Arc;
use tracing::{debug, info};

pub struct Resolver {
    db: Arc<Database>,
    geocoder: GeocodeClient,
    forecast: ForecastClient,
    events: EventsClient,
}

impl Resolver {
    pub fn new(
        db: Arc<Database>,
        geocoder: GeocodeClient,
        forecast: ForecastClient,
        events: EventsClient,
    ) -> Self {
        Self {
            db,
            geocoder,
            forecast,
            events,
        }
    }

    /// Resolve a raw search string to a location.
    ///
    /// The stored row is keyed by the search string verbatim, so a repeat
    /// query is a pure database read.
    pub async fn resolve_location(&self, query: &str) -> Result<Location> {
        if let Some(cached) = self.db.get_location(query).await? {
            info!("Serving location for {:?} from the database", query);
            return Ok(cached);
        }

        debug!("Location cache miss for {:?}", query);
        let address = self.geocoder.geocode(query).await?;
        let location = Location::new(
            query.to_string(),
            address.formatted_address,
            address.latitude,
            address.longitude,
        );
        self.db.insert_location(&location).await?;

        Ok(location)
    }

    /// Resolve the daily forecast for an already-resolved location.
    pub async fn resolve_weather(
        &self,
        search_query: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<WeatherDay>> {
        let cached = self.db.list_weather(search_query).await?;
        if !cached.is_empty() {
            info!("Serving weather for {:?} from the database", search_query);
            return Ok(cached);
        }

        debug!("Weather cache miss for {:?}", search_query);
        let days = self.forecast.daily_forecast(latitude, longitude).await?;
        let records: Vec<WeatherDay> = days
            .into_iter()
            .map(|day| WeatherDay::from_daily(day.summary, day.time, search_query.to_string()))
            .collect();
        self.db.insert_weather(&records).await?;

        Ok(records)
    }

    /// Resolve nearby events for an already-resolved location.
    pub async fn resolve_events(
        &self,
        search_query: &str,
        formatted_query: &str,
    ) -> Result<Vec<EventRecord>> {
        let cached = self.db.list_events(search_query).await?;
        if !cached.is_empty() {
            info!("Serving events for {:?} from the database", search_query);
            return Ok(cached);
        }

        debug!("Events cache miss for {:?}", search_query);
        let found = self.events.search(formatted_query).await?;
        let records: Vec<EventRecord> = found
            .into_iter()
            .map(|event| {
                EventRecord::from_search_hit(
                    event.url,
                    event.name,
                    &event.start_local,
                    event.summary,
                    search_query.to_string(),
                )
            })
            .collect();
        self.db.insert_events(&records).await?;

        Ok(records)
    }
}
