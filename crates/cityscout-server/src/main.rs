//! CityScout Server
//!
//! Aggregates third-party geolocation, weather, and events data behind a
//! single API, caching every resolved result in PostgreSQL so repeat
//! lookups never leave the building.

mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use cityscout_providers::{EventsClient, ForecastClient, GeocodeClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use services::Resolver;
use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "Starting CityScout Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    // Pick up a local .env before reading the environment
    if dotenvy::dotenv().is_ok() {
        info!("Loaded environment from .env");
    }

    let config = load_config().context("Failed to load configuration")?;
    info!("Config loaded: bind={}", config.bind_address);

    // Initialize PostgreSQL (store and cache in one)
    let db = Arc::new(
        Database::new(&config.database_url)
            .await
            .context("Failed to initialize database")?,
    );

    // Provider clients
    let geocoder =
        GeocodeClient::new(config.geocode_api_key).context("Failed to build geocode client")?;
    let forecast =
        ForecastClient::new(config.weather_api_key).context("Failed to build forecast client")?;
    let events =
        EventsClient::new(config.eventbrite_token).context("Failed to build events client")?;

    let resolver = Arc::new(Resolver::new(db, geocoder, forecast, events));
    let state = AppState { resolver };

    info!("Building HTTP router...");
    let app = router(state);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/location", get(handlers::location::lookup))
        .route("/weather", get(handlers::weather::lookup))
        .route("/events", get(handlers::events::lookup))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Clone)]
struct Config {
    bind_address: String,
    database_url: String,
    geocode_api_key: String,
    weather_api_key: String,
    eventbrite_token: String,
}

fn load_config() -> Result<Config> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let geocode_api_key =
        std::env::var("GEOCODE_API_KEY").context("GEOCODE_API_KEY must be set")?;
    let weather_api_key =
        std::env::var("WEATHER_API_KEY").context("WEATHER_API_KEY must be set")?;
    let eventbrite_token =
        std::env::var("EVENTBRITE_API_KEY").context("EVENTBRITE_API_KEY must be set")?;

    Ok(Config {
        bind_address,
        database_url,
        geocode_api_key,
        weather_api_key,
        eventbrite_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_route_responds_ok() {
        let app = Router::new().route("/health", get(handlers::health));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("send request");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
