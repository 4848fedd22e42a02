//! PostgreSQL database layer

use anyhow::{Context, Result};
use cityscout_types::{EventRecord, Location, WeatherDay};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        tracing::info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        tracing::info!("Connection established, running migrations...");

        // Run migrations (inline for simplicity)
        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &PgPool) -> Result<()> {
        // Location cache, one row per search string
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS location (
                search_query TEXT PRIMARY KEY,
                formatted_query TEXT NOT NULL,
                latitude DOUBLE PRECISION NOT NULL,
                longitude DOUBLE PRECISION NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Weather cache, one row per search string and forecast day.
        // The unique constraint is what keeps racing identical misses
        // from piling up duplicate rows.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS weather (
                id BIGSERIAL PRIMARY KEY,
                forecast TEXT NOT NULL,
                time TEXT NOT NULL,
                search_query TEXT NOT NULL,
                UNIQUE (search_query, time)
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Event cache, one row per search string and event link
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS event (
                id BIGSERIAL PRIMARY KEY,
                link TEXT NOT NULL,
                name TEXT NOT NULL,
                event_date TEXT NOT NULL,
                summary TEXT NOT NULL,
                search_query TEXT NOT NULL,
                UNIQUE (search_query, link)
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    // Location operations
    pub async fn get_location(&self, search_query: &str) -> Result<Option<Location>> {
        let row: Option<LocationRow> = sqlx::query_as(
            r#"
            SELECT search_query, formatted_query, latitude, longitude
            FROM location WHERE search_query = $1
            "#,
        )
        .bind(search_query)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }

    pub async fn insert_location(&self, location: &Location) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO location (search_query, formatted_query, latitude, longitude)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (search_query) DO NOTHING
            "#,
        )
        .bind(&location.search_query)
        .bind(&location.formatted_query)
        .bind(location.latitude)
        .bind(location.longitude)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // Weather operations
    pub async fn list_weather(&self, search_query: &str) -> Result<Vec<WeatherDay>> {
        let rows: Vec<WeatherRow> = sqlx::query_as(
            r#"
            SELECT forecast, time, search_query
            FROM weather WHERE search_query = $1
            ORDER BY id
            "#,
        )
        .bind(search_query)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub async fn insert_weather(&self, records: &[WeatherDay]) -> Result<()> {
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO weather (forecast, time, search_query)
                VALUES ($1, $2, $3)
                ON CONFLICT (search_query, time) DO NOTHING
                "#,
            )
            .bind(&record.forecast)
            .bind(&record.time)
            .bind(&record.search_query)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    // Event operations
    pub async fn list_events(&self, search_query: &str) -> Result<Vec<EventRecord>> {
        let rows: Vec<EventRow> = sqlx::query_as(
            r#"
            SELECT link, name, event_date, summary, search_query
            FROM event WHERE search_query = $1
            ORDER BY id
            "#,
        )
        .bind(search_query)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub async fn insert_events(&self, records: &[EventRecord]) -> Result<()> {
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO event (link, name, event_date, summary, search_query)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (search_query, link) DO NOTHING
                "#,
            )
            .bind(&record.link)
            .bind(&record.name)
            .bind(&record.event_date)
            .bind(&record.summary)
            .bind(&record.search_query)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Remove every cached row for a search string so a test starts from
    /// a clean miss.
    #[cfg(test)]
    pub(crate) async fn purge_search_query(&self, search_query: &str) -> Result<()> {
        sqlx::query("DELETE FROM location WHERE search_query = $1")
            .bind(search_query)
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM weather WHERE search_query = $1")
            .bind(search_query)
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM event WHERE search_query = $1")
            .bind(search_query)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct LocationRow {
    search_query: String,
    formatted_query: String,
    latitude: f64,
    longitude: f64,
}

impl From<LocationRow> for Location {
    fn from(r: LocationRow) -> Self {
        Location {
            search_query: r.search_query,
            formatted_query: r.formatted_query,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

#[derive(sqlx::FromRow)]
struct WeatherRow {
    forecast: String,
    time: String,
    search_query: String,
}

impl From<WeatherRow> for WeatherDay {
    fn from(r: WeatherRow) -> Self {
        WeatherDay {
            forecast: r.forecast,
            time: r.time,
            search_query: r.search_query,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    link: String,
    name: String,
    event_date: String,
    summary: String,
    search_query: String,
}

impl From<EventRow> for EventRecord {
    fn from(r: EventRow) -> Self {
        EventRecord {
            link: r.link,
            name: r.name,
            event_date: r.event_date,
            summary: r.summary,
            search_query: r.search_query,
        }
    }
}
