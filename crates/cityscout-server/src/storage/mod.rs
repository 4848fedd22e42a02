//! Storage layer
//!
//! PostgreSQL is both the system of record and the cache: rows written
//! here on a provider miss are served directly on every later lookup.

pub mod db;

pub use db::Database;
