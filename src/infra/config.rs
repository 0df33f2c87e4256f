//! Centralized configuration (environment variables + defaults).
//!
//! Binaries call `dotenv::dotenv().ok()` first, so a local `.env` file is honoured.

use anyhow::{anyhow, Context};
use std::str::FromStr;
use std::time::Duration;

/// Which [`crate::storage::ProductStore`] the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(anyhow!("unknown PRODUCT_STORE '{}' (expected postgres or memory)", other)),
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(v) => v
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{} is invalid ({}): {}", name, v, e)),
        Err(_) => Ok(default),
    }
}

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

/// Store backend (`PRODUCT_STORE`, default `postgres`).
pub fn store_backend() -> anyhow::Result<StoreBackend> {
    parse_var("PRODUCT_STORE", StoreBackend::Postgres)
}

/// Listening port (`PORT`, default 5000).
pub fn port() -> anyhow::Result<u16> {
    parse_var("PORT", 5000)
}

/// Listening address (`BIND_ADDR`, default `0.0.0.0`).
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string())
}

/// Postgres pool size (`DB_MAX_CONNECTIONS`, default 5).
pub fn db_max_connections() -> anyhow::Result<u32> {
    Ok(parse_var::<u32>("DB_MAX_CONNECTIONS", 5)?.max(1))
}

/// Per-request timeout of the HTTP client (`CLIENT_TIMEOUT_SECS`, default 10).
pub fn client_timeout() -> anyhow::Result<Duration> {
    let secs = parse_var::<u64>("CLIENT_TIMEOUT_SECS", 10)?.max(1);
    Ok(Duration::from_secs(secs))
}
