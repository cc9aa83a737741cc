use anyhow::{Context, Result};
use std::env;

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The URL of the PostgreSQL database holding user records.
    pub database_url: String,
    /// The URL of the Redis server holding session state.
    pub redis_url: String,
    /// The secret used to sign the session id cookie.
    pub secret_key: String,
    /// The duration of a session in days.
    pub session_duration_days: i64,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    pub fn from_env() -> Result<Self> {
        let secret_key = env::var("SECRET_KEY")
            .context("SECRET_KEY must be set (generate with: openssl rand -hex 32)")?;

        // The cookie signing key is built from this value and needs at
        // least 64 bytes of input.
        if secret_key.len() < 64 {
            anyhow::bail!("SECRET_KEY must be at least 64 characters (openssl rand -hex 32)");
        }

        let session_duration_days = parse_session_duration(
            &env::var("SESSION_DURATION_DAYS").unwrap_or_else(|_| "7".to_string()),
        )?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            secret_key,
            session_duration_days,
        })
    }
}

/// Parses the session duration, rejecting zero and negative values up
/// front; the value later becomes an unsigned Redis TTL.
fn parse_session_duration(raw: &str) -> Result<i64> {
    let days: i64 = raw.parse().context("Invalid SESSION_DURATION_DAYS")?;
    if days <= 0 {
        anyhow::bail!("SESSION_DURATION_DAYS must be positive");
    }
    Ok(days)
}
