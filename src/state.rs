use deadpool_postgres::Pool;
use redis::aio::ConnectionManager;

use crate::config::Config;
use crate::error::Result;
use crate::sessions::SessionStore;

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool (credential store).
    pub db: Pool,
    /// The cookie-keyed session storage.
    pub sessions: SessionStore,
    /// The application's configuration.
    pub config: Config,
}

impl AppState {
    /// Creates a new `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = crate::db::create_pool(&config.database_url)?;
        tracing::info!("✅ PostgreSQL pool initialized");

        let redis_client = redis::Client::open(config.redis_url.as_str())?;
        let redis = ConnectionManager::new(redis_client).await?;
        tracing::info!("✅ Redis connection manager initialized");

        let sessions = SessionStore::new(redis, &config.secret_key, config.session_duration_days);

        Ok(AppState {
            db,
            sessions,
            config: config.clone(),
        })
    }
}
