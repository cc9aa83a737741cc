use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tower_cookies::cookie::time::Duration;
use tower_cookies::{Cookie, Cookies, Key};
use uuid::Uuid;

use crate::error::Result;
use crate::models::session::Session;

/// The name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session_id";

/// A session loaded for the duration of one request.
///
/// `fresh` marks a session that does not exist in Redis yet; saving a
/// fresh session also sets the signed cookie. Loading alone never
/// writes anything, so render-only requests from anonymous browsers do
/// not allocate session records.
pub struct LoadedSession {
    pub id: Uuid,
    pub session: Session,
    fresh: bool,
}

/// Redis-backed session storage keyed by a signed cookie.
///
/// Reads and writes are scoped per request: handlers load the record,
/// mutate the typed `Session`, and write the whole record back. The
/// read-modify-write is not atomic, so two in-flight requests for the
/// same session can race; that matches the source system and is a
/// documented gap, not something to paper over with locking here.
#[derive(Clone)]
pub struct SessionStore {
    redis: ConnectionManager,
    key: Key,
    ttl_seconds: u64,
}

impl SessionStore {
    /// Creates a new `SessionStore`.
    ///
    /// `secret_key` must be at least 64 bytes; `Config::from_env`
    /// enforces that before this runs.
    pub fn new(redis: ConnectionManager, secret_key: &str, session_duration_days: i64) -> Self {
        Self {
            redis,
            key: Key::from(secret_key.as_bytes()),
            ttl_seconds: (session_duration_days * 86400) as u64,
        }
    }

    /// Loads the session for the requesting browser, or a fresh default
    /// when no valid session exists.
    pub async fn load(&mut self, cookies: &Cookies) -> Result<LoadedSession> {
        let cookie_id = cookies
            .signed(&self.key)
            .get(SESSION_COOKIE)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

        if let Some(id) = cookie_id {
            let raw: Option<String> = self.redis.get(format!("session:{}", id)).await?;
            if let Some(raw) = raw {
                if let Ok(session) = sonic_rs::from_str::<Session>(&raw) {
                    return Ok(LoadedSession {
                        id,
                        session,
                        fresh: false,
                    });
                }
                tracing::warn!("Discarding undecodable session record: {}", id);
            }
        }

        let id = Uuid::new_v4();
        tracing::debug!("Minted new session id: {}", id);
        Ok(LoadedSession {
            id,
            session: Session::default(),
            fresh: true,
        })
    }

    /// Writes the session record back to Redis, refreshing its TTL, and
    /// sets the signed cookie if the session is new.
    pub async fn save(&mut self, cookies: &Cookies, loaded: &LoadedSession) -> Result<()> {
        let json = sonic_rs::to_string(&loaded.session)
            .map_err(|e| crate::error::AppError::Internal(format!("Session serialization failed: {}", e)))?;

        let _: () = self
            .redis
            .set_ex(format!("session:{}", loaded.id), &json, self.ttl_seconds)
            .await?;

        if loaded.fresh {
            cookies
                .signed(&self.key)
                .add(session_cookie(loaded.id, self.ttl_seconds));
            tracing::debug!("Session cookie added: {}", loaded.id);
        }
        Ok(())
    }
}

/// Builds the session id cookie.
fn session_cookie(id: Uuid, ttl_seconds: u64) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, id.to_string());
    cookie.set_http_only(true);

    let is_production =
        std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()) == "production";
    if is_production {
        cookie.set_secure(true);
    }

    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookie.set_max_age(Duration::seconds(ttl_seconds as i64));
    cookie.set_path("/");
    cookie
}
