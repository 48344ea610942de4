//! Session management.
//!
//! The authentication flow that writes the role lives outside this crate;
//! the kernel only reads [`SESSION_ROLE`] back on each request.

use anyhow::{Context, Result};
use fred::prelude::*;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer, SessionStore};
use tower_sessions_redis_store::RedisStore;
use tracing::warn;

/// Session key holding the role name of the authenticated user.
pub const SESSION_ROLE: &str = "role";

/// Default session expiry (24 hours).
pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;

/// Read the role name from the session.
///
/// A session that cannot be read counts as having no role.
pub async fn session_role(session: &Session) -> Option<String> {
    match session.get::<String>(SESSION_ROLE).await {
        Ok(role) => role,
        Err(e) => {
            warn!(error = %e, "failed to read role from session");
            None
        }
    }
}

/// Create the session layer using Redis as the backend.
pub async fn create_session_layer(
    redis_url: &str,
    same_site: SameSite,
) -> Result<SessionManagerLayer<RedisStore<Pool>>> {
    let config = Config::from_url(redis_url).context("failed to parse Redis URL")?;

    let pool = Builder::from_config(config)
        .build_pool(1)
        .context("failed to create Redis pool")?;

    pool.init()
        .await
        .context("failed to connect to Redis for sessions")?;

    Ok(configure(SessionManagerLayer::new(RedisStore::new(pool)), same_site))
}

/// Create a session layer kept in process memory.
///
/// Sessions do not survive a restart and are not shared between instances.
pub fn create_memory_session_layer(same_site: SameSite) -> SessionManagerLayer<MemoryStore> {
    configure(SessionManagerLayer::new(MemoryStore::default()), same_site)
}

/// Parse a SameSite policy name; anything unrecognized is strict.
pub fn parse_same_site(value: &str) -> SameSite {
    match value {
        "lax" => SameSite::Lax,
        "none" => SameSite::None,
        _ => SameSite::Strict,
    }
}

fn configure<S: SessionStore>(
    layer: SessionManagerLayer<S>,
    same_site: SameSite,
) -> SessionManagerLayer<S> {
    layer
        .with_secure(true) // Cookie only sent over HTTPS
        .with_http_only(true) // Cookie not accessible via JavaScript
        .with_same_site(same_site)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            DEFAULT_SESSION_EXPIRY_HOURS,
        )))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn same_site_parsing() {
        assert_eq!(parse_same_site("lax"), SameSite::Lax);
        assert_eq!(parse_same_site("none"), SameSite::None);
        assert_eq!(parse_same_site("strict"), SameSite::Strict);
        assert_eq!(parse_same_site("bogus"), SameSite::Strict);
    }
}
