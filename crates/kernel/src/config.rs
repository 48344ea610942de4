//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Redis connection URL for sessions. When None, sessions are kept in
    /// process memory.
    pub redis_url: Option<String>,

    /// Navigation file replacing the compiled-in registry.
    pub navigation_file: Option<PathBuf>,

    /// Where anonymous users are sent from gated routes (default: /login).
    pub login_path: String,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Cookie SameSite policy: "strict", "lax", or "none" (default: "strict").
    pub cookie_same_site: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let redis_url = env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty());

        let navigation_file = env::var("NAVIGATION_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let login_path = env::var("LOGIN_PATH").unwrap_or_else(|_| "/login".to_string());

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let cookie_same_site = env::var("COOKIE_SAME_SITE")
            .unwrap_or_else(|_| "strict".to_string())
            .to_lowercase();

        Ok(Self {
            port,
            redis_url,
            navigation_file,
            login_path,
            cors_allowed_origins,
            cookie_same_site,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            redis_url: None,
            navigation_file: None,
            login_path: "/login".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
            cookie_same_site: "strict".to_string(),
        }
    }
}
