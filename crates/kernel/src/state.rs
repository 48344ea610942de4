//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::config::Config;
use crate::menu::{NavItem, NavigationRegistry, ResolverCache, visible_for};
use crate::metrics::{Metrics, ResolveOutcome};
use crate::models::Role;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    /// Navigation registry, read-only for the process lifetime.
    registry: NavigationRegistry,

    /// Resolved navigation per (role, registry version).
    nav_cache: ResolverCache,

    /// Prometheus metrics.
    metrics: Metrics,

    /// Redirect target for anonymous users on gated routes.
    login_path: String,
}

impl AppState {
    /// Build state from configuration, loading and validating the registry.
    ///
    /// Fails when the configured navigation file is unreadable or invalid,
    /// or when the login path is itself a gated route.
    pub fn new(config: &Config) -> Result<Self> {
        let registry = match &config.navigation_file {
            Some(path) => NavigationRegistry::from_file(path)?,
            None => NavigationRegistry::builtin().context("built-in navigation is invalid")?,
        };

        if let Some(entry) = registry.match_path(&config.login_path) {
            bail!(
                "LOGIN_PATH '{}' is gated by navigation entry '{}'",
                config.login_path,
                entry.path
            );
        }

        info!(
            entries = registry.len(),
            version = registry.version(),
            "Navigation registry loaded"
        );

        Ok(Self::with_registry(registry, &config.login_path))
    }

    /// Build state around an already validated registry.
    pub fn with_registry(registry: NavigationRegistry, login_path: &str) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                registry,
                nav_cache: ResolverCache::new(),
                metrics: Metrics::new(),
                login_path: login_path.to_string(),
            }),
        }
    }

    /// Get the navigation registry.
    pub fn registry(&self) -> &NavigationRegistry {
        &self.inner.registry
    }

    /// Get the resolver cache.
    pub fn nav_cache(&self) -> &ResolverCache {
        &self.inner.nav_cache
    }

    /// Get the metrics registry.
    pub fn metrics(&self) -> &Metrics {
        &self.inner.metrics
    }

    /// Get the login redirect path.
    pub fn login_path(&self) -> &str {
        &self.inner.login_path
    }

    /// Navigation visible to the session role.
    ///
    /// Same result as [`crate::menu::resolve_visible_entries`], memoized on
    /// `(role, registry version)` for catalog roles.
    pub fn navigation_for(&self, role: Option<&str>) -> Arc<Vec<NavItem>> {
        let Some(name) = role else {
            self.metrics().record_resolution(ResolveOutcome::Anonymous);
            return Arc::new(Vec::new());
        };

        let Ok(role) = name.parse::<Role>() else {
            self.metrics().record_resolution(ResolveOutcome::UnknownRole);
            return Arc::new(Vec::new());
        };

        let version = self.registry().version();
        let items = match self.nav_cache().get(role, version) {
            Some(items) => {
                self.metrics().record_cache_hit();
                items
            }
            None => {
                self.metrics().record_cache_miss();
                let items: Arc<Vec<NavItem>> = Arc::new(
                    visible_for(role, self.registry())
                        .iter()
                        .map(|entry| entry.to_nav_item())
                        .collect(),
                );
                self.nav_cache().insert(role, version, Arc::clone(&items));
                items
            }
        };

        self.metrics().record_resolution(if items.is_empty() {
            ResolveOutcome::Empty
        } else {
            ResolveOutcome::Granted
        });
        items
    }
}
