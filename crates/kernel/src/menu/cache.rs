//! Memoized navigation keyed on role and registry version.

use std::sync::Arc;

use dashmap::DashMap;

use super::resolver::NavItem;
use crate::models::Role;

/// Resolved navigation per `(role, registry version)`.
///
/// Resolution is cheap and pure, so this only saves re-walking the tree on
/// every request. Anonymous and unrecognized roles never reach the cache.
#[derive(Clone, Default)]
pub struct ResolverCache {
    inner: Arc<DashMap<(Role, String), Arc<Vec<NavItem>>>>,
}

impl ResolverCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up resolved navigation.
    pub fn get(&self, role: Role, version: &str) -> Option<Arc<Vec<NavItem>>> {
        self.inner
            .get(&(role, version.to_string()))
            .map(|items| Arc::clone(items.value()))
    }

    /// Store resolved navigation.
    pub fn insert(&self, role: Role, version: &str, items: Arc<Vec<NavItem>>) {
        self.inner.insert((role, version.to_string()), items);
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&self) {
        self.inner.clear();
    }

    /// Get the number of cached entries (for monitoring).
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for ResolverCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverCache")
            .field("len", &self.len())
            .finish()
    }
}
