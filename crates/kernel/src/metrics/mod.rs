//! Prometheus metrics collection.
//!
//! Provides navigation and route-guard metrics in Prometheus format.

use prometheus_client::encoding::{EncodeLabelSet, text::encode};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

/// Outcome of resolving navigation for a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// A catalog role with at least one visible entry.
    Granted,
    /// A catalog role that sees no entries.
    Empty,
    /// No role in the session.
    Anonymous,
    /// A role name outside the catalog.
    UnknownRole,
}

impl ResolveOutcome {
    fn as_str(self) -> &'static str {
        match self {
            ResolveOutcome::Granted => "granted",
            ResolveOutcome::Empty => "empty",
            ResolveOutcome::Anonymous => "anonymous",
            ResolveOutcome::UnknownRole => "unknown_role",
        }
    }
}

/// Why the route guard turned a request away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenialReason {
    /// No usable role; redirected to login.
    Anonymous,
    /// A catalog role that is not allowed on the route.
    Forbidden,
}

impl DenialReason {
    fn as_str(self) -> &'static str {
        match self {
            DenialReason::Anonymous => "anonymous",
            DenialReason::Forbidden => "forbidden",
        }
    }
}

/// Navigation resolution labels.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ResolveLabels {
    pub outcome: String,
}

/// Route denial labels. `route` is the registry pattern, not the raw path,
/// to keep cardinality bounded.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct DenialLabels {
    pub reason: String,
    pub route: String,
}

/// Application metrics.
pub struct Metrics {
    registry: Registry,

    /// Navigation resolutions by outcome.
    pub navigation_resolutions: Family<ResolveLabels, Counter>,

    /// Route guard denials by reason and route pattern.
    pub route_denials: Family<DenialLabels, Counter>,

    /// Resolver cache hit counter.
    pub cache_hits: Counter,

    /// Resolver cache miss counter.
    pub cache_misses: Counter,
}

impl Metrics {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let navigation_resolutions = Family::<ResolveLabels, Counter>::default();
        registry.register(
            "navigation_resolutions",
            "Navigation resolutions by outcome",
            navigation_resolutions.clone(),
        );

        let route_denials = Family::<DenialLabels, Counter>::default();
        registry.register(
            "route_denials",
            "Requests turned away by the route guard",
            route_denials.clone(),
        );

        let cache_hits = Counter::default();
        registry.register(
            "resolver_cache_hits",
            "Resolver cache hit count",
            cache_hits.clone(),
        );

        let cache_misses = Counter::default();
        registry.register(
            "resolver_cache_misses",
            "Resolver cache miss count",
            cache_misses.clone(),
        );

        Self {
            registry,
            navigation_resolutions,
            route_denials,
            cache_hits,
            cache_misses,
        }
    }

    /// Record a navigation resolution.
    pub fn record_resolution(&self, outcome: ResolveOutcome) {
        self.navigation_resolutions
            .get_or_create(&ResolveLabels {
                outcome: outcome.as_str().to_string(),
            })
            .inc();
    }

    /// Record a route guard denial.
    pub fn record_denial(&self, reason: DenialReason, route: &str) {
        self.route_denials
            .get_or_create(&DenialLabels {
                reason: reason.as_str().to_string(),
                route: route.to_string(),
            })
            .inc();
    }

    /// Record a cache hit.
    pub fn record_cache_hit(&self) {
        self.cache_hits.inc();
    }

    /// Record a cache miss.
    pub fn record_cache_miss(&self) {
        self.cache_misses.inc();
    }

    /// Encode metrics in Prometheus text format.
    ///
    /// # Panics
    ///
    /// Panics if Prometheus metric encoding to a `String` buffer fails.
    /// The `fmt::Write` impl for `String` is infallible, and all metric
    /// labels use derived `EncodeLabelSet` impls that do not produce
    /// `fmt::Error`.
    pub fn encode(&self) -> String {
        let mut buffer = String::new();
        // Prometheus encoding to String buffer is infallible
        #[allow(clippy::expect_used)]
        encode(&mut buffer, &self.registry).expect("encoding metrics");
        buffer
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish()
    }
}
