//! Fleetdash Kernel Library
//!
//! Role catalog, navigation registry, and access resolution for the fleet
//! operations dashboard, plus the HTTP surface that serves them.
//! The main entry point for running the server is the `fleetdash` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod menu;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult, NavigationError};
pub use menu::{
    NavEntry, NavEntryDefinition, NavItem, NavigationRegistry, ResolverCache, VisibleEntry,
    is_path_reachable, reachable_trail, resolve_visible_entries, visible_for,
};
pub use models::{Role, UnknownRole, is_valid_role};
pub use routes::app_router;
pub use state::AppState;
