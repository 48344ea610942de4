//! HTTP route handlers.

pub mod health;
pub mod metrics;
pub mod navigation;
pub mod pages;

use axum::Router;

use crate::middleware::guard_routes;
use crate::state::AppState;

/// Build the application router.
///
/// The route guard wraps every route including the page fallback, and reads
/// the session, so callers must add a session layer on top:
/// `app_router(state).layer(session_layer)`.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(metrics::router())
        .merge(navigation::router())
        .fallback(pages::page_shell)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            guard_routes,
        ))
        .with_state(state)
}
