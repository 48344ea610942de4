//! Route guard middleware.
//!
//! Gates every request whose path matches a navigation entry on the same
//! rule the navigation menu uses, so a hidden route is also unreachable.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::debug;

use crate::error::AppError;
use crate::menu::is_path_reachable;
use crate::metrics::DenialReason;
use crate::models::is_valid_role;
use crate::session::session_role;
use crate::state::AppState;

/// Middleware enforcing role access on registry routes.
///
/// Paths outside the registry pass through untouched. On a registry path:
/// no role (or one outside the catalog) redirects to the login path, a
/// catalog role without access gets 403.
pub async fn guard_routes(
    State(state): State<AppState>,
    session: Session,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let Some(entry) = state.registry().match_path(&path) else {
        return next.run(request).await;
    };
    let route = entry.path.clone();

    let role = session_role(&session).await;

    if is_path_reachable(role.as_deref(), &path, state.registry()) {
        return next.run(request).await;
    }

    match role.as_deref() {
        Some(name) if is_valid_role(name) => {
            debug!(%route, role = name, "route denied");
            state.metrics().record_denial(DenialReason::Forbidden, &route);
            AppError::Forbidden.into_response()
        }
        _ => {
            debug!(%route, "anonymous request to gated route");
            state.metrics().record_denial(DenialReason::Anonymous, &route);
            Redirect::to(state.login_path()).into_response()
        }
    }
}
