//! Navigation API for the dashboard shell.
//!
//! The sidebar and mobile menu both fetch from here; entries arrive already
//! filtered for the session role.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::menu::{NavItem, is_path_reachable};
use crate::session::session_role;
use crate::state::AppState;

/// Navigation visible to the current session.
#[derive(Debug, Serialize)]
struct NavigationResponse {
    role: Option<String>,
    version: String,
    entries: Arc<Vec<NavItem>>,
}

/// Reachability query.
#[derive(Debug, Deserialize)]
struct AccessQuery {
    path: String,
}

/// Reachability answer.
#[derive(Debug, Serialize)]
struct AccessResponse {
    path: String,
    reachable: bool,
}

/// Create the navigation router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/navigation", get(navigation))
        .route("/api/navigation/access", get(access))
}

/// GET /api/navigation
///
/// Anonymous and unrecognized roles get an empty entry list, not an error.
async fn navigation(State(state): State<AppState>, session: Session) -> Json<NavigationResponse> {
    let role = session_role(&session).await;
    let entries = state.navigation_for(role.as_deref());

    Json(NavigationResponse {
        role,
        version: state.registry().version().to_string(),
        entries,
    })
}

/// GET /api/navigation/access?path=/fleets
async fn access(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AccessQuery>,
) -> Json<AccessResponse> {
    let role = session_role(&session).await;
    let reachable = is_path_reachable(role.as_deref(), &query.path, state.registry());

    Json(AccessResponse {
        path: query.path,
        reachable,
    })
}
