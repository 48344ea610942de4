//! Dashboard page shells.
//!
//! Every registry route answers with its title, breadcrumb, and path
//! parameters. The route guard has already checked access by the time a
//! request lands here.

use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use axum::http::Uri;
use serde::Serialize;
use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::menu::reachable_trail;
use crate::session::session_role;
use crate::state::AppState;

/// One breadcrumb step.
#[derive(Debug, Serialize)]
pub struct Crumb {
    pub path: String,
    pub label: String,
}

/// Page shell for a dashboard route.
#[derive(Debug, Serialize)]
pub struct PageShell {
    pub path: String,
    pub title: String,
    pub icon: String,
    pub breadcrumb: Vec<Crumb>,
    pub params: HashMap<String, String>,
}

/// Fallback handler serving page shells for registry routes.
///
/// The breadcrumb follows the copy of the route the session role reaches.
pub async fn page_shell(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
) -> AppResult<Json<PageShell>> {
    let path = uri.path();
    let role = session_role(&session).await;
    let trail = reachable_trail(role.as_deref(), path, state.registry())
        .or_else(|| state.registry().trail(path))
        .ok_or(AppError::NotFound)?;
    let entry = trail.last().copied().ok_or(AppError::NotFound)?;

    let breadcrumb = trail
        .iter()
        .map(|e| Crumb {
            path: e.path.clone(),
            label: e.label.clone(),
        })
        .collect();

    Ok(Json(PageShell {
        path: path.to_string(),
        title: entry.label.clone(),
        icon: entry.icon.clone(),
        breadcrumb,
        params: entry.match_path(path).unwrap_or_default(),
    }))
}
