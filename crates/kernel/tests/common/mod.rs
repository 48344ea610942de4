#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! [`TestApp`] wraps the real kernel router with an in-memory session store
//! and one extra route, `/test/login/{role}`, standing in for the external
//! authentication flow that writes the session role.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::extract::Path;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use axum::routing::get;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_sessions::Session;
use tower_sessions::cookie::SameSite;

use fleetdash_kernel::session::{SESSION_ROLE, create_memory_session_layer};
use fleetdash_kernel::{AppState, Config, NavigationRegistry, app_router};

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// App serving the built-in navigation.
    pub fn new() -> Self {
        let state = AppState::new(&Config::default()).expect("built-in state");
        Self::from_state(state)
    }

    /// App serving a specific registry.
    pub fn with_registry(registry: NavigationRegistry) -> Self {
        Self::from_state(AppState::with_registry(registry, "/login"))
    }

    fn from_state(state: AppState) -> Self {
        let router = Router::new()
            .route("/test/login/{role}", get(test_login))
            .merge(app_router(state.clone()))
            .layer(create_memory_session_layer(SameSite::Strict));

        Self { router, state }
    }

    /// Start a session holding `role` and return its cookie.
    pub async fn login(&self, role: &str) -> String {
        let response = self.get(&format!("/test/login/{role}"), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie")
            .to_str()
            .unwrap();

        set_cookie.split(';').next().unwrap().to_string()
    }

    /// Issue a GET request, optionally with a session cookie.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Issue a GET request as `role` and return the response.
    pub async fn get_as(&self, role: &str, path: &str) -> Response {
        let cookie = self.login(role).await;
        self.get(path, Some(&cookie)).await
    }
}

async fn test_login(session: Session, Path(role): Path<String>) -> StatusCode {
    session.insert(SESSION_ROLE, role).await.unwrap();
    StatusCode::NO_CONTENT
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Paths of a JSON array of navigation items.
pub fn item_paths(items: &serde_json::Value) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["path"].as_str().unwrap().to_string())
        .collect()
}
