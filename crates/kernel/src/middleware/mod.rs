//! HTTP middleware components.
//!
//! Provides role-based gating for dashboard routes.

pub mod route_guard;

pub use route_guard::guard_routes;
