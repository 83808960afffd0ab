//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected via appropriate access
//! control middleware:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Login (public)
//! - `/users` → User management (admin-only)
//! - `/students` → Student registry (authenticated users)
//! - `/classes` → Class management (authenticated users; writes admin-only)
//! - `/attendance` → Attendance recording and history (authenticated users)
//! - `/dashboard` → Role-dependent summary figures (authenticated users)

use crate::auth::guards::{allow_admin, allow_authenticated};
use crate::routes::{
    attendance::attendance_routes, auth::auth_routes, classes::classes_routes,
    dashboard::dashboard_routes, health::health_routes, students::students_routes,
    users::users_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod dashboard;
pub mod health;
pub mod students;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// All route groups are mounted under their base paths with `AppState`
/// already applied, so the returned router can be nested as-is.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/users", users_routes().route_layer(from_fn(allow_admin)))
        .nest(
            "/students",
            students_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/classes",
            classes_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/attendance",
            attendance_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/dashboard",
            dashboard_routes().route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
