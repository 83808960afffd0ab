//! Authentication routes.
//!
//! Provides `POST /auth/login`. Registration is not exposed; accounts are
//! created by an administrator through `/users`.

use axum::{Router, routing::post};
use util::state::AppState;

pub mod post;

use post::login;

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
