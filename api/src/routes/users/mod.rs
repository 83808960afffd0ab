//! User management routes, mounted admin-only.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;

use get::list_users;
use post::create_user;

pub fn users_routes() -> Router<AppState> {
    Router::new().route("/", get(list_users).post(create_user))
}
