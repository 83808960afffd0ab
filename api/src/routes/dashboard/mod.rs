use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;

use get::dashboard;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}
