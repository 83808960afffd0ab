//! Class management routes, mounted for authenticated users.
//! Teachers see only their own classes; writes are admin-only and
//! enforced in the handlers.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use delete::delete_class;
use get::{get_class, list_classes};
use post::create_class;
use put::edit_class;

pub fn classes_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_classes).post(create_class))
        .route(
            "/{class_id}",
            get(get_class).put(edit_class).delete(delete_class),
        )
}
