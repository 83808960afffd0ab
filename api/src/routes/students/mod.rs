//! Student registry routes, mounted for authenticated users.
//! Deleting a student is restricted to administrators in the handler.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use delete::delete_student;
use get::{get_student, list_students};
use post::create_student;
use put::edit_student;

pub fn students_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route(
            "/{student_id}",
            get(get_student).put(edit_student).delete(delete_student),
        )
}
