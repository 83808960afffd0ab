//! Attendance recording and history routes, mounted for authenticated
//! users. Teachers may only read and write attendance for classes they
//! own; deleting a record is admin-only.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use delete::delete_record;
use get::list_attendance;
use post::record_attendance;
use put::edit_record;

pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attendance).post(record_attendance))
        .route("/{record_id}", get(get::get_record).put(edit_record).delete(delete_record))
}
