use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use db::models::student::Entity;
use sea_orm::{EntityTrait, ModelTrait};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{db_error_response, forbidden, not_found};

/// DELETE /students/{student_id}
///
/// Remove a student and, via cascade, their attendance records. Admin only.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` for non-admin callers
/// - `404 Not Found` on an unknown student
pub async fn delete_student(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(student_id): Path<i64>,
) -> impl IntoResponse {
    if !user.is_admin() {
        return forbidden("Admin access required");
    }

    let db = app_state.db();
    let student = match Entity::find_by_id(student_id).one(db).await {
        Ok(Some(student)) => student,
        Ok(None) => return not_found(format!("Student ID {student_id} not found")),
        Err(e) => return db_error_response(e),
    };

    match student.delete(db).await {
        Ok(_) => Json(ApiResponse::success((), "Student deleted successfully")).into_response(),
        Err(e) => db_error_response(e),
    }
}
