use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use db::models::attendance_record::Entity;
use sea_orm::{EntityTrait, ModelTrait};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{db_error_response, forbidden, not_found};

/// DELETE /attendance/{record_id}
///
/// Remove one attendance record. Admin only.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` for non-admin callers
/// - `404 Not Found` on an unknown record
pub async fn delete_record(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(record_id): Path<i64>,
) -> impl IntoResponse {
    if !user.is_admin() {
        return forbidden("Admin access required");
    }

    let db = app_state.db();
    let record = match Entity::find_by_id(record_id).one(db).await {
        Ok(Some(record)) => record,
        Ok(None) => return not_found(format!("Attendance record ID {record_id} not found")),
        Err(e) => return db_error_response(e),
    };

    match record.delete(db).await {
        Ok(_) => Json(ApiResponse::success(
            (),
            "Attendance record deleted successfully",
        ))
        .into_response(),
        Err(e) => db_error_response(e),
    }
}
