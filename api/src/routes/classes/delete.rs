use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use db::models::school_class::Entity;
use sea_orm::{EntityTrait, ModelTrait};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{db_error_response, forbidden, not_found};

/// DELETE /classes/{class_id}
///
/// Remove a class. Its attendance records are deleted by cascade and its
/// students are detached, not deleted. Admin only.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` for non-admin callers
/// - `404 Not Found` on an unknown class
pub async fn delete_class(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(class_id): Path<i64>,
) -> impl IntoResponse {
    if !user.is_admin() {
        return forbidden("Admin access required");
    }

    let db = app_state.db();
    let class = match Entity::find_by_id(class_id).one(db).await {
        Ok(Some(class)) => class,
        Ok(None) => return not_found(format!("Class ID {class_id} not found")),
        Err(e) => return db_error_response(e),
    };

    match class.delete(db).await {
        Ok(_) => Json(ApiResponse::success((), "Class deleted successfully")).into_response(),
        Err(e) => db_error_response(e),
    }
}
