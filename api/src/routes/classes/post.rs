use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::school_class::Model as SchoolClass;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::classes::common::ClassResponse;
use crate::routes::common::{bad_request, domain_error_response, forbidden};
use common::format_validation_errors;

fn default_capacity() -> i32 {
    30
}

fn default_is_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassRequest {
    #[validate(length(min = 1, max = 100, message = "Class name is required"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description may not exceed 500 characters"))]
    pub description: Option<String>,

    pub teacher_id: i64,

    #[validate(range(min = 1, max = 100, message = "Capacity must be between 1 and 100"))]
    #[serde(default = "default_capacity")]
    pub capacity: i32,

    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

/// POST /classes
///
/// Create a class owned by a teacher. Admin only.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Grade 5A",
///   "description": "Advanced Elementary Studies",
///   "teacher_id": 2,
///   "capacity": 30
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the new class
/// - `400 Bad Request` on malformed input or a non-teacher owner
/// - `403 Forbidden` for non-admin callers
/// - `404 Not Found` on an unknown teacher
/// - `409 Conflict` when the class name is taken
pub async fn create_class(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateClassRequest>,
) -> impl IntoResponse {
    if !user.is_admin() {
        return forbidden("Admin access required");
    }
    if let Err(validation_errors) = req.validate() {
        return bad_request(format_validation_errors(&validation_errors));
    }

    match SchoolClass::create(
        app_state.db(),
        &req.name,
        req.description.as_deref(),
        req.teacher_id,
        req.capacity,
        req.is_active,
    )
    .await
    {
        Ok(class) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                ClassResponse::from_model(class),
                "Class created successfully",
            )),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}
