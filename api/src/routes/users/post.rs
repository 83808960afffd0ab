use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::{Model as User, Role};
use serde::Deserialize;
use std::str::FromStr;
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{bad_request, domain_error_response};
use crate::routes::users::common::UserResponse;
use common::format_validation_errors;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub role: String,
}

/// POST /users
///
/// Create a user account. Admin only.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Jane Mokoena",
///   "email": "jane@school.test",
///   "password": "strongpassword",
///   "role": "teacher"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the new user
/// - `400 Bad Request` on malformed input or an unknown role
/// - `409 Conflict` when the email is already registered
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let message = format_validation_errors(&validation_errors);
        return bad_request(message);
    }

    let role = match Role::from_str(&req.role) {
        Ok(role) => role,
        Err(_) => return bad_request(format!("Unknown role: {}", req.role)),
    };

    match User::create(app_state.db(), &req.name, &req.email, &req.password, role).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "User created successfully",
            )),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}
