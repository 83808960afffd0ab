use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::Model as User;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::routes::common::db_error_response;
use common::format_validation_errors;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
    pub expires_at: String,
}

/// POST /auth/login
///
/// Authenticate a user and issue a JWT.
///
/// ### Request Body
/// ```json
/// {
///   "email": "user@example.com",
///   "password": "strongpassword"
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the user and a signed token
/// - `401 Unauthorized` on an unknown email or wrong password
/// - `400 Bad Request` on malformed input
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<LoginResponse>::error(message)),
        )
            .into_response();
    }

    let user = match User::find_by_email(app_state.db(), &req.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<LoginResponse>::error(
                    "Invalid email or password",
                )),
            )
                .into_response();
        }
        Err(e) => return db_error_response(e),
    };

    if !user.verify_password(&req.password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<LoginResponse>::error(
                "Invalid email or password",
            )),
        )
            .into_response();
    }

    let (token, expires_at) = generate_jwt(user.id, user.role);

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            LoginResponse {
                id: user.id,
                name: user.name,
                email: user.email,
                role: user.role.to_string(),
                token,
                expires_at,
            },
            "Login successful",
        )),
    )
        .into_response()
}
