use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use db::models::school_class::{ActiveModel, Column, Entity};
use db::models::user::{self, Role};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::classes::common::ClassResponse;
use crate::routes::common::{bad_request, db_error_response, forbidden, not_found};
use common::format_validation_errors;

#[derive(Debug, Deserialize, Validate)]
pub struct EditClassRequest {
    #[validate(length(min = 1, max = 100, message = "Class name is required"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description may not exceed 500 characters"))]
    pub description: Option<String>,

    pub teacher_id: i64,

    #[validate(range(min = 1, max = 100, message = "Capacity must be between 1 and 100"))]
    pub capacity: i32,

    pub is_active: bool,
}

/// PUT /classes/{class_id}
///
/// Update a class. Admin only.
///
/// ### Responses
/// - `200 OK` with the updated class
/// - `400 Bad Request` on malformed input or a non-teacher owner
/// - `403 Forbidden` for non-admin callers
/// - `404 Not Found` on an unknown class or teacher
/// - `409 Conflict` when renaming to a taken class name
pub async fn edit_class(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(class_id): Path<i64>,
    Json(req): Json<EditClassRequest>,
) -> impl IntoResponse {
    if !user.is_admin() {
        return forbidden("Admin access required");
    }
    if let Err(validation_errors) = req.validate() {
        return bad_request(format_validation_errors(&validation_errors));
    }

    let db = app_state.db();

    let class = match Entity::find_by_id(class_id).one(db).await {
        Ok(Some(class)) => class,
        Ok(None) => return not_found(format!("Class ID {class_id} not found")),
        Err(e) => return db_error_response(e),
    };

    let teacher = match user::Entity::find_by_id(req.teacher_id).one(db).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => return not_found(format!("Teacher ID {} not found", req.teacher_id)),
        Err(e) => return db_error_response(e),
    };
    if teacher.role != Role::Teacher {
        return bad_request("Selected user is not a teacher");
    }

    if req.name != class.name {
        match Entity::find()
            .filter(Column::Name.eq(req.name.as_str()))
            .one(db)
            .await
        {
            Ok(Some(_)) => {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::<()>::error(format!(
                        "A class named {} already exists",
                        req.name
                    ))),
                )
                    .into_response();
            }
            Ok(None) => {}
            Err(e) => return db_error_response(e),
        }
    }

    let mut active: ActiveModel = class.into();
    active.name = Set(req.name);
    active.description = Set(req.description);
    active.teacher_id = Set(req.teacher_id);
    active.capacity = Set(req.capacity);
    active.is_active = Set(req.is_active);
    active.updated_at = Set(Utc::now());

    match active.update(db).await {
        Ok(class) => Json(ApiResponse::success(
            ClassResponse::from_model(class).with_teacher(Some(teacher.name)),
            "Class updated successfully",
        ))
        .into_response(),
        Err(e) => db_error_response(e),
    }
}
