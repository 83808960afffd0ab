use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use db::models::school_class;
use db::models::student::{ActiveModel, Column, Entity, StudentStatus};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use std::str::FromStr;
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{bad_request, db_error_response, not_found};
use crate::routes::students::common::{GENDERS, StudentResponse};
use common::format_validation_errors;

#[derive(Debug, Deserialize, Validate)]
pub struct EditStudentRequest {
    #[validate(length(min = 1, max = 20, message = "Student ID is required"))]
    pub student_id: String,

    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,

    pub date_of_birth: NaiveDate,
    pub gender: String,

    #[validate(length(max = 200, message = "Parent name may not exceed 200 characters"))]
    pub parent_name: Option<String>,

    #[validate(length(max = 20, message = "Parent phone may not exceed 20 characters"))]
    pub parent_phone: Option<String>,

    #[validate(email(message = "Invalid parent email format"))]
    pub parent_email: Option<String>,

    #[validate(length(max = 500, message = "Address may not exceed 500 characters"))]
    pub address: Option<String>,

    pub class_id: Option<i64>,
    pub enrollment_date: NaiveDate,
    pub status: String,
}

/// PUT /students/{student_id}
///
/// Update a student's registration details.
///
/// ### Responses
/// - `200 OK` with the updated student
/// - `400 Bad Request` on malformed input
/// - `404 Not Found` on an unknown student or class
/// - `409 Conflict` when changing to a taken student code
pub async fn edit_student(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
    Json(req): Json<EditStudentRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return bad_request(format_validation_errors(&validation_errors));
    }
    if !GENDERS.contains(&req.gender.as_str()) {
        return bad_request(format!("Unknown gender: {}", req.gender));
    }
    if req.date_of_birth >= Utc::now().date_naive() {
        return bad_request("Date of birth must be in the past");
    }
    let status = match StudentStatus::from_str(&req.status) {
        Ok(status) => status,
        Err(_) => return bad_request(format!("Unknown status: {}", req.status)),
    };

    let db = app_state.db();

    let student = match Entity::find_by_id(student_id).one(db).await {
        Ok(Some(student)) => student,
        Ok(None) => return not_found(format!("Student ID {student_id} not found")),
        Err(e) => return db_error_response(e),
    };

    if req.student_id != student.student_id {
        match Entity::find()
            .filter(Column::StudentId.eq(req.student_id.as_str()))
            .one(db)
            .await
        {
            Ok(Some(_)) => {
                return (
                    axum::http::StatusCode::CONFLICT,
                    Json(ApiResponse::<()>::error(format!(
                        "Student ID {} is already registered",
                        req.student_id
                    ))),
                )
                    .into_response();
            }
            Ok(None) => {}
            Err(e) => return db_error_response(e),
        }
    }

    if let Some(class_id) = req.class_id {
        match school_class::Entity::find_by_id(class_id).one(db).await {
            Ok(Some(_)) => {}
            Ok(None) => return not_found(format!("Class ID {class_id} not found")),
            Err(e) => return db_error_response(e),
        }
    }

    let mut active: ActiveModel = student.into();
    active.student_id = Set(req.student_id);
    active.first_name = Set(req.first_name);
    active.last_name = Set(req.last_name);
    active.date_of_birth = Set(req.date_of_birth);
    active.gender = Set(req.gender);
    active.parent_name = Set(req.parent_name);
    active.parent_phone = Set(req.parent_phone);
    active.parent_email = Set(req.parent_email);
    active.address = Set(req.address);
    active.class_id = Set(req.class_id);
    active.enrollment_date = Set(req.enrollment_date);
    active.status = Set(status);
    active.updated_at = Set(Utc::now());

    match active.update(db).await {
        Ok(student) => Json(ApiResponse::success(
            StudentResponse::from(student),
            "Student updated successfully",
        ))
        .into_response(),
        Err(e) => db_error_response(e),
    }
}
