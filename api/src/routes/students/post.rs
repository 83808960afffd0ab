use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{NaiveDate, Utc};
use db::models::student::{Model as Student, NewStudent, StudentStatus};
use serde::Deserialize;
use std::str::FromStr;
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{bad_request, domain_error_response};
use crate::routes::students::common::{GENDERS, StudentResponse};
use common::format_validation_errors;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
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
    pub status: Option<String>,
}

/// POST /students
///
/// Register a new student.
///
/// ### Request Body
/// ```json
/// {
///   "student_id": "STU01001",
///   "first_name": "Thandi",
///   "last_name": "Nkosi",
///   "date_of_birth": "2015-04-02",
///   "gender": "female",
///   "class_id": 1,
///   "enrollment_date": "2023-01-15"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the new student
/// - `400 Bad Request` on malformed input
/// - `404 Not Found` on an unknown class
/// - `409 Conflict` when the student code is taken
pub async fn create_student(
    State(app_state): State<AppState>,
    Json(req): Json<CreateStudentRequest>,
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

    let status = match req.status.as_deref() {
        None => StudentStatus::Active,
        Some(raw) => match StudentStatus::from_str(raw) {
            Ok(status) => status,
            Err(_) => return bad_request(format!("Unknown status: {raw}")),
        },
    };

    let new = NewStudent {
        student_id: req.student_id,
        first_name: req.first_name,
        last_name: req.last_name,
        date_of_birth: req.date_of_birth,
        gender: req.gender,
        parent_name: req.parent_name,
        parent_phone: req.parent_phone,
        parent_email: req.parent_email,
        address: req.address,
        class_id: req.class_id,
        enrollment_date: req.enrollment_date,
        status,
    };

    match Student::create(app_state.db(), new).await {
        Ok(student) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                StudentResponse::from(student),
                "Student created successfully",
            )),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}
