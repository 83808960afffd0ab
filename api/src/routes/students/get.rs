use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use db::models::attendance_record::{self, Model as AttendanceRecord};
use db::models::student::{Column, Entity, StudentStatus};
use db::models::school_class;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::{Paginated, bad_request, db_error_response, not_found, page_params};
use crate::routes::students::common::StudentResponse;

#[derive(Debug, Deserialize)]
pub struct ListStudentsQuery {
    pub query: Option<String>,
    pub class_id: Option<i64>,
    pub status: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// GET /students
///
/// List students with optional search and filters.
///
/// ### Query Parameters
/// - `query`: substring match on student code, first name or last name
/// - `class_id`: restrict to one class
/// - `status`: `active`, `inactive` or `transferred`
/// - `page`, `per_page`: pagination (default 1 / 20, capped at 100)
///
/// ### Responses
/// - `200 OK` with a paginated student list
/// - `400 Bad Request` on an unknown status value
pub async fn list_students(
    State(app_state): State<AppState>,
    Query(params): Query<ListStudentsQuery>,
) -> impl IntoResponse {
    let (page, per_page) = page_params(params.page, params.per_page);

    let mut condition = Condition::all();
    if let Some(ref q) = params.query {
        condition = condition.add(
            Condition::any()
                .add(Column::StudentId.contains(q))
                .add(Column::FirstName.contains(q))
                .add(Column::LastName.contains(q)),
        );
    }
    if let Some(class_id) = params.class_id {
        condition = condition.add(Column::ClassId.eq(class_id));
    }
    if let Some(ref status) = params.status {
        match StudentStatus::from_str(status) {
            Ok(status) => condition = condition.add(Column::Status.eq(status)),
            Err(_) => return bad_request(format!("Unknown status: {status}")),
        }
    }

    let paginator = Entity::find()
        .filter(condition)
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName)
        .paginate(app_state.db(), per_page);

    let total = match paginator.num_items().await {
        Ok(n) => n,
        Err(e) => return db_error_response(e),
    };
    let students = match paginator.fetch_page(page - 1).await {
        Ok(students) => students,
        Err(e) => return db_error_response(e),
    };

    Json(ApiResponse::success(
        Paginated {
            items: students.into_iter().map(StudentResponse::from).collect(),
            page,
            per_page,
            total,
        },
        "Students retrieved successfully",
    ))
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct StudentDetailQuery {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Default)]
pub struct StudentHistoryEntry {
    pub id: i64,
    pub attendance_date: String,
    pub status: String,
    pub notes: Option<String>,
    pub class_id: i64,
    pub class_name: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct StudentDetailResponse {
    pub student: StudentResponse,
    pub class_name: Option<String>,
    pub attendance: Vec<StudentHistoryEntry>,
    pub stats: Option<attendance_record::AttendanceStats>,
}

/// GET /students/{student_id}
///
/// Fetch one student with their attendance history and aggregate stats,
/// optionally bounded by an inclusive date range.
///
/// ### Query Parameters
/// - `from_date`, `to_date`: `YYYY-MM-DD` bounds on the history and stats
///
/// ### Responses
/// - `200 OK` with the student, history and stats
/// - `404 Not Found` on an unknown student
pub async fn get_student(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
    Query(params): Query<StudentDetailQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let found = match Entity::find_by_id(student_id)
        .find_also_related(school_class::Entity)
        .one(db)
        .await
    {
        Ok(found) => found,
        Err(e) => return db_error_response(e),
    };
    let Some((student, class)) = found else {
        return not_found(format!("Student ID {student_id} not found"));
    };

    let mut history_query = attendance_record::Entity::find()
        .filter(attendance_record::Column::StudentId.eq(student.id));
    if let Some(from) = params.from_date {
        history_query = history_query.filter(attendance_record::Column::AttendanceDate.gte(from));
    }
    if let Some(to) = params.to_date {
        history_query = history_query.filter(attendance_record::Column::AttendanceDate.lte(to));
    }
    let history = match history_query
        .find_also_related(school_class::Entity)
        .order_by_desc(attendance_record::Column::AttendanceDate)
        .all(db)
        .await
    {
        Ok(history) => history,
        Err(e) => return db_error_response(e),
    };

    let stats = match AttendanceRecord::student_stats(
        db,
        student.id,
        params.from_date,
        params.to_date,
    )
    .await
    {
        Ok(stats) => stats,
        Err(e) => return db_error_response(e),
    };

    let attendance = history
        .into_iter()
        .map(|(record, class)| StudentHistoryEntry {
            id: record.id,
            attendance_date: record.attendance_date.to_string(),
            status: record.status.to_string(),
            notes: record.notes,
            class_id: record.class_id,
            class_name: class.map(|c| c.name),
        })
        .collect();

    Json(ApiResponse::success(
        StudentDetailResponse {
            student: StudentResponse::from(student),
            class_name: class.map(|c| c.name),
            attendance,
            stats: Some(stats),
        },
        "Student retrieved successfully",
    ))
    .into_response()
}
