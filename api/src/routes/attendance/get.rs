use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use db::models::attendance_record::{AttendanceStatus, Column, Entity};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use std::str::FromStr;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::attendance::common::NameLookup;
use crate::routes::common::{Paginated, bad_request, db_error_response, forbidden, not_found, page_params};

#[derive(Debug, Deserialize)]
pub struct ListAttendanceQuery {
    pub date: Option<NaiveDate>,
    pub class_id: Option<i64>,
    pub status: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// GET /attendance
///
/// List attendance records visible to the caller. Administrators see
/// everything; teachers only see records taken in their own classes, so
/// a foreign `class_id` filter yields an empty page rather than an error.
///
/// ### Query Parameters
/// - `date`: `YYYY-MM-DD`, defaults to today
/// - `class_id`: restrict to one class
/// - `status`: `present`, `absent`, `late` or `excused`
/// - `page`, `per_page`: pagination (default 1 / 20, capped at 100)
///
/// ### Responses
/// - `200 OK` with a paginated record list, student/class/marker names resolved
/// - `400 Bad Request` on an unknown status value
pub async fn list_attendance(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ListAttendanceQuery>,
) -> impl IntoResponse {
    let db = app_state.db();
    let (page, per_page) = page_params(params.page, params.per_page);

    let mut condition = match user.scope().attendance_condition(db).await {
        Ok(condition) => condition,
        Err(e) => return db_error_response(e),
    };

    let date = params.date.unwrap_or_else(|| Utc::now().date_naive());
    condition = condition.add(Column::AttendanceDate.eq(date));

    if let Some(class_id) = params.class_id {
        condition = condition.add(Column::ClassId.eq(class_id));
    }
    if let Some(ref status) = params.status {
        match AttendanceStatus::from_str(status) {
            Ok(status) => condition = condition.add(Column::Status.eq(status)),
            Err(_) => return bad_request(format!("Unknown status: {status}")),
        }
    }

    let paginator = Entity::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt)
        .paginate(db, per_page);

    let total = match paginator.num_items().await {
        Ok(n) => n,
        Err(e) => return db_error_response(e),
    };
    let records = match paginator.fetch_page(page - 1).await {
        Ok(records) => records,
        Err(e) => return db_error_response(e),
    };

    let lookup = match NameLookup::for_records(db, &records).await {
        Ok(lookup) => lookup,
        Err(e) => return db_error_response(e),
    };

    Json(ApiResponse::success(
        Paginated {
            items: records.into_iter().map(|r| lookup.render(r)).collect(),
            page,
            per_page,
            total,
        },
        "Attendance records retrieved successfully",
    ))
    .into_response()
}

/// GET /attendance/{record_id}
///
/// Fetch one attendance record.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` when a teacher requests a record outside their classes
/// - `404 Not Found` on an unknown record
pub async fn get_record(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(record_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let record = match Entity::find_by_id(record_id).one(db).await {
        Ok(Some(record)) => record,
        Ok(None) => return not_found(format!("Attendance record ID {record_id} not found")),
        Err(e) => return db_error_response(e),
    };

    match user.scope().can_access_class(db, record.class_id).await {
        Ok(true) => {}
        Ok(false) => return forbidden("You do not have access to this record"),
        Err(e) => return db_error_response(e),
    }

    let lookup = match NameLookup::for_records(db, std::slice::from_ref(&record)).await {
        Ok(lookup) => lookup,
        Err(e) => return db_error_response(e),
    };

    Json(ApiResponse::success(
        lookup.render(record),
        "Attendance record retrieved successfully",
    ))
    .into_response()
}
