use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use db::models::attendance_record::{AttendanceStatus, Entity, Model as AttendanceRecord};
use sea_orm::EntityTrait;
use serde::Deserialize;
use std::str::FromStr;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::attendance::common::NameLookup;
use crate::routes::common::{bad_request, db_error_response, domain_error_response, forbidden, not_found};

#[derive(Debug, Deserialize)]
pub struct EditRecordRequest {
    pub status: String,
    pub notes: Option<String>,
}

/// PUT /attendance/{record_id}
///
/// Correct one attendance record's status and notes. The student, class
/// and date on the record are immutable; attribution is restamped to the
/// caller.
///
/// ### Responses
/// - `200 OK` with the updated record
/// - `400 Bad Request` on an unknown status or overlong notes
/// - `403 Forbidden` when a teacher edits a record outside their classes
/// - `404 Not Found` on an unknown record
pub async fn edit_record(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(record_id): Path<i64>,
    Json(req): Json<EditRecordRequest>,
) -> impl IntoResponse {
    let status = match AttendanceStatus::from_str(&req.status) {
        Ok(status) => status,
        Err(_) => return bad_request(format!("Unknown status: {}", req.status)),
    };

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

    let updated = match AttendanceRecord::edit(
        db,
        record_id,
        status,
        req.notes,
        user.0.sub,
        Utc::now(),
    )
    .await
    {
        Ok(updated) => updated,
        Err(e) => return domain_error_response(e),
    };

    let lookup = match NameLookup::for_records(db, std::slice::from_ref(&updated)).await {
        Ok(lookup) => lookup,
        Err(e) => return db_error_response(e),
    };

    Json(ApiResponse::success(
        lookup.render(updated),
        "Attendance record updated successfully",
    ))
    .into_response()
}
