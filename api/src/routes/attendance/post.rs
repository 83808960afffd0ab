use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum::Extension;
use chrono::{NaiveDate, Utc};
use db::models::attendance_record::{
    AttendanceStats, AttendanceStatus, BatchEntry, EntryOutcome, MAX_NOTES_LEN,
    Model as AttendanceRecord,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use util::state::AppState;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{bad_request, domain_error_response, forbidden};
use common::format_validation_errors;

#[derive(Debug, Deserialize, Validate)]
pub struct RecordAttendanceRequest {
    pub class_id: i64,
    pub attendance_date: NaiveDate,

    #[validate(length(min = 1, message = "Attendance data is required"))]
    pub attendance: Vec<AttendanceEntryRequest>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AttendanceEntryRequest {
    pub student_id: i64,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct RecordAttendanceResponse {
    pub outcomes: Vec<EntryOutcome>,
    pub applied: usize,
    pub failed: usize,
    pub stats: Option<AttendanceStats>,
}

/// POST /attendance
///
/// Record attendance for a batch of students in one class on one date.
/// One record per (student, date): re-submitting overwrites status, notes
/// and attribution while keeping the class the record was first taken in.
/// A failing entry (e.g. unknown student) is reported in its outcome and
/// does not abort the rest of the batch.
///
/// ### Request Body
/// ```json
/// {
///   "class_id": 1,
///   "attendance_date": "2026-03-02",
///   "attendance": [
///     { "student_id": 10, "status": "present" },
///     { "student_id": 11, "status": "late", "notes": "Bus delay" }
///   ]
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with per-entry outcomes and the day's refreshed aggregate
/// - `400 Bad Request` on an empty batch, unknown status or overlong notes
/// - `403 Forbidden` when a teacher submits for a class they do not own
/// - `404 Not Found` on an unknown class
pub async fn record_attendance(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<RecordAttendanceRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return bad_request(format_validation_errors(&validation_errors));
    }

    // Statuses and note lengths are checked up front so a malformed batch
    // is rejected before any write.
    let mut entries = Vec::with_capacity(req.attendance.len());
    for entry in &req.attendance {
        let status = match AttendanceStatus::from_str(&entry.status) {
            Ok(status) => status,
            Err(_) => return bad_request(format!("Unknown status: {}", entry.status)),
        };
        if let Some(ref notes) = entry.notes {
            if notes.chars().count() > MAX_NOTES_LEN {
                return bad_request(format!("Notes may not exceed {MAX_NOTES_LEN} characters"));
            }
        }
        entries.push(BatchEntry {
            student_id: entry.student_id,
            status,
            notes: entry.notes.clone(),
        });
    }

    let db = app_state.db();

    match user.scope().can_access_class(db, req.class_id).await {
        Ok(true) => {}
        Ok(false) => return forbidden("You do not have access to this class"),
        Err(e) => return crate::routes::common::db_error_response(e),
    }

    let outcomes = match AttendanceRecord::record_batch(
        db,
        req.class_id,
        req.attendance_date,
        &entries,
        user.0.sub,
        Utc::now(),
    )
    .await
    {
        Ok(outcomes) => outcomes,
        Err(e) => return domain_error_response(e),
    };

    let stats = match AttendanceRecord::class_day_stats(db, req.class_id, req.attendance_date).await
    {
        Ok(stats) => Some(stats),
        Err(e) => return crate::routes::common::db_error_response(e),
    };

    let applied = outcomes.iter().filter(|o| o.is_ok()).count();
    let failed = outcomes.len() - applied;

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            RecordAttendanceResponse {
                outcomes,
                applied,
                failed,
                stats,
            },
            "Attendance recorded successfully",
        )),
    )
        .into_response()
}
