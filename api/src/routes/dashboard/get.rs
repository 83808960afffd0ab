use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;
use db::models::attendance_record::{self, AttendanceStats, AttendanceStatus};
use db::models::student::{self, StudentStatus};
use db::models::user::{self, Role};
use db::models::school_class;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::db_error_response;

#[derive(Debug, Serialize, Default)]
pub struct DashboardResponse {
    pub total_students: u64,
    pub total_classes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_teachers: Option<u64>,
    pub today: Option<AttendanceStats>,
}

/// GET /dashboard
///
/// Role-dependent summary figures for the landing page.
///
/// Administrators get school-wide counts (active students, active
/// classes, teachers) and today's attendance aggregate across all
/// classes. Teachers get the same figures restricted to the classes they
/// own, without the teacher count.
pub async fn dashboard(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();
    let scope = user.scope();
    let today = Utc::now().date_naive();

    let visible_class_ids = match scope.visible_class_ids(db).await {
        Ok(ids) => ids,
        Err(e) => return db_error_response(e),
    };

    let mut students_condition =
        Condition::all().add(student::Column::Status.eq(StudentStatus::Active));
    if let Some(ref ids) = visible_class_ids {
        students_condition =
            students_condition.add(student::Column::ClassId.is_in(ids.clone()));
    }
    let total_students = match student::Entity::find()
        .filter(students_condition)
        .count(db)
        .await
    {
        Ok(n) => n,
        Err(e) => return db_error_response(e),
    };

    let total_classes = match school_class::Entity::find()
        .filter(scope.classes_condition())
        .filter(school_class::Column::IsActive.eq(true))
        .count(db)
        .await
    {
        Ok(n) => n,
        Err(e) => return db_error_response(e),
    };

    let total_teachers = if scope.is_admin() {
        match user::Entity::find()
            .filter(user::Column::Role.eq(Role::Teacher))
            .count(db)
            .await
        {
            Ok(n) => Some(n),
            Err(e) => return db_error_response(e),
        }
    } else {
        None
    };

    let mut today_condition =
        Condition::all().add(attendance_record::Column::AttendanceDate.eq(today));
    if let Some(ids) = visible_class_ids {
        today_condition = today_condition.add(attendance_record::Column::ClassId.is_in(ids));
    }
    let today_total = match attendance_record::Entity::find()
        .filter(today_condition.clone())
        .count(db)
        .await
    {
        Ok(n) => n,
        Err(e) => return db_error_response(e),
    };
    let today_present = match attendance_record::Entity::find()
        .filter(today_condition)
        .filter(attendance_record::Column::Status.eq(AttendanceStatus::Present))
        .count(db)
        .await
    {
        Ok(n) => n,
        Err(e) => return db_error_response(e),
    };

    Json(ApiResponse::success(
        DashboardResponse {
            total_students,
            total_classes,
            total_teachers,
            today: Some(AttendanceStats::from_counts(today_total, today_present)),
        },
        "Dashboard retrieved successfully",
    ))
    .into_response()
}
