use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::Utc;
use db::models::attendance_record::{AttendanceStats, Model as AttendanceRecord};
use db::models::school_class::{Column, Entity};
use db::models::{student, user};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::classes::common::ClassResponse;
use crate::routes::common::{Paginated, db_error_response, forbidden, not_found, page_params};

#[derive(Debug, Deserialize)]
pub struct ListClassesQuery {
    pub query: Option<String>,
    pub is_active: Option<bool>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// GET /classes
///
/// List classes visible to the caller: all of them for administrators,
/// only owned classes for teachers.
///
/// ### Query Parameters
/// - `query`: substring match on class name or owning teacher's name
/// - `is_active`: filter on the active flag
/// - `page`, `per_page`: pagination (default 1 / 20, capped at 100)
///
/// ### Responses
/// - `200 OK` with a paginated class list, including teacher names and
///   current student counts
pub async fn list_classes(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ListClassesQuery>,
) -> impl IntoResponse {
    let db = app_state.db();
    let (page, per_page) = page_params(params.page, params.per_page);

    let mut condition = user.scope().classes_condition();
    if let Some(ref q) = params.query {
        // Teacher-name matches are resolved to IDs first so the filter
        // stays a plain condition on the classes table.
        let teacher_ids: Vec<i64> = match user::Entity::find()
            .select_only()
            .column(user::Column::Id)
            .filter(user::Column::Name.contains(q))
            .into_tuple()
            .all(db)
            .await
        {
            Ok(ids) => ids,
            Err(e) => return db_error_response(e),
        };
        condition = condition.add(
            Condition::any()
                .add(Column::Name.contains(q))
                .add(Column::TeacherId.is_in(teacher_ids)),
        );
    }
    if let Some(is_active) = params.is_active {
        condition = condition.add(Column::IsActive.eq(is_active));
    }

    let paginator = Entity::find()
        .filter(condition)
        .order_by_asc(Column::Name)
        .paginate(db, per_page);

    let total = match paginator.num_items().await {
        Ok(n) => n,
        Err(e) => return db_error_response(e),
    };
    let classes = match paginator.fetch_page(page - 1).await {
        Ok(classes) => classes,
        Err(e) => return db_error_response(e),
    };

    let class_ids: Vec<i64> = classes.iter().map(|c| c.id).collect();
    let teacher_ids: Vec<i64> = classes.iter().map(|c| c.teacher_id).collect();

    let teacher_names: HashMap<i64, String> = match user::Entity::find()
        .filter(user::Column::Id.is_in(teacher_ids))
        .all(db)
        .await
    {
        Ok(teachers) => teachers.into_iter().map(|t| (t.id, t.name)).collect(),
        Err(e) => return db_error_response(e),
    };

    let student_counts: HashMap<i64, u64> = match student::Entity::find()
        .select_only()
        .column(student::Column::ClassId)
        .column_as(student::Column::Id.count(), "count")
        .filter(student::Column::ClassId.is_in(class_ids))
        .group_by(student::Column::ClassId)
        .into_tuple::<(Option<i64>, i64)>()
        .all(db)
        .await
    {
        Ok(rows) => rows
            .into_iter()
            .filter_map(|(class_id, count)| class_id.map(|id| (id, count as u64)))
            .collect(),
        Err(e) => return db_error_response(e),
    };

    let items = classes
        .into_iter()
        .map(|class| {
            let teacher_name = teacher_names.get(&class.teacher_id).cloned();
            let count = student_counts.get(&class.id).copied().unwrap_or(0);
            ClassResponse::from_model(class)
                .with_teacher(teacher_name)
                .with_student_count(count)
        })
        .collect();

    Json(ApiResponse::success(
        Paginated {
            items,
            page,
            per_page,
            total,
        },
        "Classes retrieved successfully",
    ))
    .into_response()
}

#[derive(Debug, Serialize, Default)]
pub struct ClassDetailResponse {
    pub class: ClassResponse,
    pub today: Option<AttendanceStats>,
}

/// GET /classes/{class_id}
///
/// Fetch one class with its teacher, student count and today's
/// attendance aggregate.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` when a teacher requests a class they do not own
/// - `404 Not Found` on an unknown class
pub async fn get_class(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(class_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let found = match Entity::find_by_id(class_id)
        .find_also_related(user::Entity)
        .one(db)
        .await
    {
        Ok(found) => found,
        Err(e) => return db_error_response(e),
    };
    let Some((class, teacher)) = found else {
        return not_found(format!("Class ID {class_id} not found"));
    };

    match user.scope().can_access_class(db, class.id).await {
        Ok(true) => {}
        Ok(false) => return forbidden("You do not have access to this class"),
        Err(e) => return db_error_response(e),
    }

    let student_count = match class.student_count(db).await {
        Ok(count) => count,
        Err(e) => return db_error_response(e),
    };

    let today = Utc::now().date_naive();
    let stats = match AttendanceRecord::class_day_stats(db, class.id, today).await {
        Ok(stats) => stats,
        Err(e) => return db_error_response(e),
    };

    Json(ApiResponse::success(
        ClassDetailResponse {
            class: ClassResponse::from_model(class)
                .with_teacher(teacher.map(|t| t.name))
                .with_student_count(student_count),
            today: Some(stats),
        },
        "Class retrieved successfully",
    ))
    .into_response()
}
