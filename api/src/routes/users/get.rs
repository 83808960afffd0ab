use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use db::models::user::{Column, Entity, Role};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use std::str::FromStr;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::{Paginated, bad_request, db_error_response, page_params};
use crate::routes::users::common::UserResponse;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub query: Option<String>,
    pub role: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// GET /users
///
/// List users with optional name/email search and role filter. Admin only.
///
/// ### Query Parameters
/// - `query`: case-insensitive substring match on name or email
/// - `role`: `administrator` or `teacher`
/// - `page`, `per_page`: pagination (default 1 / 20, capped at 100)
///
/// ### Responses
/// - `200 OK` with a paginated user list
/// - `400 Bad Request` on an unknown role value
pub async fn list_users(
    State(app_state): State<AppState>,
    Query(params): Query<ListUsersQuery>,
) -> impl IntoResponse {
    let (page, per_page) = page_params(params.page, params.per_page);

    let mut condition = Condition::all();
    if let Some(ref q) = params.query {
        condition = condition.add(
            Condition::any()
                .add(Column::Name.contains(q))
                .add(Column::Email.contains(q)),
        );
    }
    if let Some(ref role) = params.role {
        match Role::from_str(role) {
            Ok(role) => condition = condition.add(Column::Role.eq(role)),
            Err(_) => return bad_request(format!("Unknown role: {role}")),
        }
    }

    let paginator = Entity::find()
        .filter(condition)
        .order_by_asc(Column::Id)
        .paginate(app_state.db(), per_page);

    let total = match paginator.num_items().await {
        Ok(n) => n,
        Err(e) => return db_error_response(e),
    };
    let users = match paginator.fetch_page(page - 1).await {
        Ok(users) => users,
        Err(e) => return db_error_response(e),
    };

    Json(ApiResponse::success(
        Paginated {
            items: users.into_iter().map(UserResponse::from).collect(),
            page,
            per_page,
            total,
        },
        "Users retrieved successfully",
    ))
    .into_response()
}
