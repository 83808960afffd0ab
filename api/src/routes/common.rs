//! Helpers shared across route groups: pagination clamping and the
//! mapping from domain failures onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::error::DomainError;
use sea_orm::DbErr;
use serde::Serialize;

use crate::response::ApiResponse;

pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;

/// Clamps raw pagination query parameters to sane 1-based values.
pub fn page_params(page: Option<u64>, per_page: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    (page, per_page)
}

/// Standard pagination envelope included in list responses.
#[derive(Debug, Serialize, Default)]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// Maps a `DomainError` onto the standard error response.
///
/// `Validation` → 400, `NotFound` → 404, `Conflict` → 409; database
/// failures are logged and reported as an opaque 500.
pub fn domain_error_response(err: DomainError) -> Response {
    let (status, message) = match err {
        DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        DomainError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        DomainError::Db(e) => return db_error_response(e),
    };
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

pub fn db_error_response(err: DbErr) -> Response {
    tracing::error!(error = %err, "Database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("Database error")),
    )
        .into_response()
}

pub fn forbidden(message: impl Into<String>) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ApiResponse::<()>::error(message)),
    )
        .into_response()
}

pub fn not_found(message: impl Into<String>) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error(message)),
    )
        .into_response()
}

pub fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error(message)),
    )
        .into_response()
}
