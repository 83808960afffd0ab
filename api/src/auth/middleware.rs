use crate::auth::claims::AuthUser;
use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::TypedHeader;
use headers::UserAgent;
use tracing::info;

/// Logs method, path, user ID (if authenticated) and user-agent for each
/// incoming HTTP request. CORS preflight `OPTIONS` requests are skipped.
///
/// ### Usage:
/// Apply this middleware globally using:
///
/// ```ignore
/// use axum::Router;
/// use axum::middleware::from_fn;
/// use api::auth::middleware::log_request;
///
/// let app = Router::new().layer(from_fn(log_request));
/// ```
pub async fn log_request(req: Request<Body>, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    if parts.method == Method::OPTIONS {
        let req = Request::from_parts(parts, body);
        return next.run(req).await;
    }

    let user_id = AuthUser::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|AuthUser(c)| c.sub);

    let user_agent = TypedHeader::<UserAgent>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|TypedHeader(ua)| ua.to_string());

    info!(
        method = ?parts.method,
        path = %parts.uri.path(),
        user = user_id.unwrap_or(0),
        user_agent = user_agent.unwrap_or_else(|| "unknown".into()),
        "Incoming request"
    );

    let req = Request::from_parts(parts, body);
    next.run(req).await
}
