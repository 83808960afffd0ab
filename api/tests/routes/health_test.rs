#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use crate::helpers::app::{json_request, make_test_app, read_json};

    #[tokio::test]
    async fn health_check_returns_ok_json() {
        let (app, _db) = make_test_app().await;

        let response = app
            .oneshot(json_request("GET", "/api/health", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");
        assert_eq!(json["message"], "Health check passed");
    }
}
