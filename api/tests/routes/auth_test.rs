#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::helpers::app::{create_teacher, json_request, make_test_app, read_json};

    #[tokio::test]
    async fn login_returns_token_for_valid_credentials() {
        let (app, db) = make_test_app().await;
        let teacher = create_teacher(&db, "login@test.com").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"email": "login@test.com", "password": "password"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["id"], teacher.id);
        assert_eq!(body["data"]["role"], "teacher");
        let token = body["data"]["token"].as_str().unwrap().to_owned();

        // The issued token must be accepted by a protected route.
        let response = app
            .oneshot(json_request(
                "GET",
                "/api/dashboard",
                Some(&format!("Bearer {token}")),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let (app, db) = make_test_app().await;
        create_teacher(&db, "wrongpw@test.com").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"email": "wrongpw@test.com", "password": "nope"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = read_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn login_rejects_unknown_email_and_bad_input() {
        let (app, _db) = make_test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"email": "ghost@test.com", "password": "password"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"email": "not-an-email", "password": "password"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let (app, _db) = make_test_app().await;

        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/attendance", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(json_request(
                "GET",
                "/api/attendance",
                Some("Bearer not-a-jwt"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
