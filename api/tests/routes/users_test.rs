#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::helpers::app::{
        bearer, create_admin, create_teacher, json_request, make_test_app, read_json,
    };

    #[tokio::test]
    async fn admin_can_create_and_list_users() {
        let (app, db) = make_test_app().await;
        let admin = create_admin(&db, "admin@test.com").await;
        let auth = bearer(&admin);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/users",
                Some(&auth),
                Some(json!({
                    "name": "New Teacher",
                    "email": "newteacher@test.com",
                    "password": "password123",
                    "role": "teacher"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        assert_eq!(body["data"]["email"], "newteacher@test.com");
        assert_eq!(body["data"]["role"], "teacher");

        let response = app
            .oneshot(json_request(
                "GET",
                "/api/users?role=teacher",
                Some(&auth),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["email"], "newteacher@test.com");
    }

    #[tokio::test]
    async fn user_management_is_admin_only() {
        let (app, db) = make_test_app().await;
        let teacher = create_teacher(&db, "plain@test.com").await;

        let response = app
            .oneshot(json_request("GET", "/api/users", Some(&bearer(&teacher)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let (app, db) = make_test_app().await;
        let admin = create_admin(&db, "admin@test.com").await;
        create_teacher(&db, "taken@test.com").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/users",
                Some(&bearer(&admin)),
                Some(json!({
                    "name": "Dup",
                    "email": "taken@test.com",
                    "password": "password123",
                    "role": "teacher"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_role_and_short_password_are_rejected() {
        let (app, db) = make_test_app().await;
        let admin = create_admin(&db, "admin@test.com").await;
        let auth = bearer(&admin);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/users",
                Some(&auth),
                Some(json!({
                    "name": "X",
                    "email": "x@test.com",
                    "password": "password123",
                    "role": "principal"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/users",
                Some(&auth),
                Some(json!({
                    "name": "X",
                    "email": "x@test.com",
                    "password": "short",
                    "role": "teacher"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
