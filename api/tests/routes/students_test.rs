#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::models::attendance_record::{AttendanceStatus, BatchEntry, Model as AttendanceRecord};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::helpers::app::{
        bearer, create_admin, create_class, create_student, create_teacher, json_request,
        make_test_app, read_json, today,
    };

    #[tokio::test]
    async fn student_can_be_registered_and_found() {
        let (app, db) = make_test_app().await;
        let teacher = create_teacher(&db, "t@test.com").await;
        let class = create_class(&db, "Grade 1A", teacher.id).await;
        let auth = bearer(&teacher);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/students",
                Some(&auth),
                Some(json!({
                    "student_id": "STU00001",
                    "first_name": "Thandi",
                    "last_name": "Nkosi",
                    "date_of_birth": "2015-04-02",
                    "gender": "female",
                    "class_id": class.id,
                    "enrollment_date": "2023-01-15"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        assert_eq!(body["data"]["student_id"], "STU00001");
        assert_eq!(body["data"]["full_name"], "Thandi Nkosi");
        assert_eq!(body["data"]["status"], "active");

        let response = app
            .oneshot(json_request(
                "GET",
                "/api/students?query=Nkosi",
                Some(&auth),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["first_name"], "Thandi");
    }

    #[tokio::test]
    async fn duplicate_student_code_is_a_conflict() {
        let (app, db) = make_test_app().await;
        let teacher = create_teacher(&db, "t@test.com").await;
        create_student(&db, "STU00007", None).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/students",
                Some(&bearer(&teacher)),
                Some(json!({
                    "student_id": "STU00007",
                    "first_name": "Dup",
                    "last_name": "Licate",
                    "date_of_birth": "2015-04-02",
                    "gender": "male",
                    "enrollment_date": "2023-01-15"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_class_and_bad_enum_values_are_rejected() {
        let (app, db) = make_test_app().await;
        let teacher = create_teacher(&db, "t@test.com").await;
        let auth = bearer(&teacher);

        let base = json!({
            "student_id": "STU00010",
            "first_name": "A",
            "last_name": "B",
            "date_of_birth": "2015-04-02",
            "gender": "female",
            "enrollment_date": "2023-01-15"
        });

        let mut with_missing_class = base.clone();
        with_missing_class["class_id"] = json!(999);
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/students",
                Some(&auth),
                Some(with_missing_class),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let mut with_bad_gender = base.clone();
        with_bad_gender["gender"] = json!("robot");
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/students",
                Some(&auth),
                Some(with_bad_gender),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let mut with_bad_status = base;
        with_bad_status["status"] = json!("expelled");
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/students",
                Some(&auth),
                Some(with_bad_status),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn detail_includes_history_and_stats() {
        let (app, db) = make_test_app().await;
        let teacher = create_teacher(&db, "t@test.com").await;
        let class = create_class(&db, "Grade 1A", teacher.id).await;
        let student = create_student(&db, "STU00001", Some(class.id)).await;

        // Two present days and one absent day.
        for (offset, status) in [
            (2, AttendanceStatus::Present),
            (1, AttendanceStatus::Absent),
            (0, AttendanceStatus::Present),
        ] {
            let date = today() - chrono::Duration::days(offset);
            AttendanceRecord::record_batch(
                &db,
                class.id,
                date,
                &[BatchEntry {
                    student_id: student.id,
                    status,
                    notes: None,
                }],
                teacher.id,
                chrono::Utc::now(),
            )
            .await
            .unwrap();
        }

        let response = app
            .oneshot(json_request(
                "GET",
                &format!("/api/students/{}", student.id),
                Some(&bearer(&teacher)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["class_name"], "Grade 1A");
        assert_eq!(body["data"]["attendance"].as_array().unwrap().len(), 3);
        assert_eq!(body["data"]["stats"]["total"], 3);
        assert_eq!(body["data"]["stats"]["present"], 2);
        assert_eq!(body["data"]["stats"]["percentage"], 66.7);
    }

    #[tokio::test]
    async fn detail_history_respects_date_bounds() {
        let (app, db) = make_test_app().await;
        let teacher = create_teacher(&db, "t@test.com").await;
        let class = create_class(&db, "Grade 1A", teacher.id).await;
        let student = create_student(&db, "STU00001", Some(class.id)).await;

        for offset in 0..4 {
            let date = today() - chrono::Duration::days(offset);
            AttendanceRecord::record_batch(
                &db,
                class.id,
                date,
                &[BatchEntry {
                    student_id: student.id,
                    status: AttendanceStatus::Present,
                    notes: None,
                }],
                teacher.id,
                chrono::Utc::now(),
            )
            .await
            .unwrap();
        }

        let from = today() - chrono::Duration::days(1);
        let response = app
            .oneshot(json_request(
                "GET",
                &format!("/api/students/{}?from_date={}", student.id, from),
                Some(&bearer(&teacher)),
                None,
            ))
            .await
            .unwrap();
        let body = read_json(response).await;
        assert_eq!(body["data"]["attendance"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["stats"]["total"], 2);
    }

    #[tokio::test]
    async fn deleting_a_student_is_admin_only() {
        let (app, db) = make_test_app().await;
        let admin = create_admin(&db, "admin@test.com").await;
        let teacher = create_teacher(&db, "t@test.com").await;
        let student = create_student(&db, "STU00001", None).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "DELETE",
                &format!("/api/students/{}", student.id),
                Some(&bearer(&teacher)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(json_request(
                "DELETE",
                &format!("/api/students/{}", student.id),
                Some(&bearer(&admin)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(json_request(
                "GET",
                &format!("/api/students/{}", student.id),
                Some(&bearer(&admin)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
