#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::models::attendance_record::{Column, Entity};
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::helpers::app::{
        bearer, create_admin, create_class, create_student, create_teacher, json_request,
        make_test_app, read_json, today,
    };

    fn batch(class_id: i64, date: &str, attendance: Value) -> Value {
        json!({
            "class_id": class_id,
            "attendance_date": date,
            "attendance": attendance
        })
    }

    #[tokio::test]
    async fn batch_records_and_reports_outcomes() {
        let (app, db) = make_test_app().await;
        let teacher = create_teacher(&db, "t@test.com").await;
        let class = create_class(&db, "Grade 1A", teacher.id).await;
        let s1 = create_student(&db, "STU00001", Some(class.id)).await;
        let s2 = create_student(&db, "STU00002", Some(class.id)).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/attendance",
                Some(&bearer(&teacher)),
                Some(batch(
                    class.id,
                    "2026-03-02",
                    json!([
                        {"student_id": s1.id, "status": "present"},
                        {"student_id": s2.id, "status": "absent", "notes": "Sick"}
                    ]),
                )),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["data"]["applied"], 2);
        assert_eq!(body["data"]["failed"], 0);
        assert_eq!(body["data"]["outcomes"][0]["action"], "created");
        assert_eq!(body["data"]["stats"]["total"], 2);
        assert_eq!(body["data"]["stats"]["present"], 1);
        assert_eq!(body["data"]["stats"]["percentage"], 50.0);

        assert_eq!(Entity::find().count(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn resubmission_overwrites_instead_of_duplicating() {
        let (app, db) = make_test_app().await;
        let teacher = create_teacher(&db, "t@test.com").await;
        let class = create_class(&db, "Grade 1A", teacher.id).await;
        let s1 = create_student(&db, "STU00001", Some(class.id)).await;
        let s2 = create_student(&db, "STU00002", Some(class.id)).await;

        let first = batch(
            class.id,
            "2026-03-02",
            json!([
                {"student_id": s1.id, "status": "present"},
                {"student_id": s2.id, "status": "present"}
            ]),
        );
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/attendance",
                Some(&bearer(&teacher)),
                Some(first),
            ))
            .await
            .unwrap();

        // Second submission corrects one student only.
        let second = batch(
            class.id,
            "2026-03-02",
            json!([{"student_id": s1.id, "status": "late", "notes": "Bus delay"}]),
        );
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/attendance",
                Some(&bearer(&teacher)),
                Some(second),
            ))
            .await
            .unwrap();
        let body = read_json(response).await;
        assert_eq!(body["data"]["outcomes"][0]["action"], "updated");

        assert_eq!(Entity::find().count(&db).await.unwrap(), 2);
        let updated = Entity::find()
            .filter(Column::StudentId.eq(s1.id))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status.to_string(), "late");
        assert_eq!(updated.notes.as_deref(), Some("Bus delay"));
        let untouched = Entity::find()
            .filter(Column::StudentId.eq(s2.id))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.status.to_string(), "present");
    }

    #[tokio::test]
    async fn unknown_student_fails_its_entry_only() {
        let (app, db) = make_test_app().await;
        let teacher = create_teacher(&db, "t@test.com").await;
        let class = create_class(&db, "Grade 1A", teacher.id).await;
        let s1 = create_student(&db, "STU00001", Some(class.id)).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/attendance",
                Some(&bearer(&teacher)),
                Some(batch(
                    class.id,
                    "2026-03-02",
                    json!([
                        {"student_id": s1.id, "status": "present"},
                        {"student_id": 9999, "status": "present"}
                    ]),
                )),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["data"]["applied"], 1);
        assert_eq!(body["data"]["failed"], 1);
        assert_eq!(body["data"]["outcomes"][1]["student_id"], 9999);
        assert!(
            body["data"]["outcomes"][1]["error"]
                .as_str()
                .unwrap()
                .contains("not found")
        );
        assert_eq!(Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn malformed_batches_are_rejected_before_any_write() {
        let (app, db) = make_test_app().await;
        let teacher = create_teacher(&db, "t@test.com").await;
        let class = create_class(&db, "Grade 1A", teacher.id).await;
        let s1 = create_student(&db, "STU00001", Some(class.id)).await;
        let auth = bearer(&teacher);

        // Empty batch.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/attendance",
                Some(&auth),
                Some(batch(class.id, "2026-03-02", json!([]))),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Status outside the closed enum.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/attendance",
                Some(&auth),
                Some(batch(
                    class.id,
                    "2026-03-02",
                    json!([{"student_id": s1.id, "status": "holiday"}]),
                )),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Overlong notes.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/attendance",
                Some(&auth),
                Some(batch(
                    class.id,
                    "2026-03-02",
                    json!([{"student_id": s1.id, "status": "present", "notes": "x".repeat(501)}]),
                )),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert_eq!(Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn teacher_cannot_mark_a_foreign_class() {
        let (app, db) = make_test_app().await;
        let owner = create_teacher(&db, "owner@test.com").await;
        let intruder = create_teacher(&db, "intruder@test.com").await;
        let class = create_class(&db, "Grade 1A", owner.id).await;
        let s1 = create_student(&db, "STU00001", Some(class.id)).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/attendance",
                Some(&bearer(&intruder)),
                Some(batch(
                    class.id,
                    "2026-03-02",
                    json!([{"student_id": s1.id, "status": "present"}]),
                )),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(Entity::find().count(&db).await.unwrap(), 0);

        // An admin marking an unknown class gets a 404 instead.
        let admin = create_admin(&db, "admin@test.com").await;
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/attendance",
                Some(&bearer(&admin)),
                Some(batch(
                    999,
                    "2026-03-02",
                    json!([{"student_id": s1.id, "status": "present"}]),
                )),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn listing_is_scoped_and_defaults_to_today() {
        let (app, db) = make_test_app().await;
        let mine = create_teacher(&db, "mine@test.com").await;
        let other = create_teacher(&db, "other@test.com").await;
        let my_class = create_class(&db, "Grade 1A", mine.id).await;
        let other_class = create_class(&db, "Grade 2B", other.id).await;
        let s1 = create_student(&db, "STU00001", Some(my_class.id)).await;
        let s2 = create_student(&db, "STU00002", Some(other_class.id)).await;

        let date = today().to_string();
        for (teacher, class, student) in [(&mine, &my_class, &s1), (&other, &other_class, &s2)] {
            app.clone()
                .oneshot(json_request(
                    "POST",
                    "/api/attendance",
                    Some(&bearer(teacher)),
                    Some(batch(
                        class.id,
                        &date,
                        json!([{"student_id": student.id, "status": "present"}]),
                    )),
                ))
                .await
                .unwrap();
        }

        // No date parameter: defaults to today, scoped to own classes.
        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/attendance",
                Some(&bearer(&mine)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["class_name"], "Grade 1A");
        assert_eq!(body["data"]["items"][0]["student_code"], "STU00001");

        // Filtering on a foreign class yields an empty page, not an error.
        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                &format!("/api/attendance?class_id={}", other_class.id),
                Some(&bearer(&mine)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["total"], 0);

        // Admins see both records.
        let admin = create_admin(&db, "admin@test.com").await;
        let response = app
            .oneshot(json_request("GET", "/api/attendance", Some(&bearer(&admin)), None))
            .await
            .unwrap();
        let body = read_json(response).await;
        assert_eq!(body["data"]["total"], 2);
    }

    #[tokio::test]
    async fn unknown_status_filter_is_rejected() {
        let (app, db) = make_test_app().await;
        let teacher = create_teacher(&db, "t@test.com").await;

        let response = app
            .oneshot(json_request(
                "GET",
                "/api/attendance?status=holiday",
                Some(&bearer(&teacher)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn editing_a_record_is_scoped_and_restamps_attribution() {
        let (app, db) = make_test_app().await;
        let owner = create_teacher(&db, "owner@test.com").await;
        let intruder = create_teacher(&db, "intruder@test.com").await;
        let class = create_class(&db, "Grade 1A", owner.id).await;
        let s1 = create_student(&db, "STU00001", Some(class.id)).await;

        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/attendance",
                Some(&bearer(&owner)),
                Some(batch(
                    class.id,
                    "2026-03-02",
                    json!([{"student_id": s1.id, "status": "absent"}]),
                )),
            ))
            .await
            .unwrap();
        let record = Entity::find().one(&db).await.unwrap().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/attendance/{}", record.id),
                Some(&bearer(&intruder)),
                Some(json!({"status": "excused"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/attendance/{}", record.id),
                Some(&bearer(&owner)),
                Some(json!({"status": "excused", "notes": "Doctor's appointment"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["status"], "excused");
        assert_eq!(body["data"]["notes"], "Doctor's appointment");
        assert_eq!(body["data"]["marked_by"], owner.id);

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/attendance/9999",
                Some(&bearer(&owner)),
                Some(json!({"status": "present"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleting_a_record_is_admin_only() {
        let (app, db) = make_test_app().await;
        let admin = create_admin(&db, "admin@test.com").await;
        let teacher = create_teacher(&db, "t@test.com").await;
        let class = create_class(&db, "Grade 1A", teacher.id).await;
        let s1 = create_student(&db, "STU00001", Some(class.id)).await;

        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/attendance",
                Some(&bearer(&teacher)),
                Some(batch(
                    class.id,
                    "2026-03-02",
                    json!([{"student_id": s1.id, "status": "present"}]),
                )),
            ))
            .await
            .unwrap();
        let record = Entity::find().one(&db).await.unwrap().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "DELETE",
                &format!("/api/attendance/{}", record.id),
                Some(&bearer(&teacher)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .oneshot(json_request(
                "DELETE",
                &format!("/api/attendance/{}", record.id),
                Some(&bearer(&admin)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(Entity::find().count(&db).await.unwrap(), 0);
    }
}
