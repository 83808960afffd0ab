#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::models::attendance_record::{AttendanceStatus, BatchEntry, Model as AttendanceRecord};
    use tower::ServiceExt;

    use crate::helpers::app::{
        bearer, create_admin, create_class, create_student, create_teacher, json_request,
        make_test_app, read_json, today,
    };

    #[tokio::test]
    async fn admin_sees_school_wide_figures() {
        let (app, db) = make_test_app().await;
        let admin = create_admin(&db, "admin@test.com").await;
        let t1 = create_teacher(&db, "t1@test.com").await;
        let t2 = create_teacher(&db, "t2@test.com").await;
        let c1 = create_class(&db, "Grade 1A", t1.id).await;
        let c2 = create_class(&db, "Grade 2B", t2.id).await;
        let s1 = create_student(&db, "STU00001", Some(c1.id)).await;
        let s2 = create_student(&db, "STU00002", Some(c2.id)).await;

        for (class, student, status) in [
            (&c1, &s1, AttendanceStatus::Present),
            (&c2, &s2, AttendanceStatus::Absent),
        ] {
            AttendanceRecord::record_batch(
                &db,
                class.id,
                today(),
                &[BatchEntry {
                    student_id: student.id,
                    status,
                    notes: None,
                }],
                class.teacher_id,
                chrono::Utc::now(),
            )
            .await
            .unwrap();
        }

        let response = app
            .oneshot(json_request("GET", "/api/dashboard", Some(&bearer(&admin)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["total_students"], 2);
        assert_eq!(body["data"]["total_classes"], 2);
        assert_eq!(body["data"]["total_teachers"], 2);
        assert_eq!(body["data"]["today"]["total"], 2);
        assert_eq!(body["data"]["today"]["present"], 1);
        assert_eq!(body["data"]["today"]["percentage"], 50.0);
    }

    #[tokio::test]
    async fn teacher_figures_are_restricted_to_their_classes() {
        let (app, db) = make_test_app().await;
        let mine = create_teacher(&db, "mine@test.com").await;
        let other = create_teacher(&db, "other@test.com").await;
        let my_class = create_class(&db, "Grade 1A", mine.id).await;
        let other_class = create_class(&db, "Grade 2B", other.id).await;
        let s1 = create_student(&db, "STU00001", Some(my_class.id)).await;
        let s2 = create_student(&db, "STU00002", Some(other_class.id)).await;

        for (class, student) in [(&my_class, &s1), (&other_class, &s2)] {
            AttendanceRecord::record_batch(
                &db,
                class.id,
                today(),
                &[BatchEntry {
                    student_id: student.id,
                    status: AttendanceStatus::Present,
                    notes: None,
                }],
                class.teacher_id,
                chrono::Utc::now(),
            )
            .await
            .unwrap();
        }

        let response = app
            .oneshot(json_request("GET", "/api/dashboard", Some(&bearer(&mine)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["total_students"], 1);
        assert_eq!(body["data"]["total_classes"], 1);
        assert!(body["data"].get("total_teachers").is_none());
        assert_eq!(body["data"]["today"]["total"], 1);
    }
}
