#[cfg(test)]
mod tests {
    use crate::helpers::{empty_request, make_test_app, send, send_json};
    use axum::http::{StatusCode, header};
    use chrono::{Duration, NaiveDate};
    use db::models::{
        attendance_record::{self, AttendanceStatus},
        session, student,
        teacher,
    };
    use sea_orm::DatabaseConnection;
    use serde_json::json;
    use services::{authorization::AuthorizationPolicy, report_service::day_bounds};

    /// One closed CS session on 2024-03-01 (local) with a PRESENT and an ABSENT row.
    async fn seed_history(db: &DatabaseConnection) {
        let (from, _) = day_bounds(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let start = from + Duration::hours(9);
        let s = session::Model::create(db, "CS", start, start + Duration::minutes(10), None)
            .await
            .unwrap();
        session::Model::mark_inactive(db, &s.id).await.unwrap();

        let ada = student::Model::create(db, "Ada", "R1", "CS").await.unwrap();
        let bob = student::Model::create(db, "Bob", "R2", "CS").await.unwrap();
        attendance_record::Model::create(db, &s.id, &bob.id, AttendanceStatus::Absent, start)
            .await
            .unwrap();
        attendance_record::Model::create(db, &s.id, &ada.id, AttendanceStatus::Present, start)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn history_with_known_teacher() {
        let (app, state) = make_test_app(AuthorizationPolicy::enforced()).await;
        let t = teacher::Model::create(state.db(), "admin", "pw").await.unwrap();
        seed_history(state.db()).await;

        let uri = format!("/api/admin/history?teacher_id={}&department=CS&date=2024-03-01", t.id);
        let (status, json) = send_json(&app, empty_request("GET", &uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["data"],
            json!([
                { "name": "Ada", "roll_no": "R1", "status": "PRESENT" },
                { "name": "Bob", "roll_no": "R2", "status": "ABSENT" },
            ])
        );

        // another day is empty
        let uri = format!("/api/admin/history?teacher_id={}&department=CS&date=2024-03-02", t.id);
        let (_, json) = send_json(&app, empty_request("GET", &uri)).await;
        assert_eq!(json["data"], json!([]));
    }

    #[tokio::test]
    async fn history_rejects_bad_date_and_unknown_teacher() {
        let (app, state) = make_test_app(AuthorizationPolicy::enforced()).await;
        let t = teacher::Model::create(state.db(), "admin", "pw").await.unwrap();

        let uri = format!("/api/admin/history?teacher_id={}&department=CS&date=01-03-2024", t.id);
        let (status, _) = send_json(&app, empty_request("GET", &uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send_json(
            &app,
            empty_request("GET", "/api/admin/history?teacher_id=ghost&department=CS&date=2024-03-01"),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn export_serves_csv_attachment() {
        let (app, state) = make_test_app(AuthorizationPolicy::open()).await;
        seed_history(state.db()).await;

        let response = send(&app, empty_request("GET", "/api/admin/export?department=CS&date=2024-03-01")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"attendance_CS_2024-03-01.csv\""
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            std::str::from_utf8(&body).unwrap(),
            "Name,Roll No,Status\nAda,R1,PRESENT\nBob,R2,ABSENT\n"
        );
    }

    #[tokio::test]
    async fn export_filename_is_sanitized_for_any_department() {
        let (app, _) = make_test_app(AuthorizationPolicy::open()).await;

        for (department, expected) in [
            ("C%22S", "attachment; filename=\"attendance_C_S_2024-03-01.csv\""),
            ("C%0AS", "attachment; filename=\"attendance_C_S_2024-03-01.csv\""),
        ] {
            let uri = format!("/api/admin/export?department={department}&date=2024-03-01");
            let response = send(&app, empty_request("GET", &uri)).await;
            assert_eq!(response.status(), StatusCode::OK, "{department}");
            assert_eq!(response.headers()[header::CONTENT_DISPOSITION], expected);

            let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(std::str::from_utf8(&body).unwrap(), "Name,Roll No,Status\n");
        }
    }

    #[tokio::test]
    async fn export_is_forbidden_without_teacher_when_enforced() {
        let (app, _) = make_test_app(AuthorizationPolicy::enforced()).await;

        let (status, json) =
            send_json(&app, empty_request("GET", "/api/admin/export?department=CS&date=2024-03-01")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn list_and_delete_students() {
        let (app, state) = make_test_app(AuthorizationPolicy::enforced()).await;
        let t = teacher::Model::create(state.db(), "admin", "pw").await.unwrap();
        let b = student::Model::create(state.db(), "B", "R2", "EE").await.unwrap();
        student::Model::create(state.db(), "A", "R1", "CS").await.unwrap();

        let (status, json) =
            send_json(&app, empty_request("GET", &format!("/api/admin/students?teacher_id={}", t.id))).await;
        assert_eq!(status, StatusCode::OK);
        let rolls: Vec<_> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["roll_no"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(rolls, vec!["R1", "R2"]);

        let uri = format!("/api/admin/students/{}?teacher_id={}", b.id, t.id);
        let (status, json) = send_json(&app, empty_request("DELETE", &uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["message"], "Student deleted");
        assert!(student::Model::find_by_id(state.db(), &b.id).await.unwrap().is_none());

        let (status, _) = send_json(&app, empty_request("DELETE", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn admin_routes_reject_missing_teacher_when_enforced() {
        let (app, state) = make_test_app(AuthorizationPolicy::enforced()).await;
        let s = student::Model::create(state.db(), "A", "R1", "CS").await.unwrap();

        let (status, _) = send_json(&app, empty_request("GET", "/api/admin/students")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) =
            send_json(&app, empty_request("DELETE", &format!("/api/admin/students/{}", s.id))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(student::Model::find_by_id(state.db(), &s.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleted_students_drop_out_of_history() {
        let (app, state) = make_test_app(AuthorizationPolicy::open()).await;
        seed_history(state.db()).await;
        let ada = student::Model::find_by_roll_no(state.db(), "R1").await.unwrap().unwrap();

        let (status, _) =
            send_json(&app, empty_request("DELETE", &format!("/api/admin/students/{}", ada.id))).await;
        assert_eq!(status, StatusCode::OK);

        let (_, json) = send_json(
            &app,
            empty_request("GET", "/api/admin/history?department=CS&date=2024-03-01"),
        )
        .await;
        assert_eq!(json["data"], json!([{ "name": "Bob", "roll_no": "R2", "status": "ABSENT" }]));
    }
}
