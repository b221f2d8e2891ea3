#[cfg(test)]
mod tests {
    use crate::helpers::{empty_request, json_request, make_test_app, send_json};
    use axum::http::StatusCode;
    use db::models::{
        attendance_record::{self, AttendanceStatus},
        session::{self, SessionStatus},
        student,
    };
    use sea_orm::{EntityTrait, PaginatorTrait};
    use serde_json::json;
    use services::{authorization::AuthorizationPolicy, teacher_service::TeacherService};

    #[tokio::test]
    async fn start_session_with_known_teacher() {
        let (app, state) = make_test_app(AuthorizationPolicy::enforced()).await;
        let teacher = TeacherService::create(state.db(), state.verifier(), "admin", "pw")
            .await
            .unwrap();

        let (status, json) = send_json(
            &app,
            json_request(
                "POST",
                "/api/sessions/start",
                json!({ "teacher_id": teacher.id, "department": "CS", "duration_minutes": 1 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let id = json["data"]["session_id"].as_str().unwrap();
        let s = session::Model::find_by_id(state.db(), id).await.unwrap().unwrap();
        assert_eq!(s.status, SessionStatus::Active);
        assert_eq!(s.department, "CS");
        assert_eq!((s.end_time - s.start_time).num_milliseconds(), 60_000);
        assert_eq!(s.created_by.as_deref(), Some(teacher.id.as_str()));
    }

    #[tokio::test]
    async fn enforced_policy_rejects_missing_or_unknown_teacher() {
        let (app, state) = make_test_app(AuthorizationPolicy::enforced()).await;

        for body in [
            json!({ "department": "CS", "duration_minutes": 5 }),
            json!({ "teacher_id": "ghost", "department": "CS", "duration_minutes": 5 }),
        ] {
            let (status, json) = send_json(&app, json_request("POST", "/api/sessions/start", body)).await;
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(json["success"], false);
        }
        assert_eq!(session::Entity::find().count(state.db()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn open_policy_accepts_anonymous_start() {
        let (app, _) = make_test_app(AuthorizationPolicy::open()).await;

        let (status, _) = send_json(
            &app,
            json_request(
                "POST",
                "/api/sessions/start",
                json!({ "teacher_id": "whoever", "department": "CS", "duration_minutes": 5 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn second_start_conflicts_without_new_row() {
        let (app, state) = make_test_app(AuthorizationPolicy::open()).await;
        let body = json!({ "department": "CS", "duration_minutes": 5 });

        let (first, _) = send_json(&app, json_request("POST", "/api/sessions/start", body.clone())).await;
        assert_eq!(first, StatusCode::OK);

        let (status, json) = send_json(&app, json_request("POST", "/api/sessions/start", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "session already active");
        assert_eq!(session::Entity::find().count(state.db()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn invalid_start_requests_are_400() {
        let (app, _) = make_test_app(AuthorizationPolicy::open()).await;

        for body in [
            json!({ "duration_minutes": 5 }),
            json!({ "department": "CS" }),
            json!({ "department": "CS", "duration_minutes": 0 }),
            json!({ "department": "  ", "duration_minutes": 5 }),
        ] {
            let (status, json) =
                send_json(&app, json_request("POST", "/api/sessions/start", body.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(json["success"], false);
        }
    }

    #[tokio::test]
    async fn active_session_lookup() {
        let (app, _) = make_test_app(AuthorizationPolicy::open()).await;

        let (status, json) = send_json(&app, empty_request("GET", "/api/sessions/active?department=CS")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"].is_null());

        let (_, started) = send_json(
            &app,
            json_request("POST", "/api/sessions/start", json!({ "department": "CS", "duration_minutes": 5 })),
        )
        .await;

        let (status, json) = send_json(&app, empty_request("GET", "/api/sessions/active?department=CS")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], started["data"]["session_id"]);
        assert_eq!(json["data"]["status"], "ACTIVE");

        let (status, _) = send_json(&app, empty_request("GET", "/api/sessions/active")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn close_session_backfills_absentees() {
        let (app, state) = make_test_app(AuthorizationPolicy::open()).await;
        let y = student::Model::create(state.db(), "Y", "R2", "CS").await.unwrap();

        let (_, started) = send_json(
            &app,
            json_request("POST", "/api/sessions/start", json!({ "department": "CS", "duration_minutes": 30 })),
        )
        .await;
        let session_id = started["data"]["session_id"].as_str().unwrap().to_owned();
        let uri = format!("/api/sessions/{session_id}/close");

        let (status, json) = send_json(&app, json_request("POST", &uri, json!({}))).await;
        assert_eq!(status, StatusCode::OK, "{json}");

        let rec = attendance_record::Model::find(state.db(), &session_id, &y.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rec.status, AttendanceStatus::Absent);
        let s = session::Model::find_by_id(state.db(), &session_id).await.unwrap().unwrap();
        assert_eq!(s.status, SessionStatus::Inactive);

        // closing twice is fine
        let (status, _) = send_json(&app, json_request("POST", &uri, json!({}))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn close_unknown_session_is_404() {
        let (app, _) = make_test_app(AuthorizationPolicy::open()).await;
        let (status, json) =
            send_json(&app, json_request("POST", "/api/sessions/missing/close", json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn close_requires_teacher_when_enforced() {
        let (app, state) = make_test_app(AuthorizationPolicy::enforced()).await;
        let now = chrono::Utc::now();
        let s = session::Model::create(state.db(), "CS", now, now + chrono::Duration::minutes(5), None)
            .await
            .unwrap();

        let (status, _) = send_json(
            &app,
            json_request("POST", &format!("/api/sessions/{}/close", s.id), json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
