#[cfg(test)]
mod tests {
    use crate::helpers::{empty_request, json_request, make_test_app, send_json};
    use axum::http::StatusCode;
    use chrono::{Duration, Local, Utc};
    use db::models::{
        attendance_record::{self, AttendanceStatus},
        session::{self, SessionStatus},
        student,
    };
    use serde_json::json;
    use services::{authorization::AuthorizationPolicy, session_service::SessionService};

    #[tokio::test]
    async fn full_session_lifecycle() {
        let (app, state) = make_test_app(AuthorizationPolicy::open()).await;
        let x = student::Model::create(state.db(), "X", "R1", "CS").await.unwrap();
        let y = student::Model::create(state.db(), "Y", "R2", "CS").await.unwrap();

        let (status, started) = send_json(
            &app,
            json_request("POST", "/api/sessions/start", json!({ "department": "CS", "duration_minutes": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let session_id = started["data"]["session_id"].as_str().unwrap().to_owned();

        let (status, json) = send_json(
            &app,
            json_request("POST", "/api/attendance/mark", json!({ "student_id": x.id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["message"], "Attendance marked");

        // second mark by the same student
        let (status, json) = send_json(
            &app,
            json_request("POST", "/api/attendance/mark", json!({ "student_id": x.id })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "attendance already marked for this session");

        // the window elapses and the sweep runs
        let report = SessionService::sweep_at(state.db(), Utc::now() + Duration::minutes(2))
            .await
            .unwrap();
        assert_eq!(report.sessions_closed, 1);
        assert_eq!(report.absentees_recorded, 1);

        let s = session::Model::find_by_id(state.db(), &session_id).await.unwrap().unwrap();
        assert_eq!(s.status, SessionStatus::Inactive);
        let x_rec = attendance_record::Model::find(state.db(), &session_id, &x.id).await.unwrap().unwrap();
        let y_rec = attendance_record::Model::find(state.db(), &session_id, &y.id).await.unwrap().unwrap();
        assert_eq!(x_rec.status, AttendanceStatus::Present);
        assert_eq!(y_rec.status, AttendanceStatus::Absent);

        // marks after closure are rejected
        let (status, json) = send_json(
            &app,
            json_request("POST", "/api/attendance/mark", json!({ "student_id": y.id })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "no active attendance session for this department");

        let date = s.start_time.with_timezone(&Local).date_naive().format("%Y-%m-%d");
        let (status, json) = send_json(
            &app,
            empty_request("GET", &format!("/api/admin/history?department=CS&date={date}")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["data"],
            json!([
                { "name": "X", "roll_no": "R1", "status": "PRESENT" },
                { "name": "Y", "roll_no": "R2", "status": "ABSENT" },
            ])
        );
    }

    #[tokio::test]
    async fn mark_without_open_session_is_400() {
        let (app, state) = make_test_app(AuthorizationPolicy::open()).await;
        let x = student::Model::create(state.db(), "X", "R1", "CS").await.unwrap();

        let (status, json) = send_json(
            &app,
            json_request("POST", "/api/attendance/mark", json!({ "student_id": x.id })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn mark_unknown_student_is_400() {
        let (app, _) = make_test_app(AuthorizationPolicy::open()).await;

        let (status, json) = send_json(
            &app,
            json_request("POST", "/api/attendance/mark", json!({ "student_id": "nobody" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "invalid student");

        let (status, json) = send_json(&app, json_request("POST", "/api/attendance/mark", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "student_id is required");
    }
}
