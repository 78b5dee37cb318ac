use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::{Value, json};

use facecheck_attendance::domain::repository::{StudentRepository, TeacherRepository};
use facecheck_attendance::infra::db::ConnectionManager;
use facecheck_attendance::router::build_router;
use facecheck_attendance::state::AppState;
use facecheck_domain::attendance::AttendanceStatus;
use facecheck_testing::db::setup_test_db;
use facecheck_testing::embedding::sample_embedding;

use crate::helpers::{
    TEST_ORIGIN, add_attendance, add_camera, new_attendance, school, test_server, test_state, utc,
};

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_describe_service_at_root() {
    let state = test_state().await;
    let server = test_server(&state);

    let res = server.get("/").await;
    res.assert_status_ok();
    res.assert_json(&json!({ "message": "Attendance System API", "status": "running" }));

    server.get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_report_connected_then_disconnected_database() {
    let state = test_state().await;
    let server = test_server(&state);

    let res = server.get("/api/health").await;
    res.assert_status_ok();
    res.assert_json(&json!({ "status": "healthy", "database": "connected" }));

    state.conn.disconnect().await;
    let res = server.get("/api/health").await;
    res.assert_status_ok();
    res.assert_json(&json!({ "status": "unhealthy", "database": "disconnected" }));
}

#[tokio::test]
async fn should_return_500_when_database_is_gone() {
    let conn = ConnectionManager::from_connection(setup_test_db().await);
    conn.disconnect().await;
    let server = test_server(&AppState::new(conn));

    let res = server.get("/api/teachers").await;
    res.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json();
    assert_eq!(body["kind"], "INTERNAL");
    assert!(body["message"].as_str().unwrap().contains("list teachers"));
}

// ── Not found ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_map_missing_entities_to_404() {
    let state = test_state().await;
    let server = test_server(&state);

    let cases = [
        ("/api/teachers/9", "TEACHER_NOT_FOUND"),
        ("/api/teachers/email/none@school.edu", "TEACHER_NOT_FOUND"),
        ("/api/classes/9", "CLASS_NOT_FOUND"),
        ("/api/classes/9/full", "CLASS_NOT_FOUND"),
        ("/api/students/9", "STUDENT_NOT_FOUND"),
        ("/api/students/code/HS999", "STUDENT_NOT_FOUND"),
        ("/api/embeddings/9", "EMBEDDING_NOT_FOUND"),
        ("/api/embeddings/student/9/latest", "EMBEDDING_NOT_FOUND"),
        ("/api/cameras/9", "CAMERA_NOT_FOUND"),
        ("/api/cameras/9/statistics", "CAMERA_NOT_FOUND"),
        ("/api/attendance/9", "ATTENDANCE_NOT_FOUND"),
    ];
    for (path, kind) in cases {
        let res = server.get(path).await;
        res.assert_status(StatusCode::NOT_FOUND);
        let body: Value = res.json();
        assert_eq!(body["kind"], kind, "{path}");
    }

    let res = server.get("/api/nothing-here").await;
    res.assert_status(StatusCode::NOT_FOUND);
    let body: Value = res.json();
    assert_eq!(body["kind"], "NOT_FOUND");
}

#[tokio::test]
async fn should_return_empty_lists_for_unknown_parents() {
    let state = test_state().await;
    let server = test_server(&state);

    for path in [
        "/api/teachers/9/classes",
        "/api/classes/9/students",
        "/api/students/class/9",
        "/api/embeddings/student/9",
        "/api/embeddings/class/9",
        "/api/attendance/student/9",
        "/api/attendance/class/9",
    ] {
        let res = server.get(path).await;
        res.assert_status_ok();
        res.assert_json(&json!([]));
    }
}

// ── Writes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_update_and_delete_teacher_over_http() {
    let state = test_state().await;
    let server = test_server(&state);

    let res = server
        .post("/api/teachers")
        .json(&json!({ "full_name": "Nguyen Van A", "email": "a@school.edu", "phone": null }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let id = res.json::<Value>()["id"].as_i64().unwrap();
    assert!(id > 0);

    let path = format!("/api/teachers/{id}");
    let res = server.patch(&path).json(&json!({})).await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["kind"], "MISSING_DATA");

    server
        .patch(&path)
        .json(&json!({ "phone": "" }))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let teacher: Value = server.get(&path).await.json();
    assert_eq!(teacher["phone"], "");
    assert_eq!(teacher["full_name"], "Nguyen Van A");

    server
        .patch("/api/teachers/999")
        .json(&json!({ "phone": "1" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
    assert!(state.teacher_repo().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_malformed_bodies_and_paths() {
    let state = test_state().await;
    let server = test_server(&state);

    let res = server.post("/api/classes").json(&json!({ "class_name": "10A1" })).await;
    res.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    for uri in [
        "/api/attendance/status/sleeping",
        "/api/attendance/date/2025-13-01",
        "/api/teachers/abc",
        "/api/attendance/class/1/date/yesterday",
        "/api/students?gender=robot",
        "/api/attendance/statistics/class/1?start_date=soon&end_date=2025-09-01",
    ] {
        let res = server.get(uri).await;
        res.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = res.json();
        assert_eq!(body["kind"], "BAD_REQUEST", "{uri}");
        assert!(!body["message"].as_str().unwrap().is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn should_record_attendance_and_default_method() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let server = test_server(&state);

    let res = server
        .post("/api/attendance")
        .json(&json!({
            "student_id": fixture.student_id,
            "class_id": fixture.class_id,
            "session": "morning",
            "status": "late",
            "note": "15 minutes late",
            "timestamp": "2025-09-08T07:45:00Z",
        }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let id = res.json::<Value>()["id"].as_i64().unwrap();

    let record: Value = server.get(&format!("/api/attendance/{id}")).await.json();
    assert_eq!(record["method"], "face_recognition");
    assert_eq!(record["status"], "late");
    assert_eq!(record["camera_name"], Value::Null);
    assert_eq!(record["student_name"], "S1");
    assert_eq!(record["timestamp"], "2025-09-08T07:45:00.000Z");

    let by_date: Value = server.get("/api/attendance/date/2025-09-08").await.json();
    assert_eq!(by_date.as_array().unwrap().len(), 1);
    let by_class_date: Value = server
        .get(&format!("/api/attendance/class/{}/date/2025-09-08", fixture.class_id))
        .await
        .json();
    assert_eq!(by_class_date.as_array().unwrap().len(), 1);
    let late: Value = server.get("/api/attendance/status/late").await.json();
    assert_eq!(late.as_array().unwrap().len(), 1);
    let evening: Value = server.get("/api/attendance/session/evening").await.json();
    assert_eq!(evening, json!([]));
}

// ── Reports ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_validate_statistics_date_range() {
    let state = test_state().await;
    let fixture = school(&state).await;
    for day in [1, 2, 10] {
        add_attendance(
            &state,
            new_attendance(
                fixture.student_id,
                fixture.class_id,
                AttendanceStatus::Present,
                utc(2025, 9, day, 7, 30),
            ),
        )
        .await;
    }
    let server = test_server(&state);
    let path = format!("/api/attendance/statistics/class/{}", fixture.class_id);

    let all: Value = server.get(&path).await.json();
    assert_eq!(all["total_records"], 3);
    assert_eq!(all["present_count"], 3);

    let window: Value = server
        .get(&path)
        .add_query_param("start_date", "2025-09-01")
        .add_query_param("end_date", "2025-09-02")
        .await
        .json();
    assert_eq!(window["total_records"], 2);

    let res = server.get(&path).add_query_param("start_date", "2025-09-01").await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["kind"], "INVALID_DATE_RANGE");

    let res = server
        .get(&format!("/api/attendance/summary/student/{}", fixture.student_id))
        .add_query_param("start_date", "2025-09-10")
        .add_query_param("end_date", "2025-09-01")
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["kind"], "INVALID_DATE_RANGE");

    let empty: Value = server.get("/api/attendance/statistics/class/999").await.json();
    assert_eq!(empty["total_records"], 0);
}

#[tokio::test]
async fn should_report_camera_statistics_and_class_counts() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let gate = add_camera(&state, "Main entrance", "School gate").await;
    let mut record = new_attendance(
        fixture.student_id,
        fixture.class_id,
        AttendanceStatus::Present,
        utc(2025, 9, 8, 7, 30),
    );
    record.camera_id = Some(gate);
    add_attendance(&state, record).await;
    let server = test_server(&state);

    let stats: Value = server.get(&format!("/api/cameras/{gate}/statistics")).await.json();
    assert_eq!(stats["total_attendance_records"], 1);
    assert_eq!(stats["camera_name"], "Main entrance");

    let counts: Value = server.get("/api/classes/student-counts").await.json();
    assert_eq!(
        counts,
        json!([{ "class_id": fixture.class_id, "class_name": "10A1", "student_count": 1 }])
    );

    let full: Value = server.get(&format!("/api/classes/{}/full", fixture.class_id)).await.json();
    assert_eq!(full["class_name"], "10A1");
    assert_eq!(full["teacher_name"], "Nguyen Van A");
    assert_eq!(full["students"][0]["full_name"], "S1");
}

// ── Search & filters ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_search_and_filter_lists_with_query_params() {
    let state = test_state().await;
    let fixture = school(&state).await;
    add_camera(&state, "Main entrance", "School gate").await;
    add_camera(&state, "Room A", "Floor 1").await;
    let server = test_server(&state);

    let teachers: Value = server.get("/api/teachers").add_query_param("q", "nguyen").await.json();
    assert_eq!(teachers.as_array().unwrap().len(), 1);

    let classes: Value = server.get("/api/classes").add_query_param("q", "10a").await.json();
    assert_eq!(classes[0]["class_id"], fixture.class_id);

    let students: Value = server.get("/api/students").add_query_param("q", "hs001").await.json();
    assert_eq!(students[0]["student_id"], fixture.student_id);

    let patch = json!({ "gender": "female" });
    server
        .patch(&format!("/api/students/{}", fixture.student_id))
        .json(&patch)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let female: Value = server
        .get("/api/students")
        .add_query_param("gender", "female")
        .await
        .json();
    assert_eq!(female.as_array().unwrap().len(), 1);
    let male: Value = server.get("/api/students").add_query_param("gender", "male").await.json();
    assert_eq!(male, json!([]));

    let at_gate: Value = server
        .get("/api/cameras")
        .add_query_param("location", "GATE")
        .await
        .json();
    assert_eq!(at_gate.as_array().unwrap().len(), 1);
    assert_eq!(at_gate[0]["camera_name"], "Main entrance");

    let all: Value = server.get("/api/cameras").await.json();
    assert_eq!(all.as_array().unwrap().len(), 2);

    let student = state.student_repo().find_by_id(fixture.student_id).await.unwrap().unwrap();
    assert_eq!(student.gender.map(|g| g.as_str()), Some("female"));
}

#[tokio::test]
async fn should_serve_embeddings_for_recognition() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let server = test_server(&state);

    let res = server
        .post("/api/embeddings")
        .json(&json!({
            "student_id": fixture.student_id,
            "embedding": sample_embedding(3),
            "image_url": null,
        }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let id = res.json::<Value>()["id"].as_i64().unwrap();

    let latest: Value = server
        .get(&format!("/api/embeddings/student/{}/latest", fixture.student_id))
        .await
        .json();
    assert_eq!(latest["embedding_id"], id);
    assert_eq!(latest["embedding"], json!(sample_embedding(3)));

    let known: Value = server.get("/api/embeddings/recognition").await.json();
    assert_eq!(known.as_array().unwrap().len(), 1);
    assert_eq!(known[0]["student_name"], "S1");
    assert_eq!(known[0]["class_id"], fixture.class_id);
}

// ── Middleware ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_echo_request_id_and_allow_configured_origin() {
    let state = test_state().await;
    let server = test_server(&state);

    let res = server.get("/healthz").await;
    assert!(res.maybe_header("x-request-id").is_some());

    let res = server
        .get("/api/teachers")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-123"),
        )
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static(TEST_ORIGIN),
        )
        .await;
    res.assert_status_ok();
    assert_eq!(res.header("x-request-id"), "req-123");
    assert_eq!(res.header("access-control-allow-origin"), TEST_ORIGIN);

    let foreign = server
        .get("/api/teachers")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://evil.example"),
        )
        .await;
    assert!(foreign.maybe_header("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn should_share_state_between_router_and_repositories() {
    let conn = ConnectionManager::from_connection(setup_test_db().await);
    let state = AppState::new(conn);
    let server = axum_test::TestServer::new(build_router(state.clone(), &[])).unwrap();

    school(&state).await;
    let teachers: Value = server.get("/api/teachers").await.json();
    assert_eq!(teachers[0]["email"], "a@school.edu");
}
