use axum::{
    Router,
    http::HeaderValue,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use facecheck_core::error::AppError;
use facecheck_core::health::healthz;
use facecheck_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    attendance::{
        create_attendance, delete_attendance, get_attendance, get_attendance_by_date,
        get_attendance_by_session, get_attendance_by_status, get_attendance_records,
        get_class_attendance, get_class_attendance_by_date, get_class_statistics,
        get_student_attendance, get_student_summary, update_attendance,
    },
    camera::{
        create_camera, delete_camera, get_camera, get_camera_statistics, get_cameras,
        update_camera,
    },
    class::{
        create_class, delete_class, get_class, get_class_full, get_class_students, get_classes,
        get_classes_by_teacher, get_student_counts, update_class,
    },
    embedding::{
        create_embedding, delete_embedding, get_class_embeddings, get_embedding, get_embeddings,
        get_latest_student_embedding, get_recognition_embeddings, get_student_embeddings,
        update_embedding,
    },
    health::{health, root},
    student::{
        create_student, delete_student, get_student, get_student_by_code, get_students,
        get_students_by_class, update_student,
    },
    teacher::{
        create_teacher, delete_teacher, get_teacher, get_teacher_by_email, get_teacher_classes,
        get_teachers, update_teacher,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        // Health
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/api/health", get(health))
        // Teachers
        .route("/api/teachers", get(get_teachers).post(create_teacher))
        .route(
            "/api/teachers/{id}",
            get(get_teacher).patch(update_teacher).delete(delete_teacher),
        )
        .route("/api/teachers/{id}/classes", get(get_teacher_classes))
        .route("/api/teachers/email/{email}", get(get_teacher_by_email))
        // Classes
        .route("/api/classes", get(get_classes).post(create_class))
        .route("/api/classes/student-counts", get(get_student_counts))
        .route("/api/classes/teacher/{id}", get(get_classes_by_teacher))
        .route(
            "/api/classes/{id}",
            get(get_class).patch(update_class).delete(delete_class),
        )
        .route("/api/classes/{id}/students", get(get_class_students))
        .route("/api/classes/{id}/full", get(get_class_full))
        // Students
        .route("/api/students", get(get_students).post(create_student))
        .route("/api/students/code/{code}", get(get_student_by_code))
        .route("/api/students/class/{id}", get(get_students_by_class))
        .route(
            "/api/students/{id}",
            get(get_student).patch(update_student).delete(delete_student),
        )
        // Face embeddings
        .route("/api/embeddings", get(get_embeddings).post(create_embedding))
        .route("/api/embeddings/recognition", get(get_recognition_embeddings))
        .route("/api/embeddings/class/{id}", get(get_class_embeddings))
        .route("/api/embeddings/student/{id}", get(get_student_embeddings))
        .route(
            "/api/embeddings/student/{id}/latest",
            get(get_latest_student_embedding),
        )
        .route(
            "/api/embeddings/{id}",
            get(get_embedding).patch(update_embedding).delete(delete_embedding),
        )
        // Cameras
        .route("/api/cameras", get(get_cameras).post(create_camera))
        .route(
            "/api/cameras/{id}",
            get(get_camera).patch(update_camera).delete(delete_camera),
        )
        .route("/api/cameras/{id}/statistics", get(get_camera_statistics))
        // Attendance
        .route("/api/attendance", get(get_attendance_records).post(create_attendance))
        .route(
            "/api/attendance/{id}",
            get(get_attendance).patch(update_attendance).delete(delete_attendance),
        )
        .route("/api/attendance/student/{id}", get(get_student_attendance))
        .route("/api/attendance/class/{id}", get(get_class_attendance))
        .route(
            "/api/attendance/class/{id}/date/{date}",
            get(get_class_attendance_by_date),
        )
        .route("/api/attendance/date/{date}", get(get_attendance_by_date))
        .route("/api/attendance/status/{status}", get(get_attendance_by_status))
        .route("/api/attendance/session/{session}", get(get_attendance_by_session))
        .route(
            "/api/attendance/statistics/class/{id}",
            get(get_class_statistics),
        )
        .route(
            "/api/attendance/summary/student/{id}",
            get(get_student_summary),
        )
        .fallback(|| async { AppError::NotFound })
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(cors_layer(cors_allowed_origins)),
        )
        .with_state(state)
}

/// Allow the configured browser origins with any method and header.
/// Origins that are not valid header values are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
