use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use facecheck_domain::attendance::{AttendanceMethod, AttendanceStatus, Session};
use facecheck_domain::patch::Patch;
use facecheck_domain::student::Gender;

// ── Teachers ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Teacher {
    pub teacher_id: i32,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeacher {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherPatch {
    #[serde(default)]
    pub full_name: Patch<String>,
    #[serde(default)]
    pub email: Patch<Option<String>>,
    #[serde(default)]
    pub phone: Patch<Option<String>>,
}

impl TeacherPatch {
    pub fn is_empty(&self) -> bool {
        !(self.full_name.is_set() || self.email.is_set() || self.phone.is_set())
    }
}

// ── Classes ──────────────────────────────────────────────────────────────────

/// Class with its teacher's name and current enrolment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Class {
    pub class_id: i32,
    pub class_name: String,
    pub teacher_id: i32,
    pub teacher_name: Option<String>,
    pub student_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassWithStudents {
    #[serde(flatten)]
    pub class: Class,
    pub students: Vec<Student>,
}

/// Enrolment count of one class, zero for classes without students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassStudentCount {
    pub class_id: i32,
    pub class_name: String,
    pub student_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewClass {
    pub class_name: String,
    pub teacher_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassPatch {
    #[serde(default)]
    pub class_name: Patch<String>,
    #[serde(default)]
    pub teacher_id: Patch<i32>,
}

impl ClassPatch {
    pub fn is_empty(&self) -> bool {
        !(self.class_name.is_set() || self.teacher_id.is_set())
    }
}

// ── Students ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    pub student_id: i32,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub student_code: Option<String>,
    pub class_id: i32,
    pub avatar_url: Option<String>,
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub student_code: Option<String>,
    pub class_id: i32,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentPatch {
    #[serde(default)]
    pub full_name: Patch<String>,
    #[serde(default)]
    pub date_of_birth: Patch<Option<NaiveDate>>,
    #[serde(default)]
    pub gender: Patch<Option<Gender>>,
    #[serde(default)]
    pub student_code: Patch<Option<String>>,
    #[serde(default)]
    pub class_id: Patch<i32>,
    #[serde(default)]
    pub avatar_url: Patch<Option<String>>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        !(self.full_name.is_set()
            || self.date_of_birth.is_set()
            || self.gender.is_set()
            || self.student_code.is_set()
            || self.class_id.is_set()
            || self.avatar_url.is_set())
    }
}

// ── Face embeddings ──────────────────────────────────────────────────────────

/// Stored face vector with the owning student's display fields.
///
/// `embedding` is `None` when the stored JSON cannot be decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceEmbedding {
    pub embedding_id: i32,
    pub student_id: i32,
    pub embedding: Option<Vec<f64>>,
    pub image_url: Option<String>,
    #[serde(serialize_with = "facecheck_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    pub student_name: String,
    pub student_code: Option<String>,
}

/// Latest embedding of one student, as loaded into a recognition index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognitionEmbedding {
    pub student_id: i32,
    pub embedding: Option<Vec<f64>>,
    pub student_name: String,
    pub student_code: Option<String>,
    pub class_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFaceEmbedding {
    pub student_id: i32,
    pub embedding: Vec<f64>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaceEmbeddingPatch {
    #[serde(default)]
    pub embedding: Patch<Vec<f64>>,
    #[serde(default)]
    pub image_url: Patch<Option<String>>,
}

impl FaceEmbeddingPatch {
    pub fn is_empty(&self) -> bool {
        !(self.embedding.is_set() || self.image_url.is_set())
    }
}

// ── Cameras ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Camera {
    pub camera_id: i32,
    pub camera_name: Option<String>,
    pub location: Option<String>,
    pub ip_address: Option<String>,
}

/// Number of attendance records captured by one camera.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraStatistics {
    pub camera_id: i32,
    pub camera_name: Option<String>,
    pub location: Option<String>,
    pub total_attendance_records: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCamera {
    pub camera_name: Option<String>,
    pub location: Option<String>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CameraPatch {
    #[serde(default)]
    pub camera_name: Patch<Option<String>>,
    #[serde(default)]
    pub location: Patch<Option<String>>,
    #[serde(default)]
    pub ip_address: Patch<Option<String>>,
}

impl CameraPatch {
    pub fn is_empty(&self) -> bool {
        !(self.camera_name.is_set() || self.location.is_set() || self.ip_address.is_set())
    }
}

// ── Attendance ───────────────────────────────────────────────────────────────

/// Attendance record joined with student, class and (optional) camera names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attendance {
    pub attendance_id: i32,
    pub student_id: i32,
    pub class_id: i32,
    #[serde(serialize_with = "facecheck_core::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
    pub session: Session,
    pub status: AttendanceStatus,
    pub method: AttendanceMethod,
    pub camera_id: Option<i32>,
    pub note: Option<String>,
    pub student_name: String,
    pub student_code: Option<String>,
    pub class_name: String,
    pub camera_name: Option<String>,
    pub camera_location: Option<String>,
}

/// New attendance mark. `timestamp` defaults to now and `method` to
/// face recognition when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAttendance {
    pub student_id: i32,
    pub class_id: i32,
    pub session: Session,
    pub status: AttendanceStatus,
    pub method: Option<AttendanceMethod>,
    pub camera_id: Option<i32>,
    pub note: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendancePatch {
    #[serde(default)]
    pub status: Patch<AttendanceStatus>,
    #[serde(default)]
    pub session: Patch<Session>,
    #[serde(default)]
    pub note: Patch<Option<String>>,
}

impl AttendancePatch {
    pub fn is_empty(&self) -> bool {
        !(self.status.is_set() || self.session.is_set() || self.note.is_set())
    }
}
