#![allow(async_fn_in_trait)]

use chrono::NaiveDate;

use facecheck_domain::attendance::{AttendanceStatus, AttendanceSummary, Session};
use facecheck_domain::date_range::DateRange;
use facecheck_domain::student::Gender;

use crate::domain::types::{
    Attendance, AttendancePatch, Camera, CameraPatch, CameraStatistics, Class, ClassPatch,
    ClassStudentCount, ClassWithStudents, FaceEmbedding, FaceEmbeddingPatch, NewAttendance,
    NewCamera, NewClass, NewFaceEmbedding, NewStudent, NewTeacher, RecognitionEmbedding, Student,
    StudentPatch, Teacher, TeacherPatch,
};
use crate::error::AttendanceServiceError;

/// Repository for teachers.
pub trait TeacherRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Teacher>, AttendanceServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Teacher>, AttendanceServiceError>;
    async fn find_by_email(&self, email: &str)
    -> Result<Option<Teacher>, AttendanceServiceError>;
    /// Classes taught by the teacher, by class name.
    async fn list_classes(&self, teacher_id: i32) -> Result<Vec<Class>, AttendanceServiceError>;
    async fn search(&self, keyword: &str) -> Result<Vec<Teacher>, AttendanceServiceError>;
    async fn create(&self, teacher: &NewTeacher) -> Result<i32, AttendanceServiceError>;
    /// Apply the set fields. Returns `false` without a write when none are set,
    /// otherwise whether a row matched.
    async fn update(&self, id: i32, patch: &TeacherPatch) -> Result<bool, AttendanceServiceError>;
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, AttendanceServiceError>;
}

/// Repository for classes.
pub trait ClassRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Class>, AttendanceServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Class>, AttendanceServiceError>;
    async fn list_by_teacher(&self, teacher_id: i32)
    -> Result<Vec<Class>, AttendanceServiceError>;
    async fn list_students(&self, class_id: i32) -> Result<Vec<Student>, AttendanceServiceError>;
    async fn find_with_students(
        &self,
        class_id: i32,
    ) -> Result<Option<ClassWithStudents>, AttendanceServiceError>;
    async fn search(&self, keyword: &str) -> Result<Vec<Class>, AttendanceServiceError>;
    async fn create(&self, class: &NewClass) -> Result<i32, AttendanceServiceError>;
    async fn update(&self, id: i32, patch: &ClassPatch) -> Result<bool, AttendanceServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, AttendanceServiceError>;
}

/// Repository for students.
pub trait StudentRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Student>, AttendanceServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AttendanceServiceError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Student>, AttendanceServiceError>;
    async fn list_by_class(&self, class_id: i32) -> Result<Vec<Student>, AttendanceServiceError>;
    async fn list_by_gender(&self, gender: Gender)
    -> Result<Vec<Student>, AttendanceServiceError>;
    async fn search(&self, keyword: &str) -> Result<Vec<Student>, AttendanceServiceError>;
    /// Every class with its enrolment, including empty classes.
    async fn count_by_class(&self) -> Result<Vec<ClassStudentCount>, AttendanceServiceError>;
    async fn create(&self, student: &NewStudent) -> Result<i32, AttendanceServiceError>;
    async fn update(&self, id: i32, patch: &StudentPatch) -> Result<bool, AttendanceServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, AttendanceServiceError>;
}

/// Repository for face embeddings.
pub trait FaceEmbeddingRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<FaceEmbedding>, AttendanceServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<FaceEmbedding>, AttendanceServiceError>;
    async fn list_by_student(
        &self,
        student_id: i32,
    ) -> Result<Vec<FaceEmbedding>, AttendanceServiceError>;
    async fn find_latest_by_student(
        &self,
        student_id: i32,
    ) -> Result<Option<FaceEmbedding>, AttendanceServiceError>;
    /// Latest embedding of every student that has one.
    async fn list_for_recognition(
        &self,
    ) -> Result<Vec<RecognitionEmbedding>, AttendanceServiceError>;
    /// Latest embedding of every student in the class, by student name.
    async fn list_by_class(
        &self,
        class_id: i32,
    ) -> Result<Vec<FaceEmbedding>, AttendanceServiceError>;
    async fn create(&self, embedding: &NewFaceEmbedding) -> Result<i32, AttendanceServiceError>;
    async fn update(
        &self,
        id: i32,
        patch: &FaceEmbeddingPatch,
    ) -> Result<bool, AttendanceServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, AttendanceServiceError>;
}

/// Repository for cameras.
pub trait CameraRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Camera>, AttendanceServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Camera>, AttendanceServiceError>;
    async fn list_by_location(&self, location: &str)
    -> Result<Vec<Camera>, AttendanceServiceError>;
    async fn search(&self, keyword: &str) -> Result<Vec<Camera>, AttendanceServiceError>;
    /// `None` when the camera does not exist.
    async fn statistics(
        &self,
        camera_id: i32,
    ) -> Result<Option<CameraStatistics>, AttendanceServiceError>;
    async fn create(&self, camera: &NewCamera) -> Result<i32, AttendanceServiceError>;
    async fn update(&self, id: i32, patch: &CameraPatch) -> Result<bool, AttendanceServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, AttendanceServiceError>;
}

/// Repository for attendance records. Lists are newest first.
pub trait AttendanceRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Attendance>, AttendanceServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Attendance>, AttendanceServiceError>;
    async fn list_by_student(
        &self,
        student_id: i32,
    ) -> Result<Vec<Attendance>, AttendanceServiceError>;
    async fn list_by_class(&self, class_id: i32)
    -> Result<Vec<Attendance>, AttendanceServiceError>;
    async fn list_by_date(&self, date: NaiveDate)
    -> Result<Vec<Attendance>, AttendanceServiceError>;
    async fn list_by_class_and_date(
        &self,
        class_id: i32,
        date: NaiveDate,
    ) -> Result<Vec<Attendance>, AttendanceServiceError>;
    async fn list_by_status(
        &self,
        status: AttendanceStatus,
    ) -> Result<Vec<Attendance>, AttendanceServiceError>;
    async fn list_by_session(
        &self,
        session: Session,
    ) -> Result<Vec<Attendance>, AttendanceServiceError>;
    async fn create(&self, record: &NewAttendance) -> Result<i32, AttendanceServiceError>;
    async fn update(
        &self,
        id: i32,
        patch: &AttendancePatch,
    ) -> Result<bool, AttendanceServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, AttendanceServiceError>;
    async fn class_statistics(
        &self,
        class_id: i32,
        range: Option<DateRange>,
    ) -> Result<AttendanceSummary, AttendanceServiceError>;
    async fn student_summary(
        &self,
        student_id: i32,
        range: Option<DateRange>,
    ) -> Result<AttendanceSummary, AttendanceServiceError>;
}
