use anyhow::Result;
use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::info;

use facecheck_attendance::domain::repository::{
    AttendanceRepository, CameraRepository, ClassRepository, StudentRepository,
    TeacherRepository,
};
use facecheck_attendance::domain::types::{
    NewAttendance, NewCamera, NewClass, NewFaceEmbedding, NewStudent, NewTeacher,
};
use facecheck_attendance::infra::db::ConnectionManager;
use facecheck_attendance::state::AppState;
use facecheck_attendance::usecase::{
    attendance::CreateAttendanceUseCase, camera::CreateCameraUseCase, class::CreateClassUseCase,
    embedding::CreateFaceEmbeddingUseCase, student::CreateStudentUseCase,
    teacher::CreateTeacherUseCase,
};
use facecheck_domain::attendance::{AttendanceMethod, AttendanceStatus, Session};
use facecheck_domain::embedding::EMBEDDING_DIM;
use facecheck_domain::student::Gender;

struct SampleStudent {
    name: &'static str,
    code: &'static str,
    first_class: bool,
    born: (i32, u32, u32),
    gender: Gender,
}

const STUDENTS: [SampleStudent; 5] = [
    SampleStudent {
        name: "Nguyễn Văn An",
        code: "HS001",
        first_class: true,
        born: (2008, 5, 15),
        gender: Gender::Male,
    },
    SampleStudent {
        name: "Trần Thị Bình",
        code: "HS002",
        first_class: true,
        born: (2008, 7, 20),
        gender: Gender::Female,
    },
    SampleStudent {
        name: "Lê Văn Cường",
        code: "HS003",
        first_class: true,
        born: (2008, 3, 10),
        gender: Gender::Male,
    },
    SampleStudent {
        name: "Phạm Thị Dung",
        code: "HS004",
        first_class: false,
        born: (2008, 9, 25),
        gender: Gender::Female,
    },
    SampleStudent {
        name: "Hoàng Văn Em",
        code: "HS005",
        first_class: false,
        born: (2008, 11, 5),
        gender: Gender::Male,
    },
];

fn at(date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    date.and_hms_opt(hour, minute, 0).map(|dt| dt.and_utc())
}

fn random_embedding() -> Vec<f64> {
    (0..EMBEDDING_DIM).map(|_| rand::random::<f64>()).collect()
}

/// Insert the demo data set: two teachers with one class each, five students
/// with one embedding each, two cameras and attendance for yesterday and today.
pub async fn run(conn: &ConnectionManager) -> Result<()> {
    let state = AppState::new(conn.clone());

    let create_teacher = CreateTeacherUseCase {
        repo: state.teacher_repo(),
    };
    let teacher_a = create_teacher
        .execute(NewTeacher {
            full_name: "Nguyễn Văn A".into(),
            email: Some("nguyenvana@example.com".into()),
            phone: Some("0123456789".into()),
        })
        .await?;
    let teacher_b = create_teacher
        .execute(NewTeacher {
            full_name: "Trần Thị B".into(),
            email: Some("tranthib@example.com".into()),
            phone: Some("0987654321".into()),
        })
        .await?;

    let create_class = CreateClassUseCase {
        repo: state.class_repo(),
    };
    let class_a = create_class
        .execute(NewClass {
            class_name: "Lớp 10A1".into(),
            teacher_id: teacher_a,
        })
        .await?;
    let class_b = create_class
        .execute(NewClass {
            class_name: "Lớp 10A2".into(),
            teacher_id: teacher_b,
        })
        .await?;

    let create_student = CreateStudentUseCase {
        repo: state.student_repo(),
    };
    let create_embedding = CreateFaceEmbeddingUseCase {
        repo: state.embedding_repo(),
    };
    let mut student_ids = Vec::with_capacity(STUDENTS.len());
    for sample in &STUDENTS {
        let (year, month, day) = sample.born;
        let student_id = create_student
            .execute(NewStudent {
                full_name: sample.name.into(),
                date_of_birth: NaiveDate::from_ymd_opt(year, month, day),
                gender: Some(sample.gender),
                student_code: Some(sample.code.into()),
                class_id: if sample.first_class { class_a } else { class_b },
                avatar_url: None,
            })
            .await?;
        create_embedding
            .execute(NewFaceEmbedding {
                student_id,
                embedding: random_embedding(),
                image_url: Some(format!("data/images/student_{student_id}.jpg")),
            })
            .await?;
        student_ids.push(student_id);
    }

    let create_camera = CreateCameraUseCase {
        repo: state.camera_repo(),
    };
    let entrance = create_camera
        .execute(NewCamera {
            camera_name: Some("Camera Lối vào chính".into()),
            location: Some("Cổng trường".into()),
            ip_address: Some("192.168.1.100".into()),
        })
        .await?;
    create_camera
        .execute(NewCamera {
            camera_name: Some("Camera Phòng học A".into()),
            location: Some("Tầng 1 - Phòng A101".into()),
            ip_address: Some("192.168.1.101".into()),
        })
        .await?;

    let create_attendance = CreateAttendanceUseCase {
        repo: state.attendance_repo(),
    };
    let today = Utc::now().date_naive();
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
    let recognized = |student_id: i32, timestamp: Option<DateTime<Utc>>| NewAttendance {
        student_id,
        class_id: class_a,
        session: Session::Morning,
        status: AttendanceStatus::Present,
        method: Some(AttendanceMethod::FaceRecognition),
        camera_id: Some(entrance),
        note: None,
        timestamp,
    };
    for &student_id in &student_ids[..3] {
        create_attendance
            .execute(recognized(student_id, at(yesterday, 7, 30)))
            .await?;
    }
    for &student_id in &student_ids[..2] {
        create_attendance
            .execute(recognized(student_id, at(today, 7, 25)))
            .await?;
    }
    create_attendance
        .execute(NewAttendance {
            student_id: student_ids[2],
            class_id: class_a,
            session: Session::Morning,
            status: AttendanceStatus::Late,
            method: Some(AttendanceMethod::Manual),
            camera_id: None,
            note: Some("Đến muộn 15 phút".into()),
            timestamp: at(today, 7, 45),
        })
        .await?;

    let teachers = state.teacher_repo().list().await?.len();
    let classes = state.class_repo().list().await?.len();
    let students = state.student_repo().list().await?.len();
    let cameras = state.camera_repo().list().await?.len();
    let attendance = state.attendance_repo().list().await?.len();
    info!(teachers, classes, students, cameras, attendance, "sample data inserted");
    Ok(())
}
