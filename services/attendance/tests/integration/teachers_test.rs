use facecheck_attendance::domain::repository::TeacherRepository;
use facecheck_attendance::domain::types::{NewTeacher, TeacherPatch};
use facecheck_domain::patch::Patch;

use crate::helpers::{add_class, add_teacher, test_state};

#[tokio::test]
async fn should_create_and_find_teacher() {
    let state = test_state().await;
    let repo = state.teacher_repo();

    let id = repo
        .create(&NewTeacher {
            full_name: "Tran Thi B".into(),
            email: Some("b@school.edu".into()),
            phone: Some("0987654321".into()),
        })
        .await
        .unwrap();
    assert!(id > 0);

    let teacher = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(teacher.teacher_id, id);
    assert_eq!(teacher.full_name, "Tran Thi B");
    assert_eq!(teacher.email.as_deref(), Some("b@school.edu"));
    assert_eq!(teacher.phone.as_deref(), Some("0987654321"));

    let by_email = repo.find_by_email("b@school.edu").await.unwrap().unwrap();
    assert_eq!(by_email.teacher_id, id);
    assert!(repo.find_by_email("nobody@school.edu").await.unwrap().is_none());
}

#[tokio::test]
async fn should_list_teachers_by_name() {
    let state = test_state().await;
    add_teacher(&state, "Le Van C", None).await;
    add_teacher(&state, "Hoang Thi D", None).await;

    let names: Vec<String> = state
        .teacher_repo()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.full_name)
        .collect();
    assert_eq!(names, ["Hoang Thi D", "Le Van C"]);
}

#[tokio::test]
async fn should_search_name_and_email_ignoring_case() {
    let state = test_state().await;
    let a = add_teacher(&state, "Nguyen Van A", Some("a@school.edu")).await;
    let b = add_teacher(&state, "Tran Thi B", Some("tranb@mail.org")).await;
    let repo = state.teacher_repo();

    let by_name = repo.search("NGUYEN").await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].teacher_id, a);

    let by_email = repo.search("mail.ORG").await.unwrap();
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].teacher_id, b);

    assert!(repo.search("zzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn should_list_classes_of_teacher() {
    let state = test_state().await;
    let teacher = add_teacher(&state, "Nguyen Van A", None).await;
    let other = add_teacher(&state, "Tran Thi B", None).await;
    add_class(&state, "10A2", teacher).await;
    add_class(&state, "10A1", teacher).await;
    add_class(&state, "11B1", other).await;

    let classes = state.teacher_repo().list_classes(teacher).await.unwrap();
    let names: Vec<&str> = classes.iter().map(|c| c.class_name.as_str()).collect();
    assert_eq!(names, ["10A1", "10A2"]);
    assert!(classes.iter().all(|c| c.teacher_name.as_deref() == Some("Nguyen Van A")));

    assert!(state.teacher_repo().list_classes(999).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_not_write_when_patch_is_empty() {
    let state = test_state().await;
    let id = add_teacher(&state, "Nguyen Van A", Some("a@school.edu")).await;
    let repo = state.teacher_repo();

    assert!(!repo.update(id, &TeacherPatch::default()).await.unwrap());
    let teacher = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(teacher.full_name, "Nguyen Van A");
    assert_eq!(teacher.email.as_deref(), Some("a@school.edu"));
}

#[tokio::test]
async fn should_write_empty_string_and_clear_nullable_column() {
    let state = test_state().await;
    let id = add_teacher(&state, "Nguyen Van A", Some("a@school.edu")).await;
    let repo = state.teacher_repo();

    let patch = TeacherPatch {
        full_name: Patch::Set(String::new()),
        email: Patch::Set(None),
        ..Default::default()
    };
    assert!(repo.update(id, &patch).await.unwrap());

    let teacher = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(teacher.full_name, "");
    assert_eq!(teacher.email, None);
}

#[tokio::test]
async fn should_report_missing_rows_on_update_and_delete() {
    let state = test_state().await;
    let repo = state.teacher_repo();
    let patch = TeacherPatch {
        phone: Patch::Set(Some("0900".into())),
        ..Default::default()
    };
    assert!(!repo.update(42, &patch).await.unwrap());
    assert!(!repo.delete(42).await.unwrap());

    let id = add_teacher(&state, "Nguyen Van A", None).await;
    assert!(repo.delete(id).await.unwrap());
    assert!(repo.find_by_id(id).await.unwrap().is_none());
}
