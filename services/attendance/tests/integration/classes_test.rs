use facecheck_attendance::domain::repository::{ClassRepository, StudentRepository};
use facecheck_attendance::domain::types::{ClassPatch, NewClass};
use facecheck_domain::patch::Patch;

use crate::helpers::{add_class, add_student, add_teacher, school, test_state};

#[tokio::test]
async fn should_create_class_and_enrich_with_teacher_and_count() {
    let state = test_state().await;
    let teacher = add_teacher(&state, "Nguyen Van A", None).await;
    let repo = state.class_repo();

    let id = repo
        .create(&NewClass {
            class_name: "10A1".into(),
            teacher_id: teacher,
        })
        .await
        .unwrap();
    assert!(id > 0);

    let class = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(class.class_name, "10A1");
    assert_eq!(class.teacher_id, teacher);
    assert_eq!(class.teacher_name.as_deref(), Some("Nguyen Van A"));
    assert_eq!(class.student_count, 0);

    add_student(&state, "S1", "HS001", id).await;
    add_student(&state, "S2", "HS002", id).await;
    let class = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(class.student_count, 2);
}

#[tokio::test]
async fn should_list_exactly_enrolled_students_with_class() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let other = add_class(&state, "10A2", fixture.teacher_id).await;
    add_student(&state, "S2", "HS002", other).await;

    let full = state
        .class_repo()
        .find_with_students(fixture.class_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(full.class.class_id, fixture.class_id);
    assert_eq!(full.class.student_count, 1);
    assert_eq!(full.students.len(), 1);
    assert_eq!(full.students[0].student_id, fixture.student_id);
    assert_eq!(full.students[0].class_name.as_deref(), Some("10A1"));

    assert!(state.class_repo().find_with_students(999).await.unwrap().is_none());
}

#[tokio::test]
async fn should_list_by_teacher_and_search_by_name() {
    let state = test_state().await;
    let a = add_teacher(&state, "Nguyen Van A", None).await;
    let b = add_teacher(&state, "Tran Thi B", None).await;
    add_class(&state, "Lop 10A1", a).await;
    let b_class = add_class(&state, "Lop 11B2", b).await;
    let repo = state.class_repo();

    let of_b = repo.list_by_teacher(b).await.unwrap();
    assert_eq!(of_b.len(), 1);
    assert_eq!(of_b[0].class_id, b_class);

    let found = repo.search("11b").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].class_id, b_class);
    assert_eq!(repo.search("lop").await.unwrap().len(), 2);
    assert_eq!(repo.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn should_count_students_per_class_including_empty_classes() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let empty = add_class(&state, "12C3", fixture.teacher_id).await;

    let counts = state.student_repo().count_by_class().await.unwrap();
    assert_eq!(counts.len(), 2);
    let of = |id: i32| counts.iter().find(|c| c.class_id == id).unwrap().student_count;
    assert_eq!(of(fixture.class_id), 1);
    assert_eq!(of(empty), 0);
}

#[tokio::test]
async fn should_move_class_to_another_teacher() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let other = add_teacher(&state, "Tran Thi B", None).await;
    let repo = state.class_repo();

    assert!(!repo.update(fixture.class_id, &ClassPatch::default()).await.unwrap());

    let patch = ClassPatch {
        teacher_id: Patch::Set(other),
        ..Default::default()
    };
    assert!(repo.update(fixture.class_id, &patch).await.unwrap());
    let class = repo.find_by_id(fixture.class_id).await.unwrap().unwrap();
    assert_eq!(class.teacher_id, other);
    assert_eq!(class.teacher_name.as_deref(), Some("Tran Thi B"));
    assert_eq!(class.class_name, "10A1");
}

#[tokio::test]
async fn should_delete_class_without_students() {
    let state = test_state().await;
    let teacher = add_teacher(&state, "Nguyen Van A", None).await;
    let id = add_class(&state, "10A1", teacher).await;
    let repo = state.class_repo();

    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
    assert!(repo.find_by_id(id).await.unwrap().is_none());
}
