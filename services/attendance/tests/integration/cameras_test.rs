use facecheck_attendance::domain::repository::CameraRepository;
use facecheck_attendance::domain::types::{CameraPatch, NewCamera};
use facecheck_domain::attendance::AttendanceStatus;
use facecheck_domain::patch::Patch;

use crate::helpers::{add_attendance, add_camera, new_attendance, school, test_state, utc};

#[tokio::test]
async fn should_create_and_find_camera() {
    let state = test_state().await;
    let repo = state.camera_repo();

    let id = repo
        .create(&NewCamera {
            camera_name: Some("Main entrance".into()),
            location: Some("School gate".into()),
            ip_address: Some("192.168.1.100".into()),
        })
        .await
        .unwrap();
    assert!(id > 0);

    let camera = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(camera.camera_name.as_deref(), Some("Main entrance"));
    assert_eq!(camera.location.as_deref(), Some("School gate"));
    assert_eq!(camera.ip_address.as_deref(), Some("192.168.1.100"));
    assert!(repo.find_by_id(id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn should_filter_by_location_and_search_ignoring_case() {
    let state = test_state().await;
    let gate = add_camera(&state, "Main entrance", "School gate").await;
    let room = add_camera(&state, "Room A", "Floor 1 - A101").await;
    let repo = state.camera_repo();

    let at_gate = repo.list_by_location("gate").await.unwrap();
    assert_eq!(at_gate.len(), 1);
    assert_eq!(at_gate[0].camera_id, gate);

    let found = repo.search("a101").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].camera_id, room);

    let ids: Vec<_> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.camera_id)
        .collect();
    assert_eq!(ids, [gate, room]);
}

#[tokio::test]
async fn should_count_records_seen_by_camera() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let gate = add_camera(&state, "Main entrance", "School gate").await;
    let idle = add_camera(&state, "Room A", "Floor 1").await;
    for day in 1..=3 {
        let mut record = new_attendance(
            fixture.student_id,
            fixture.class_id,
            AttendanceStatus::Present,
            utc(2025, 9, day, 7, 30),
        );
        record.camera_id = Some(gate);
        add_attendance(&state, record).await;
    }
    let repo = state.camera_repo();

    let stats = repo.statistics(gate).await.unwrap().unwrap();
    assert_eq!(stats.camera_id, gate);
    assert_eq!(stats.camera_name.as_deref(), Some("Main entrance"));
    assert_eq!(stats.total_attendance_records, 3);

    let idle_stats = repo.statistics(idle).await.unwrap().unwrap();
    assert_eq!(idle_stats.total_attendance_records, 0);

    assert!(repo.statistics(999).await.unwrap().is_none());
}

#[tokio::test]
async fn should_clear_location_and_delete_camera() {
    let state = test_state().await;
    let id = add_camera(&state, "Main entrance", "School gate").await;
    let repo = state.camera_repo();

    let patch = CameraPatch {
        location: Patch::Set(None),
        ..Default::default()
    };
    assert!(repo.update(id, &patch).await.unwrap());
    let camera = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(camera.location, None);
    assert_eq!(camera.camera_name.as_deref(), Some("Main entrance"));

    assert!(!repo.update(id, &CameraPatch::default()).await.unwrap());
    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
}
