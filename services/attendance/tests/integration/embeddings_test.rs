use chrono::Utc;
use facecheck_attendance::domain::repository::FaceEmbeddingRepository;
use facecheck_attendance_schema::face_embeddings;
use facecheck_attendance::domain::types::{FaceEmbeddingPatch, NewFaceEmbedding};
use facecheck_domain::embedding::EMBEDDING_DIM;
use facecheck_domain::patch::Patch;
use facecheck_testing::embedding::sample_embedding;

use sea_orm::{ActiveValue::Set, EntityTrait};

use crate::helpers::{add_class, add_student, school, test_state};

fn new_embedding(student_id: i32, seed: u32) -> NewFaceEmbedding {
    NewFaceEmbedding {
        student_id,
        embedding: sample_embedding(seed),
        image_url: Some(format!("data/images/student_{student_id}_{seed}.jpg")),
    }
}

#[tokio::test]
async fn should_store_embedding_without_loss() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let repo = state.embedding_repo();

    let id = repo.create(&new_embedding(fixture.student_id, 1)).await.unwrap();
    assert!(id > 0);

    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    let vector = stored.embedding.unwrap();
    assert_eq!(vector.len(), EMBEDDING_DIM);
    assert_eq!(vector, sample_embedding(1));
    assert_eq!(stored.student_id, fixture.student_id);
    assert_eq!(stored.student_name, "S1");
    assert_eq!(stored.student_code.as_deref(), Some("HS001"));
}

#[tokio::test]
async fn should_keep_double_precision_and_large_components() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let repo = state.embedding_repo();
    let vector = vec![0.123456789012345, 0.5, 1e39, -2.5e-300];

    let id = repo
        .create(&NewFaceEmbedding {
            student_id: fixture.student_id,
            embedding: vector.clone(),
            image_url: None,
        })
        .await
        .unwrap();
    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.embedding, Some(vector));

    let replacement = vec![-0.987654321098765, 3.0e38];
    let patch = FaceEmbeddingPatch {
        embedding: Patch::Set(replacement.clone()),
        ..Default::default()
    };
    assert!(repo.update(id, &patch).await.unwrap());
    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.embedding, Some(replacement));
}

#[tokio::test]
async fn should_refuse_non_finite_components() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let repo = state.embedding_repo();

    let result = repo
        .create(&NewFaceEmbedding {
            student_id: fixture.student_id,
            embedding: vec![0.5, f64::INFINITY],
            image_url: None,
        })
        .await;
    assert!(result.is_err());
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn should_null_undecodable_stored_vectors() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let db = state.conn.connection().await.unwrap();
    let raw = face_embeddings::ActiveModel {
        student_id: Set(fixture.student_id),
        embedding_json: Set("not json".to_owned()),
        image_url: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let id = face_embeddings::Entity::insert(raw)
        .exec(&db)
        .await
        .unwrap()
        .last_insert_id;
    let repo = state.embedding_repo();

    let listed = repo.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].embedding_id, id);
    assert_eq!(listed[0].embedding, None);

    let found = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.embedding, None);
    assert_eq!(found.student_name, "S1");

    let known = repo.list_for_recognition().await.unwrap();
    assert_eq!(known.len(), 1);
    assert_eq!(known[0].student_id, fixture.student_id);
    assert_eq!(known[0].embedding, None);
}

#[tokio::test]
async fn should_return_latest_embedding_per_student() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let repo = state.embedding_repo();

    let first = repo.create(&new_embedding(fixture.student_id, 1)).await.unwrap();
    let second = repo.create(&new_embedding(fixture.student_id, 2)).await.unwrap();

    let all = repo.list_by_student(fixture.student_id).await.unwrap();
    assert_eq!(all.len(), 2);
    let ids: Vec<i32> = all.iter().map(|e| e.embedding_id).collect();
    assert!(ids.contains(&first) && ids.contains(&second));

    let latest = repo
        .find_latest_by_student(fixture.student_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.embedding_id, second);
    assert_eq!(latest.embedding, Some(sample_embedding(2)));

    assert!(repo.find_latest_by_student(999).await.unwrap().is_none());
}

#[tokio::test]
async fn should_expose_one_embedding_per_student_for_recognition() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let other_class = add_class(&state, "10A2", fixture.teacher_id).await;
    let s2 = add_student(&state, "S2", "HS002", other_class).await;
    add_student(&state, "S3 without face", "HS003", other_class).await;
    let repo = state.embedding_repo();

    repo.create(&new_embedding(fixture.student_id, 1)).await.unwrap();
    repo.create(&new_embedding(fixture.student_id, 2)).await.unwrap();
    repo.create(&new_embedding(s2, 3)).await.unwrap();

    let known = repo.list_for_recognition().await.unwrap();
    assert_eq!(known.len(), 2);
    assert_eq!(known[0].student_id, fixture.student_id);
    assert_eq!(known[0].embedding, Some(sample_embedding(2)));
    assert_eq!(known[0].class_id, fixture.class_id);
    assert_eq!(known[1].student_id, s2);
    assert_eq!(known[1].student_name, "S2");
    assert_eq!(known[1].class_id, other_class);

    let in_class = repo.list_by_class(other_class).await.unwrap();
    assert_eq!(in_class.len(), 1);
    assert_eq!(in_class[0].student_id, s2);
    assert!(repo.list_by_class(999).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_replace_vector_and_clear_image_url() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let repo = state.embedding_repo();
    let id = repo.create(&new_embedding(fixture.student_id, 1)).await.unwrap();

    assert!(!repo.update(id, &FaceEmbeddingPatch::default()).await.unwrap());

    let patch = FaceEmbeddingPatch {
        embedding: Patch::Set(sample_embedding(5)),
        image_url: Patch::Set(None),
    };
    assert!(repo.update(id, &patch).await.unwrap());

    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.embedding, Some(sample_embedding(5)));
    assert_eq!(stored.image_url, None);
    assert!(!repo.update(id + 1, &patch).await.unwrap());
}

#[tokio::test]
async fn should_delete_embedding_once() {
    let state = test_state().await;
    let fixture = school(&state).await;
    let repo = state.embedding_repo();
    let id = repo.create(&new_embedding(fixture.student_id, 1)).await.unwrap();

    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
    assert!(repo.list().await.unwrap().is_empty());
}
