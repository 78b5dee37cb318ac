use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, RelationTrait, Select,
    sea_query::{Expr, Query, SelectStatement},
};

use facecheck_attendance_schema::{face_embeddings, students};
use facecheck_domain::{embedding, patch::Patch};

use crate::domain::repository::FaceEmbeddingRepository;
use crate::domain::types::{
    FaceEmbedding, FaceEmbeddingPatch, NewFaceEmbedding, RecognitionEmbedding,
};
use crate::error::AttendanceServiceError;
use crate::infra::db::{ConnectionManager, set_patched};

#[derive(Clone)]
pub struct DbFaceEmbeddingRepository {
    pub conn: ConnectionManager,
}

#[derive(Debug, FromQueryResult)]
struct EmbeddingRow {
    embedding_id: i32,
    student_id: i32,
    embedding_json: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    student_name: String,
    student_code: Option<String>,
}

impl From<EmbeddingRow> for FaceEmbedding {
    fn from(row: EmbeddingRow) -> Self {
        FaceEmbedding {
            embedding_id: row.embedding_id,
            student_id: row.student_id,
            embedding: decode_logged(row.embedding_id, &row.embedding_json),
            image_url: row.image_url,
            created_at: row.created_at,
            student_name: row.student_name,
            student_code: row.student_code,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct RecognitionRow {
    embedding_id: i32,
    student_id: i32,
    embedding_json: String,
    student_name: String,
    student_code: Option<String>,
    class_id: i32,
}

fn decode_logged(embedding_id: i32, raw: &str) -> Option<Vec<f64>> {
    let decoded = embedding::decode(raw);
    if decoded.is_none() {
        tracing::debug!(embedding_id, "stored embedding is not a float array");
    }
    decoded
}

/// Embeddings joined with their student's name and code.
fn embedding_select() -> Select<face_embeddings::Entity> {
    face_embeddings::Entity::find()
        .select_only()
        .columns([
            face_embeddings::Column::EmbeddingId,
            face_embeddings::Column::StudentId,
            face_embeddings::Column::EmbeddingJson,
            face_embeddings::Column::ImageUrl,
            face_embeddings::Column::CreatedAt,
        ])
        .column_as(students::Column::FullName, "student_name")
        .column_as(students::Column::StudentCode, "student_code")
        .join(JoinType::InnerJoin, face_embeddings::Relation::Student.def())
}

/// `SELECT MAX(embedding_id) ... GROUP BY student_id`: newest embedding per student.
fn latest_per_student() -> SelectStatement {
    Query::select()
        .expr(Expr::col(face_embeddings::Column::EmbeddingId).max())
        .from(face_embeddings::Entity)
        .group_by_col(face_embeddings::Column::StudentId)
        .to_owned()
}

impl DbFaceEmbeddingRepository {
    async fn fetch(
        &self,
        query: Select<face_embeddings::Entity>,
        operation: &'static str,
    ) -> Result<Vec<FaceEmbedding>, AttendanceServiceError> {
        let rows: Vec<EmbeddingRow> = self
            .conn
            .execute_query(&query.into_query())
            .await
            .context(operation)?;
        Ok(rows.into_iter().map(FaceEmbedding::from).collect())
    }
}

impl FaceEmbeddingRepository for DbFaceEmbeddingRepository {
    async fn list(&self) -> Result<Vec<FaceEmbedding>, AttendanceServiceError> {
        let query = embedding_select()
            .order_by_desc(face_embeddings::Column::CreatedAt)
            .order_by_desc(face_embeddings::Column::EmbeddingId);
        self.fetch(query, "list embeddings").await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<FaceEmbedding>, AttendanceServiceError> {
        let query = embedding_select().filter(face_embeddings::Column::EmbeddingId.eq(id));
        let rows = self.fetch(query, "find embedding by id").await?;
        Ok(rows.into_iter().next())
    }

    async fn list_by_student(
        &self,
        student_id: i32,
    ) -> Result<Vec<FaceEmbedding>, AttendanceServiceError> {
        let query = embedding_select()
            .filter(face_embeddings::Column::StudentId.eq(student_id))
            .order_by_desc(face_embeddings::Column::CreatedAt)
            .order_by_desc(face_embeddings::Column::EmbeddingId);
        self.fetch(query, "list embeddings by student").await
    }

    async fn find_latest_by_student(
        &self,
        student_id: i32,
    ) -> Result<Option<FaceEmbedding>, AttendanceServiceError> {
        let query = embedding_select()
            .filter(face_embeddings::Column::StudentId.eq(student_id))
            .order_by_desc(face_embeddings::Column::EmbeddingId)
            .limit(1);
        let rows = self.fetch(query, "find latest embedding").await?;
        Ok(rows.into_iter().next())
    }

    async fn list_for_recognition(
        &self,
    ) -> Result<Vec<RecognitionEmbedding>, AttendanceServiceError> {
        let query = face_embeddings::Entity::find()
            .select_only()
            .columns([
                face_embeddings::Column::EmbeddingId,
                face_embeddings::Column::StudentId,
                face_embeddings::Column::EmbeddingJson,
            ])
            .column_as(students::Column::FullName, "student_name")
            .column_as(students::Column::StudentCode, "student_code")
            .column_as(students::Column::ClassId, "class_id")
            .join(JoinType::InnerJoin, face_embeddings::Relation::Student.def())
            .filter(face_embeddings::Column::EmbeddingId.in_subquery(latest_per_student()))
            .order_by_asc(face_embeddings::Column::StudentId)
            .into_query();
        let rows: Vec<RecognitionRow> = self
            .conn
            .execute_query(&query)
            .await
            .context("list embeddings for recognition")?;
        Ok(rows
            .into_iter()
            .map(|row| RecognitionEmbedding {
                student_id: row.student_id,
                embedding: decode_logged(row.embedding_id, &row.embedding_json),
                student_name: row.student_name,
                student_code: row.student_code,
                class_id: row.class_id,
            })
            .collect())
    }

    async fn list_by_class(
        &self,
        class_id: i32,
    ) -> Result<Vec<FaceEmbedding>, AttendanceServiceError> {
        let query = embedding_select()
            .filter(students::Column::ClassId.eq(class_id))
            .filter(face_embeddings::Column::EmbeddingId.in_subquery(latest_per_student()))
            .order_by_asc(students::Column::FullName)
            .order_by_asc(face_embeddings::Column::StudentId);
        self.fetch(query, "list embeddings by class").await
    }

    async fn create(&self, new: &NewFaceEmbedding) -> Result<i32, AttendanceServiceError> {
        let embedding_json = embedding::encode(&new.embedding).context("encode embedding")?;
        let db = self.conn.connection().await.context("create embedding")?;
        let model = face_embeddings::ActiveModel {
            student_id: Set(new.student_id),
            embedding_json: Set(embedding_json),
            image_url: Set(new.image_url.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let result = face_embeddings::Entity::insert(model)
            .exec(&db)
            .await
            .context("create embedding")?;
        Ok(result.last_insert_id)
    }

    async fn update(
        &self,
        id: i32,
        patch: &FaceEmbeddingPatch,
    ) -> Result<bool, AttendanceServiceError> {
        if patch.is_empty() {
            return Ok(false);
        }
        let embedding_json = match &patch.embedding {
            Patch::Set(vector) => {
                Patch::Set(embedding::encode(vector).context("encode embedding")?)
            }
            Patch::Unchanged => Patch::Unchanged,
        };

        let mut query = face_embeddings::Entity::update_many()
            .filter(face_embeddings::Column::EmbeddingId.eq(id));
        query = set_patched(query, face_embeddings::Column::EmbeddingJson, &embedding_json);
        query = set_patched(query, face_embeddings::Column::ImageUrl, &patch.image_url);
        let outcome = self
            .conn
            .execute_update(&query.into_query())
            .await
            .context("update embedding")?;
        Ok(outcome.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, AttendanceServiceError> {
        let query = face_embeddings::Entity::delete_many()
            .filter(face_embeddings::Column::EmbeddingId.eq(id))
            .into_query();
        let outcome = self
            .conn
            .execute_update(&query)
            .await
            .context("delete embedding")?;
        Ok(outcome.rows_affected > 0)
    }
}
