use anyhow::Context as _;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, RelationTrait, Select, sea_query::Expr,
};

use facecheck_attendance_schema::{attendance, cameras, classes, students};
use facecheck_domain::attendance::{AttendanceStatus, AttendanceSummary, Session};
use facecheck_domain::date_range::DateRange;

use crate::domain::repository::AttendanceRepository;
use crate::domain::types::{Attendance, AttendancePatch, NewAttendance};
use crate::error::AttendanceServiceError;
use crate::infra::db::{ConnectionManager, set_patched};

#[derive(Clone)]
pub struct DbAttendanceRepository {
    pub conn: ConnectionManager,
}

#[derive(Debug, FromQueryResult)]
struct AttendanceRow {
    attendance_id: i32,
    student_id: i32,
    class_id: i32,
    timestamp: DateTime<Utc>,
    session: String,
    status: String,
    method: String,
    camera_id: Option<i32>,
    note: Option<String>,
    student_name: String,
    student_code: Option<String>,
    class_name: String,
    camera_name: Option<String>,
    camera_location: Option<String>,
}

impl TryFrom<AttendanceRow> for Attendance {
    type Error = anyhow::Error;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let id = row.attendance_id;
        Ok(Attendance {
            attendance_id: row.attendance_id,
            student_id: row.student_id,
            class_id: row.class_id,
            timestamp: row.timestamp,
            session: row
                .session
                .parse()
                .with_context(|| format!("decode attendance {id}"))?,
            status: row
                .status
                .parse()
                .with_context(|| format!("decode attendance {id}"))?,
            method: row
                .method
                .parse()
                .with_context(|| format!("decode attendance {id}"))?,
            camera_id: row.camera_id,
            note: row.note,
            student_name: row.student_name,
            student_code: row.student_code,
            class_name: row.class_name,
            camera_name: row.camera_name,
            camera_location: row.camera_location,
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct StatusCountRow {
    status: String,
    record_count: i64,
}

/// Attendance joined with student, class and camera, newest first.
fn attendance_select() -> Select<attendance::Entity> {
    attendance::Entity::find()
        .select_only()
        .columns([
            attendance::Column::AttendanceId,
            attendance::Column::StudentId,
            attendance::Column::ClassId,
            attendance::Column::Timestamp,
            attendance::Column::Session,
            attendance::Column::Status,
            attendance::Column::Method,
            attendance::Column::CameraId,
            attendance::Column::Note,
        ])
        .column_as(students::Column::FullName, "student_name")
        .column_as(students::Column::StudentCode, "student_code")
        .column_as(classes::Column::ClassName, "class_name")
        .column_as(cameras::Column::CameraName, "camera_name")
        .column_as(cameras::Column::Location, "camera_location")
        .join(JoinType::InnerJoin, attendance::Relation::Student.def())
        .join(JoinType::InnerJoin, attendance::Relation::Class.def())
        .join(JoinType::LeftJoin, attendance::Relation::Camera.def())
        .order_by_desc(attendance::Column::Timestamp)
        .order_by_desc(attendance::Column::AttendanceId)
}

/// Restrict `query` to records whose UTC date falls inside `range`.
fn within<Q: QueryFilter>(query: Q, range: DateRange) -> Q {
    query
        .filter(attendance::Column::Timestamp.gte(range.starts_at()))
        .filter(attendance::Column::Timestamp.lt(range.ends_before()))
}

impl DbAttendanceRepository {
    async fn fetch(
        &self,
        query: Select<attendance::Entity>,
        operation: &'static str,
    ) -> Result<Vec<Attendance>, AttendanceServiceError> {
        let rows: Vec<AttendanceRow> = self
            .conn
            .execute_query(&query.into_query())
            .await
            .context(operation)?;
        let records = rows
            .into_iter()
            .map(Attendance::try_from)
            .collect::<Result<_, _>>()?;
        Ok(records)
    }

    async fn summarize(
        &self,
        scope: attendance::Column,
        id: i32,
        range: Option<DateRange>,
        operation: &'static str,
    ) -> Result<AttendanceSummary, AttendanceServiceError> {
        let mut query = attendance::Entity::find()
            .select_only()
            .column(attendance::Column::Status)
            .column_as(
                Expr::col(attendance::Column::AttendanceId).count(),
                "record_count",
            )
            .filter(scope.eq(id))
            .group_by(attendance::Column::Status);
        if let Some(range) = range {
            query = within(query, range);
        }
        let rows: Vec<StatusCountRow> = self
            .conn
            .execute_query(&query.into_query())
            .await
            .context(operation)?;
        let counts = rows
            .into_iter()
            .map(|row| {
                let status = row
                    .status
                    .parse::<AttendanceStatus>()
                    .context(operation)?;
                Ok((status, row.record_count))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(AttendanceSummary::from_counts(counts))
    }
}

impl AttendanceRepository for DbAttendanceRepository {
    async fn list(&self) -> Result<Vec<Attendance>, AttendanceServiceError> {
        self.fetch(attendance_select(), "list attendance").await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Attendance>, AttendanceServiceError> {
        let query = attendance_select().filter(attendance::Column::AttendanceId.eq(id));
        let rows = self.fetch(query, "find attendance by id").await?;
        Ok(rows.into_iter().next())
    }

    async fn list_by_student(
        &self,
        student_id: i32,
    ) -> Result<Vec<Attendance>, AttendanceServiceError> {
        let query = attendance_select().filter(attendance::Column::StudentId.eq(student_id));
        self.fetch(query, "list attendance by student").await
    }

    async fn list_by_class(
        &self,
        class_id: i32,
    ) -> Result<Vec<Attendance>, AttendanceServiceError> {
        let query = attendance_select().filter(attendance::Column::ClassId.eq(class_id));
        self.fetch(query, "list attendance by class").await
    }

    async fn list_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Attendance>, AttendanceServiceError> {
        let query = within(attendance_select(), DateRange::day(date));
        self.fetch(query, "list attendance by date").await
    }

    async fn list_by_class_and_date(
        &self,
        class_id: i32,
        date: NaiveDate,
    ) -> Result<Vec<Attendance>, AttendanceServiceError> {
        let query = within(attendance_select(), DateRange::day(date))
            .filter(attendance::Column::ClassId.eq(class_id));
        self.fetch(query, "list attendance by class and date").await
    }

    async fn list_by_status(
        &self,
        status: AttendanceStatus,
    ) -> Result<Vec<Attendance>, AttendanceServiceError> {
        let query = attendance_select().filter(attendance::Column::Status.eq(status.as_str()));
        self.fetch(query, "list attendance by status").await
    }

    async fn list_by_session(
        &self,
        session: Session,
    ) -> Result<Vec<Attendance>, AttendanceServiceError> {
        let query = attendance_select().filter(attendance::Column::Session.eq(session.as_str()));
        self.fetch(query, "list attendance by session").await
    }

    async fn create(&self, record: &NewAttendance) -> Result<i32, AttendanceServiceError> {
        let db = self.conn.connection().await.context("create attendance")?;
        let model = attendance::ActiveModel {
            student_id: Set(record.student_id),
            class_id: Set(record.class_id),
            timestamp: Set(record.timestamp.unwrap_or_else(Utc::now)),
            session: Set(record.session.as_str().to_owned()),
            status: Set(record.status.as_str().to_owned()),
            method: Set(record.method.unwrap_or_default().as_str().to_owned()),
            camera_id: Set(record.camera_id),
            note: Set(record.note.clone()),
            ..Default::default()
        };
        let result = attendance::Entity::insert(model)
            .exec(&db)
            .await
            .context("create attendance")?;
        Ok(result.last_insert_id)
    }

    async fn update(
        &self,
        id: i32,
        patch: &AttendancePatch,
    ) -> Result<bool, AttendanceServiceError> {
        if patch.is_empty() {
            return Ok(false);
        }
        let status = patch.status.clone().map(|s| s.as_str().to_owned());
        let session = patch.session.clone().map(|s| s.as_str().to_owned());

        let mut query =
            attendance::Entity::update_many().filter(attendance::Column::AttendanceId.eq(id));
        query = set_patched(query, attendance::Column::Status, &status);
        query = set_patched(query, attendance::Column::Session, &session);
        query = set_patched(query, attendance::Column::Note, &patch.note);
        let outcome = self
            .conn
            .execute_update(&query.into_query())
            .await
            .context("update attendance")?;
        Ok(outcome.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, AttendanceServiceError> {
        let query = attendance::Entity::delete_many()
            .filter(attendance::Column::AttendanceId.eq(id))
            .into_query();
        let outcome = self
            .conn
            .execute_update(&query)
            .await
            .context("delete attendance")?;
        Ok(outcome.rows_affected > 0)
    }

    async fn class_statistics(
        &self,
        class_id: i32,
        range: Option<DateRange>,
    ) -> Result<AttendanceSummary, AttendanceServiceError> {
        self.summarize(
            attendance::Column::ClassId,
            class_id,
            range,
            "class attendance statistics",
        )
        .await
    }

    async fn student_summary(
        &self,
        student_id: i32,
        range: Option<DateRange>,
    ) -> Result<AttendanceSummary, AttendanceServiceError> {
        self.summarize(
            attendance::Column::StudentId,
            student_id,
            range,
            "student attendance summary",
        )
        .await
    }
}
