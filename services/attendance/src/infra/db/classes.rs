use anyhow::Context as _;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, RelationTrait, Select, sea_query::Expr,
};

use facecheck_attendance_schema::{classes, students, teachers};
use facecheck_core::sea_ext::contains_ignore_case;

use crate::domain::repository::ClassRepository;
use crate::domain::types::{Class, ClassPatch, ClassWithStudents, NewClass, Student};
use crate::error::AttendanceServiceError;
use crate::infra::db::students::{fetch_students, student_select};
use crate::infra::db::{ConnectionManager, set_patched};

#[derive(Clone)]
pub struct DbClassRepository {
    pub conn: ConnectionManager,
}

#[derive(Debug, FromQueryResult)]
struct ClassRow {
    class_id: i32,
    class_name: String,
    teacher_id: i32,
    teacher_name: Option<String>,
    student_count: i64,
}

impl From<ClassRow> for Class {
    fn from(row: ClassRow) -> Self {
        Class {
            class_id: row.class_id,
            class_name: row.class_name,
            teacher_id: row.teacher_id,
            teacher_name: row.teacher_name,
            student_count: row.student_count,
        }
    }
}

/// Classes with teacher name and enrolment, ordered by class name.
pub(crate) fn class_select() -> Select<classes::Entity> {
    classes::Entity::find()
        .select_only()
        .columns([
            classes::Column::ClassId,
            classes::Column::ClassName,
            classes::Column::TeacherId,
        ])
        .column_as(teachers::Column::FullName, "teacher_name")
        .column_as(
            Expr::col((students::Entity, students::Column::StudentId)).count(),
            "student_count",
        )
        .join(JoinType::LeftJoin, classes::Relation::Teacher.def())
        .join(JoinType::LeftJoin, classes::Relation::Students.def())
        .group_by(classes::Column::ClassId)
        .group_by(classes::Column::ClassName)
        .group_by(classes::Column::TeacherId)
        .group_by(teachers::Column::FullName)
        .order_by_asc(classes::Column::ClassName)
        .order_by_asc(classes::Column::ClassId)
}

pub(crate) async fn fetch_classes(
    conn: &ConnectionManager,
    query: Select<classes::Entity>,
    operation: &'static str,
) -> Result<Vec<Class>, AttendanceServiceError> {
    let rows: Vec<ClassRow> = conn
        .execute_query(&query.into_query())
        .await
        .context(operation)?;
    Ok(rows.into_iter().map(Class::from).collect())
}

impl ClassRepository for DbClassRepository {
    async fn list(&self) -> Result<Vec<Class>, AttendanceServiceError> {
        fetch_classes(&self.conn, class_select(), "list classes").await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Class>, AttendanceServiceError> {
        let query = class_select().filter(classes::Column::ClassId.eq(id));
        let rows = fetch_classes(&self.conn, query, "find class by id").await?;
        Ok(rows.into_iter().next())
    }

    async fn list_by_teacher(
        &self,
        teacher_id: i32,
    ) -> Result<Vec<Class>, AttendanceServiceError> {
        let query = class_select().filter(classes::Column::TeacherId.eq(teacher_id));
        fetch_classes(&self.conn, query, "list classes by teacher").await
    }

    async fn list_students(&self, class_id: i32) -> Result<Vec<Student>, AttendanceServiceError> {
        let query = student_select().filter(students::Column::ClassId.eq(class_id));
        fetch_students(&self.conn, query, "list class students").await
    }

    async fn find_with_students(
        &self,
        class_id: i32,
    ) -> Result<Option<ClassWithStudents>, AttendanceServiceError> {
        let Some(class) = self.find_by_id(class_id).await? else {
            return Ok(None);
        };
        let students = self.list_students(class_id).await?;
        Ok(Some(ClassWithStudents { class, students }))
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Class>, AttendanceServiceError> {
        let query =
            class_select().filter(contains_ignore_case([classes::Column::ClassName], keyword));
        fetch_classes(&self.conn, query, "search classes").await
    }

    async fn create(&self, class: &NewClass) -> Result<i32, AttendanceServiceError> {
        let db = self.conn.connection().await.context("create class")?;
        let model = classes::ActiveModel {
            class_name: Set(class.class_name.clone()),
            teacher_id: Set(class.teacher_id),
            ..Default::default()
        };
        let result = classes::Entity::insert(model)
            .exec(&db)
            .await
            .context("create class")?;
        Ok(result.last_insert_id)
    }

    async fn update(&self, id: i32, patch: &ClassPatch) -> Result<bool, AttendanceServiceError> {
        if patch.is_empty() {
            return Ok(false);
        }
        let mut query = classes::Entity::update_many().filter(classes::Column::ClassId.eq(id));
        query = set_patched(query, classes::Column::ClassName, &patch.class_name);
        query = set_patched(query, classes::Column::TeacherId, &patch.teacher_id);
        let outcome = self
            .conn
            .execute_update(&query.into_query())
            .await
            .context("update class")?;
        Ok(outcome.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, AttendanceServiceError> {
        let query = classes::Entity::delete_many()
            .filter(classes::Column::ClassId.eq(id))
            .into_query();
        let outcome = self
            .conn
            .execute_update(&query)
            .await
            .context("delete class")?;
        Ok(outcome.rows_affected > 0)
    }
}
