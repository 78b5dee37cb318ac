use anyhow::Context as _;
use chrono::NaiveDate;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, RelationTrait, Select, sea_query::Expr,
};

use facecheck_attendance_schema::{classes, students};
use facecheck_core::sea_ext::contains_ignore_case;
use facecheck_domain::student::Gender;

use crate::domain::repository::StudentRepository;
use crate::domain::types::{ClassStudentCount, NewStudent, Student, StudentPatch};
use crate::error::AttendanceServiceError;
use crate::infra::db::{ConnectionManager, set_patched};

#[derive(Clone)]
pub struct DbStudentRepository {
    pub conn: ConnectionManager,
}

#[derive(Debug, FromQueryResult)]
struct StudentRow {
    student_id: i32,
    full_name: String,
    date_of_birth: Option<NaiveDate>,
    gender: Option<String>,
    student_code: Option<String>,
    class_id: i32,
    avatar_url: Option<String>,
    class_name: Option<String>,
}

impl TryFrom<StudentRow> for Student {
    type Error = AttendanceServiceError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let gender = row
            .gender
            .as_deref()
            .map(str::parse::<Gender>)
            .transpose()
            .with_context(|| format!("decode student {}", row.student_id))?;
        Ok(Student {
            student_id: row.student_id,
            full_name: row.full_name,
            date_of_birth: row.date_of_birth,
            gender,
            student_code: row.student_code,
            class_id: row.class_id,
            avatar_url: row.avatar_url,
            class_name: row.class_name,
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct ClassCountRow {
    class_id: i32,
    class_name: String,
    student_count: i64,
}

/// Students with their class name, ordered by full name.
pub(crate) fn student_select() -> Select<students::Entity> {
    students::Entity::find()
        .select_only()
        .columns([
            students::Column::StudentId,
            students::Column::FullName,
            students::Column::DateOfBirth,
            students::Column::Gender,
            students::Column::StudentCode,
            students::Column::ClassId,
            students::Column::AvatarUrl,
        ])
        .column_as(classes::Column::ClassName, "class_name")
        .join(JoinType::LeftJoin, students::Relation::Class.def())
        .order_by_asc(students::Column::FullName)
        .order_by_asc(students::Column::StudentId)
}

pub(crate) async fn fetch_students(
    conn: &ConnectionManager,
    query: Select<students::Entity>,
    operation: &'static str,
) -> Result<Vec<Student>, AttendanceServiceError> {
    let rows: Vec<StudentRow> = conn
        .execute_query(&query.into_query())
        .await
        .context(operation)?;
    rows.into_iter().map(Student::try_from).collect()
}

impl StudentRepository for DbStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, AttendanceServiceError> {
        fetch_students(&self.conn, student_select(), "list students").await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AttendanceServiceError> {
        let query = student_select().filter(students::Column::StudentId.eq(id));
        let rows = fetch_students(&self.conn, query, "find student by id").await?;
        Ok(rows.into_iter().next())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Student>, AttendanceServiceError> {
        let query = student_select().filter(students::Column::StudentCode.eq(code));
        let rows = fetch_students(&self.conn, query, "find student by code").await?;
        Ok(rows.into_iter().next())
    }

    async fn list_by_class(&self, class_id: i32) -> Result<Vec<Student>, AttendanceServiceError> {
        let query = student_select().filter(students::Column::ClassId.eq(class_id));
        fetch_students(&self.conn, query, "list students by class").await
    }

    async fn list_by_gender(
        &self,
        gender: Gender,
    ) -> Result<Vec<Student>, AttendanceServiceError> {
        let query = student_select().filter(students::Column::Gender.eq(gender.as_str()));
        fetch_students(&self.conn, query, "list students by gender").await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Student>, AttendanceServiceError> {
        let query = student_select().filter(contains_ignore_case(
            [students::Column::FullName, students::Column::StudentCode],
            keyword,
        ));
        fetch_students(&self.conn, query, "search students").await
    }

    async fn count_by_class(&self) -> Result<Vec<ClassStudentCount>, AttendanceServiceError> {
        let query = classes::Entity::find()
            .select_only()
            .columns([classes::Column::ClassId, classes::Column::ClassName])
            .column_as(
                Expr::col((students::Entity, students::Column::StudentId)).count(),
                "student_count",
            )
            .join(JoinType::LeftJoin, classes::Relation::Students.def())
            .group_by(classes::Column::ClassId)
            .group_by(classes::Column::ClassName)
            .order_by_asc(classes::Column::ClassName)
            .order_by_asc(classes::Column::ClassId)
            .into_query();
        let rows: Vec<ClassCountRow> = self
            .conn
            .execute_query(&query)
            .await
            .context("count students by class")?;
        Ok(rows
            .into_iter()
            .map(|row| ClassStudentCount {
                class_id: row.class_id,
                class_name: row.class_name,
                student_count: row.student_count,
            })
            .collect())
    }

    async fn create(&self, student: &NewStudent) -> Result<i32, AttendanceServiceError> {
        let db = self.conn.connection().await.context("create student")?;
        let model = students::ActiveModel {
            full_name: Set(student.full_name.clone()),
            date_of_birth: Set(student.date_of_birth),
            gender: Set(student.gender.map(|g| g.as_str().to_owned())),
            student_code: Set(student.student_code.clone()),
            class_id: Set(student.class_id),
            avatar_url: Set(student.avatar_url.clone()),
            ..Default::default()
        };
        let result = students::Entity::insert(model)
            .exec(&db)
            .await
            .context("create student")?;
        Ok(result.last_insert_id)
    }

    async fn update(&self, id: i32, patch: &StudentPatch) -> Result<bool, AttendanceServiceError> {
        if patch.is_empty() {
            return Ok(false);
        }
        let gender = patch
            .gender
            .clone()
            .map(|g| g.map(|g| g.as_str().to_owned()));

        let mut query =
            students::Entity::update_many().filter(students::Column::StudentId.eq(id));
        query = set_patched(query, students::Column::FullName, &patch.full_name);
        query = set_patched(query, students::Column::DateOfBirth, &patch.date_of_birth);
        query = set_patched(query, students::Column::Gender, &gender);
        query = set_patched(query, students::Column::StudentCode, &patch.student_code);
        query = set_patched(query, students::Column::ClassId, &patch.class_id);
        query = set_patched(query, students::Column::AvatarUrl, &patch.avatar_url);
        let outcome = self
            .conn
            .execute_update(&query.into_query())
            .await
            .context("update student")?;
        Ok(outcome.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, AttendanceServiceError> {
        let query = students::Entity::delete_many()
            .filter(students::Column::StudentId.eq(id))
            .into_query();
        let outcome = self
            .conn
            .execute_update(&query)
            .await
            .context("delete student")?;
        Ok(outcome.rows_affected > 0)
    }
}
