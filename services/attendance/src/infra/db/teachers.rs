use anyhow::Context as _;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QueryTrait, Select,
};

use facecheck_attendance_schema::{classes, teachers};
use facecheck_core::sea_ext::contains_ignore_case;

use crate::domain::repository::TeacherRepository;
use crate::domain::types::{Class, NewTeacher, Teacher, TeacherPatch};
use crate::error::AttendanceServiceError;
use crate::infra::db::classes::{class_select, fetch_classes};
use crate::infra::db::{ConnectionManager, set_patched};

#[derive(Clone)]
pub struct DbTeacherRepository {
    pub conn: ConnectionManager,
}

impl DbTeacherRepository {
    async fn fetch(
        &self,
        query: Select<teachers::Entity>,
        operation: &'static str,
    ) -> Result<Vec<Teacher>, AttendanceServiceError> {
        let query = query
            .order_by_asc(teachers::Column::FullName)
            .order_by_asc(teachers::Column::TeacherId)
            .into_query();
        let models: Vec<teachers::Model> = self
            .conn
            .execute_query(&query)
            .await
            .context(operation)?;
        Ok(models.into_iter().map(teacher_from_model).collect())
    }
}

fn teacher_from_model(model: teachers::Model) -> Teacher {
    Teacher {
        teacher_id: model.teacher_id,
        full_name: model.full_name,
        email: model.email,
        phone: model.phone,
    }
}

impl TeacherRepository for DbTeacherRepository {
    async fn list(&self) -> Result<Vec<Teacher>, AttendanceServiceError> {
        self.fetch(teachers::Entity::find(), "list teachers").await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Teacher>, AttendanceServiceError> {
        let query = teachers::Entity::find().filter(teachers::Column::TeacherId.eq(id));
        let rows = self.fetch(query, "find teacher by id").await?;
        Ok(rows.into_iter().next())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Teacher>, AttendanceServiceError> {
        let query = teachers::Entity::find().filter(teachers::Column::Email.eq(email));
        let rows = self.fetch(query, "find teacher by email").await?;
        Ok(rows.into_iter().next())
    }

    async fn list_classes(&self, teacher_id: i32) -> Result<Vec<Class>, AttendanceServiceError> {
        let query = class_select().filter(classes::Column::TeacherId.eq(teacher_id));
        fetch_classes(&self.conn, query, "list teacher classes").await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Teacher>, AttendanceServiceError> {
        let query = teachers::Entity::find().filter(contains_ignore_case(
            [
                teachers::Column::FullName,
                teachers::Column::Email,
                teachers::Column::Phone,
            ],
            keyword,
        ));
        self.fetch(query, "search teachers").await
    }

    async fn create(&self, teacher: &NewTeacher) -> Result<i32, AttendanceServiceError> {
        let db = self.conn.connection().await.context("create teacher")?;
        let model = teachers::ActiveModel {
            full_name: Set(teacher.full_name.clone()),
            email: Set(teacher.email.clone()),
            phone: Set(teacher.phone.clone()),
            ..Default::default()
        };
        let result = teachers::Entity::insert(model)
            .exec(&db)
            .await
            .context("create teacher")?;
        Ok(result.last_insert_id)
    }

    async fn update(&self, id: i32, patch: &TeacherPatch) -> Result<bool, AttendanceServiceError> {
        if patch.is_empty() {
            return Ok(false);
        }
        let mut query =
            teachers::Entity::update_many().filter(teachers::Column::TeacherId.eq(id));
        query = set_patched(query, teachers::Column::FullName, &patch.full_name);
        query = set_patched(query, teachers::Column::Email, &patch.email);
        query = set_patched(query, teachers::Column::Phone, &patch.phone);
        let outcome = self
            .conn
            .execute_update(&query.into_query())
            .await
            .context("update teacher")?;
        Ok(outcome.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, AttendanceServiceError> {
        let query = teachers::Entity::delete_many()
            .filter(teachers::Column::TeacherId.eq(id))
            .into_query();
        let outcome = self
            .conn
            .execute_update(&query)
            .await
            .context("delete teacher")?;
        Ok(outcome.rows_affected > 0)
    }
}
