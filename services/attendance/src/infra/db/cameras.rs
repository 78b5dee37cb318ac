use anyhow::Context as _;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, RelationTrait, Select, sea_query::Expr,
};

use facecheck_attendance_schema::{attendance, cameras};
use facecheck_core::sea_ext::contains_ignore_case;

use crate::domain::repository::CameraRepository;
use crate::domain::types::{Camera, CameraPatch, CameraStatistics, NewCamera};
use crate::error::AttendanceServiceError;
use crate::infra::db::{ConnectionManager, set_patched};

#[derive(Clone)]
pub struct DbCameraRepository {
    pub conn: ConnectionManager,
}

#[derive(Debug, FromQueryResult)]
struct CameraStatisticsRow {
    camera_id: i32,
    camera_name: Option<String>,
    location: Option<String>,
    total_attendance_records: i64,
}

fn camera_from_model(model: cameras::Model) -> Camera {
    Camera {
        camera_id: model.camera_id,
        camera_name: model.camera_name,
        location: model.location,
        ip_address: model.ip_address,
    }
}

impl DbCameraRepository {
    async fn fetch(
        &self,
        query: Select<cameras::Entity>,
        operation: &'static str,
    ) -> Result<Vec<Camera>, AttendanceServiceError> {
        let query = query
            .order_by_asc(cameras::Column::CameraName)
            .order_by_asc(cameras::Column::CameraId)
            .into_query();
        let models: Vec<cameras::Model> = self
            .conn
            .execute_query(&query)
            .await
            .context(operation)?;
        Ok(models.into_iter().map(camera_from_model).collect())
    }
}

impl CameraRepository for DbCameraRepository {
    async fn list(&self) -> Result<Vec<Camera>, AttendanceServiceError> {
        self.fetch(cameras::Entity::find(), "list cameras").await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Camera>, AttendanceServiceError> {
        let query = cameras::Entity::find().filter(cameras::Column::CameraId.eq(id));
        let rows = self.fetch(query, "find camera by id").await?;
        Ok(rows.into_iter().next())
    }

    async fn list_by_location(
        &self,
        location: &str,
    ) -> Result<Vec<Camera>, AttendanceServiceError> {
        let query = cameras::Entity::find()
            .filter(contains_ignore_case([cameras::Column::Location], location));
        self.fetch(query, "list cameras by location").await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Camera>, AttendanceServiceError> {
        let query = cameras::Entity::find().filter(contains_ignore_case(
            [
                cameras::Column::CameraName,
                cameras::Column::Location,
                cameras::Column::IpAddress,
            ],
            keyword,
        ));
        self.fetch(query, "search cameras").await
    }

    async fn statistics(
        &self,
        camera_id: i32,
    ) -> Result<Option<CameraStatistics>, AttendanceServiceError> {
        let query = cameras::Entity::find()
            .select_only()
            .columns([
                cameras::Column::CameraId,
                cameras::Column::CameraName,
                cameras::Column::Location,
            ])
            .column_as(
                Expr::col((attendance::Entity, attendance::Column::AttendanceId)).count(),
                "total_attendance_records",
            )
            .join(JoinType::LeftJoin, cameras::Relation::Attendance.def())
            .filter(cameras::Column::CameraId.eq(camera_id))
            .group_by(cameras::Column::CameraId)
            .group_by(cameras::Column::CameraName)
            .group_by(cameras::Column::Location)
            .into_query();
        let rows: Vec<CameraStatisticsRow> = self
            .conn
            .execute_query(&query)
            .await
            .context("camera statistics")?;
        Ok(rows.into_iter().next().map(|row| CameraStatistics {
            camera_id: row.camera_id,
            camera_name: row.camera_name,
            location: row.location,
            total_attendance_records: row.total_attendance_records,
        }))
    }

    async fn create(&self, camera: &NewCamera) -> Result<i32, AttendanceServiceError> {
        let db = self.conn.connection().await.context("create camera")?;
        let model = cameras::ActiveModel {
            camera_name: Set(camera.camera_name.clone()),
            location: Set(camera.location.clone()),
            ip_address: Set(camera.ip_address.clone()),
            ..Default::default()
        };
        let result = cameras::Entity::insert(model)
            .exec(&db)
            .await
            .context("create camera")?;
        Ok(result.last_insert_id)
    }

    async fn update(&self, id: i32, patch: &CameraPatch) -> Result<bool, AttendanceServiceError> {
        if patch.is_empty() {
            return Ok(false);
        }
        let mut query = cameras::Entity::update_many().filter(cameras::Column::CameraId.eq(id));
        query = set_patched(query, cameras::Column::CameraName, &patch.camera_name);
        query = set_patched(query, cameras::Column::Location, &patch.location);
        query = set_patched(query, cameras::Column::IpAddress, &patch.ip_address);
        let outcome = self
            .conn
            .execute_update(&query.into_query())
            .await
            .context("update camera")?;
        Ok(outcome.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, AttendanceServiceError> {
        let query = cameras::Entity::delete_many()
            .filter(cameras::Column::CameraId.eq(id))
            .into_query();
        let outcome = self
            .conn
            .execute_update(&query)
            .await
            .context("delete camera")?;
        Ok(outcome.rows_affected > 0)
    }
}
