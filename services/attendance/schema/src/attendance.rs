use sea_orm::entity::prelude::*;

/// One attendance mark for a student in a class session.
///
/// `session`, `status` and `method` are stored as their snake_case names.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub attendance_id: i32,
    pub student_id: i32,
    pub class_id: i32,
    pub timestamp: DateTimeUtc,
    pub session: String,
    pub status: String,
    #[sea_orm(default_value = "face_recognition")]
    pub method: String,
    pub camera_id: Option<i32>,
    pub note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::StudentId"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::ClassId"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::cameras::Entity",
        from = "Column::CameraId",
        to = "super::cameras::Column::CameraId"
    )]
    Camera,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::cameras::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Camera.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
