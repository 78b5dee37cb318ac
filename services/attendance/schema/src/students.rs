use sea_orm::entity::prelude::*;

/// Student enrolled in exactly one class.
///
/// `gender` holds `male`, `female` or `other` when set.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub student_id: i32,
    pub full_name: String,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    #[sea_orm(unique)]
    pub student_code: Option<String>,
    pub class_id: i32,
    pub avatar_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::ClassId"
    )]
    Class,
    #[sea_orm(has_many = "super::face_embeddings::Entity")]
    FaceEmbeddings,
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::face_embeddings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FaceEmbeddings.def()
    }
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
