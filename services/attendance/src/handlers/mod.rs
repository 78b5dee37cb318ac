use serde::Serialize;

pub mod attendance;
pub mod camera;
pub mod class;
pub mod embedding;
pub mod health;
pub mod student;
pub mod teacher;

/// Body of a `201 Created` response.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i32,
}
