pub mod attendance;
pub mod camera;
pub mod class;
pub mod embedding;
pub mod student;
pub mod teacher;
