//! Attendance service: CRUD and reporting over teachers, classes, students,
//! face embeddings, cameras and attendance records.

pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod infra;
pub mod router;
pub mod state;
pub mod usecase;
