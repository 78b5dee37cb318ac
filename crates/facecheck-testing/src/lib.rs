//! Test utilities for FaceCheck services.
//!
//! Provides an in-memory database with the attendance schema and
//! deterministic embedding vectors. Import from tests only.

pub mod db;
pub mod embedding;
