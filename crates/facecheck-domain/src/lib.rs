//! Domain types shared across FaceCheck crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers as well as in repositories that
//! need to encode or decode stored values.

pub mod attendance;
pub mod date_range;
pub mod embedding;
pub mod patch;
pub mod student;
