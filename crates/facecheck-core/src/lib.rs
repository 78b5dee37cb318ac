//! Service plumbing shared by FaceCheck binaries: the error envelope and the
//! extractors that reject into it, health reporting, request ids, tracing
//! setup, env config and query helpers.

pub mod config;
pub mod error;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
