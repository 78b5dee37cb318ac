//! Deterministic face vectors.

use facecheck_domain::embedding::EMBEDDING_DIM;

/// Full-length embedding whose values depend only on `seed`.
///
/// Values are multiples of 1/128 so they survive a JSON round-trip exactly.
pub fn sample_embedding(seed: u32) -> Vec<f64> {
    (0..EMBEDDING_DIM as u32)
        .map(|i| ((i.wrapping_mul(31).wrapping_add(seed)) % 256) as f64 / 128.0 - 1.0)
        .collect()
}
