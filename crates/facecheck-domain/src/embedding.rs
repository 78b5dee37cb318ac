//! Face embedding storage codec.
//!
//! Embeddings are produced by an external recognition model (512 floats for
//! InsightFace) and stored verbatim as a JSON array of doubles in a text column.

use serde::ser::Error as _;

/// Dimension produced by the recognition model in use.
pub const EMBEDDING_DIM: usize = 512;

/// Serialize an embedding to its stored JSON form.
///
/// Non-finite components are rejected: JSON has no spelling for them and
/// they would otherwise be written as `null`.
pub fn encode(embedding: &[f64]) -> Result<String, serde_json::Error> {
    if let Some(index) = embedding.iter().position(|v| !v.is_finite()) {
        return Err(serde_json::Error::custom(format!(
            "embedding component {index} is not a finite number"
        )));
    }
    serde_json::to_string(embedding)
}

/// Parse a stored embedding. Malformed JSON yields `None`.
pub fn decode(raw: &str) -> Option<Vec<f64>> {
    serde_json::from_str(raw).ok()
}
