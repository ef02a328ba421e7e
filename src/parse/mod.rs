//! Parse phase: JSON document → project graph.

pub mod types;

pub use types::*;

use crate::error::DocumentError;

/// Deserialize an authored project document into a `Project`.
///
/// This is the loader seam: any error raised here is a [`DocumentError`],
/// a distinct class from the validation violations reported later.
pub fn parse(json: &str) -> Result<Project, DocumentError> {
    serde_json::from_str::<Project>(json).map_err(DocumentError::from)
}
