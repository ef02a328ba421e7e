//! Error types for the three failure classes of the pipeline:
//! malformed documents, validation violations, and artifact I/O.

use std::path::PathBuf;

use thiserror::Error;

/// A single human-readable invariant breach found during validation.
///
/// Violations are aggregated into one ordered list per run; the validator
/// never stops at the first breach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub code: &'static str,
    pub message: String,
    /// The ID of the entity the breach was found on, if applicable.
    pub entity_id: Option<String>,
}

impl Violation {
    pub fn new(code: &'static str, message: impl Into<String>, entity_id: Option<String>) -> Self {
        Violation {
            code,
            message: message.into(),
            entity_id,
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.entity_id {
            Some(id) => write!(f, "[{}] {} (entity '{}')", self.code, self.message, id),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

impl std::error::Error for Violation {}

/// A malformed or unparseable project document. Raised by the document
/// loader before validation ever runs.
#[derive(Debug)]
pub struct DocumentError {
    pub message: String,
}

impl DocumentError {
    pub fn new(message: impl Into<String>) -> Self {
        DocumentError {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed project document: {}", self.message)
    }
}

impl std::error::Error for DocumentError {}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        DocumentError::new(e.to_string())
    }
}

/// Artifact write failure. The compiler itself has no data-level failure
/// mode; by the time it runs, every invariant holds by construction.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to write artifact {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Artifact read failure, surfaced by the [`crate::artifact`] contract
/// reader when the bytes do not match the version 1 layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("unexpected end of artifact data")]
    Truncated,
    #[error("bad file identifier")]
    BadMagic,
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u32),
    #[error("expected chunk '{expected}', found '{found}'")]
    ChunkMismatch { expected: String, found: String },
    #[error("chunk '{0}' length does not match its contents")]
    ChunkLength(String),
    #[error("string is not valid UTF-8")]
    BadString,
    #[error("trailing bytes after the last chunk")]
    TrailingBytes,
}
