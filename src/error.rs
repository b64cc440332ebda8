use std::path::PathBuf;
use thiserror::Error;

use crate::artifacts::ArtifactKind;

/// Startup failures while loading the transform/classifier pair.
///
/// Every variant is fatal: the process must not serve predictions with only
/// one artifact, or with two artifacts that disagree on the feature schema.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{kind} artifact not found at {}", path.display())]
    Missing { kind: ArtifactKind, path: PathBuf },

    #[error("{kind} artifact at {} could not be read", path.display())]
    Unreadable {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} artifact at {} could not be decoded", path.display())]
    Malformed {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} artifact is invalid: {reason}")]
    Invalid { kind: ArtifactKind, reason: String },

    #[error("artifacts are incompatible: {reason}")]
    Incompatible { reason: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("schema mismatch: expected fields {expected:?}, found {found:?} (missing {missing:?})")]
pub struct SchemaMismatch {
    pub expected: Vec<String>,
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

/// Rejections raised by a transform or classifier for a single input row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("expected {expected} values, got {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("value at position {index} is not finite")]
    NonFinite { index: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("prediction failed in {stage}: {cause}")]
pub struct PredictionFailed {
    pub stage: &'static str,
    #[source]
    pub cause: ModelError,
}

/// Per-request failures. None of these end the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    SchemaMismatch(#[from] SchemaMismatch),

    #[error(transparent)]
    PredictionFailed(#[from] PredictionFailed),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} could not be read", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {} is not valid JSON", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("duplicate field '{0}' in feature record")]
    DuplicateField(String),

    #[error("unknown input field '{0}'")]
    UnknownField(String),
}
