use crate::config::ConfigError;
use crate::encoding::{EncodingError, Schema};
use crate::ser::SerError;

/// Errors emitted by tree construction, proving, verification and loading.
///
/// A proof that simply does not match a root is not an error; verifiers
/// report it as `Ok(false)`. These variants cover inputs that are malformed
/// or inconsistent, none of which succeed on retry.
#[derive(Debug, thiserror::Error)]
pub enum MerkleError {
    /// A record could not be encoded under the schema.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// No records were supplied.
    #[error("cannot build a tree from zero records")]
    EmptyInput,
    /// More records than the configured `max_leaves`.
    #[error("{got} records exceed the configured maximum of {max}")]
    TooManyLeaves { max: u64, got: u64 },
    /// A proof was requested for a leaf that does not exist.
    #[error("index {index} out of range for {leaf_count} leaves")]
    IndexOutOfRange { index: usize, leaf_count: usize },
    /// The same index was requested twice in a multi-proof.
    #[error("index {index} requested more than once")]
    DuplicateIndex { index: usize },
    /// A multi-proof was requested for an empty index list.
    #[error("at least one index is required")]
    NoIndices,
    /// A proof is structurally inconsistent and was rejected before folding.
    #[error("malformed proof: {reason}")]
    MalformedProof { reason: String },
    /// A document's schema differs from the one the caller expects.
    #[error("schema mismatch: expected {expected}, document declares {found}")]
    SchemaMismatch { expected: Schema, found: Schema },
    /// A tree document failed validation.
    #[error("invalid tree document: {reason}")]
    InvalidDocument { reason: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("tree document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl MerkleError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        MerkleError::MalformedProof {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_document(reason: impl Into<String>) -> Self {
        MerkleError::InvalidDocument {
            reason: reason.into(),
        }
    }
}

impl From<SerError> for MerkleError {
    fn from(err: SerError) -> Self {
        MerkleError::malformed(err.to_string())
    }
}

/// Result alias used across the Merkle layer.
pub type MerkleResult<T> = Result<T, MerkleError>;
