use super::types::FieldType;

/// Errors raised while turning a record into its canonical byte encoding.
///
/// Encoding errors are caused by the input and never succeed on retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// A schema entry did not name a supported type.
    #[error("unknown field type `{0}`")]
    UnknownType(String),
    /// The record and the schema disagree on the number of fields.
    #[error("record has {got} fields but the schema declares {expected}")]
    FieldCount { expected: usize, got: usize },
    /// A value cannot be represented under its declared type.
    #[error("field {index} ({ty}): {reason}")]
    InvalidField {
        index: usize,
        ty: FieldType,
        reason: String,
    },
    /// A JSON value has no field representation (null, object, fraction).
    #[error("field {index}: unsupported JSON value: {reason}")]
    UnsupportedValue { index: usize, reason: String },
    /// A JSON record was not an array.
    #[error("record must be a JSON array")]
    NotAnArray,
}

impl EncodingError {
    pub(crate) fn invalid(index: usize, ty: FieldType, reason: impl Into<String>) -> Self {
        EncodingError::InvalidField {
            index,
            ty,
            reason: reason.into(),
        }
    }
}
