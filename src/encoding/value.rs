use alloy_primitives::Address;
use serde_json::Value;

use super::error::EncodingError;

/// A single record field as supplied by the caller.
///
/// The representation is loose on purpose: `10u64`, `"10"` and `"0x0a"` are
/// different values here but normalise to the same bytes under `uint256`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Textual form: hex address, decimal or `0x` hex integer, `0x` hex bytes,
    /// `"true"`/`"false"`, or a plain string.
    Text(String),
    Unsigned(u128),
    Signed(i128),
    Bool(bool),
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// Short name of the representation, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Unsigned(_) => "unsigned integer",
            FieldValue::Signed(_) => "signed integer",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Bytes(_) => "bytes",
        }
    }

    fn from_json(index: usize, value: &Value) -> Result<Self, EncodingError> {
        let unsupported = |reason: &str| EncodingError::UnsupportedValue {
            index,
            reason: reason.to_owned(),
        };
        match value {
            Value::String(text) => Ok(FieldValue::Text(text.clone())),
            Value::Bool(flag) => Ok(FieldValue::Bool(*flag)),
            Value::Number(number) => {
                if let Some(unsigned) = number.as_u64() {
                    Ok(FieldValue::Unsigned(unsigned.into()))
                } else if let Some(signed) = number.as_i64() {
                    Ok(FieldValue::Signed(signed.into()))
                } else {
                    Err(unsupported("non-integer number; pass large integers as strings"))
                }
            }
            Value::Null => Err(unsupported("null")),
            Value::Array(_) => Err(unsupported("nested array")),
            Value::Object(_) => Err(unsupported("object")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        FieldValue::Bytes(value)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(value: &[u8]) -> Self {
        FieldValue::Bytes(value.to_vec())
    }
}

impl From<Address> for FieldValue {
    fn from(value: Address) -> Self {
        FieldValue::Bytes(value.as_slice().to_vec())
    }
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for FieldValue {
            fn from(value: $ty) -> Self {
                FieldValue::Unsigned(value as u128)
            }
        })*
    };
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for FieldValue {
            fn from(value: $ty) -> Self {
                FieldValue::Signed(value as i128)
            }
        })*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

/// An ordered tuple of field values making up one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record(Vec<FieldValue>);

impl Record {
    pub fn new(fields: Vec<FieldValue>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &[FieldValue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts a JSON array such as `["0x…01", "0", "10"]` into a record.
    pub fn from_json(value: &Value) -> Result<Self, EncodingError> {
        let items = value.as_array().ok_or(EncodingError::NotAnArray)?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| FieldValue::from_json(index, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl From<Vec<FieldValue>> for Record {
    fn from(fields: Vec<FieldValue>) -> Self {
        Self(fields)
    }
}

impl FromIterator<FieldValue> for Record {
    fn from_iter<I: IntoIterator<Item = FieldValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Builds a [`Record`] from values convertible into [`FieldValue`].
///
/// ```
/// use merkle_airdrop::record;
///
/// let entry = record!["0x0000000000000000000000000000000000000001", 0u64, "10"];
/// assert_eq!(entry.len(), 3);
/// ```
#[macro_export]
macro_rules! record {
    ($($value:expr),* $(,)?) => {
        $crate::encoding::Record::new(vec![$($crate::encoding::FieldValue::from($value)),*])
    };
}
