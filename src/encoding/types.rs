use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::error::EncodingError;

/// Solidity ABI type of a single record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// 20-byte account identifier.
    Address,
    Bool,
    /// Unsigned integer of the given bit width (8..=256, multiple of 8).
    Uint(u16),
    /// Two's complement integer of the given bit width.
    Int(u16),
    /// Fixed-length byte string of 1..=32 bytes.
    FixedBytes(u8),
    /// Dynamic byte string.
    Bytes,
    /// Dynamic UTF-8 string.
    String,
}

impl FieldType {
    /// Dynamic types are encoded out of line in the ABI tail.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, FieldType::Bytes | FieldType::String)
    }
}

fn parse_width(text: &str, prefix: &'static str) -> Option<u16> {
    let digits = text.strip_prefix(prefix)?;
    if digits.is_empty() {
        return Some(256);
    }
    if digits.starts_with('0') {
        return None;
    }
    let bits = digits.parse::<u16>().ok()?;
    (bits % 8 == 0 && (8..=256).contains(&bits)).then_some(bits)
}

impl FromStr for FieldType {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || EncodingError::UnknownType(s.to_owned());
        match s {
            "address" => Ok(FieldType::Address),
            "bool" => Ok(FieldType::Bool),
            "bytes" => Ok(FieldType::Bytes),
            "string" => Ok(FieldType::String),
            _ if s.starts_with("uint") => parse_width(s, "uint")
                .map(FieldType::Uint)
                .ok_or_else(unknown),
            _ if s.starts_with("int") => parse_width(s, "int")
                .map(FieldType::Int)
                .ok_or_else(unknown),
            _ if s.starts_with("bytes") => {
                let digits = &s["bytes".len()..];
                let len = digits.parse::<u8>().map_err(|_| unknown())?;
                if (1..=32).contains(&len) && !digits.starts_with('0') {
                    Ok(FieldType::FixedBytes(len))
                } else {
                    Err(unknown())
                }
            }
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Address => write!(f, "address"),
            FieldType::Bool => write!(f, "bool"),
            FieldType::Uint(bits) => write!(f, "uint{bits}"),
            FieldType::Int(bits) => write!(f, "int{bits}"),
            FieldType::FixedBytes(len) => write!(f, "bytes{len}"),
            FieldType::Bytes => write!(f, "bytes"),
            FieldType::String => write!(f, "string"),
        }
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Ordered list of field types that every record of a tree is encoded under.
///
/// Serialized as the list of canonical type names, e.g.
/// `["address", "uint256", "uint256"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Vec<FieldType>);

impl Schema {
    pub fn new(fields: Vec<FieldType>) -> Self {
        Self(fields)
    }

    /// Parses a schema from type names.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, EncodingError> {
        names
            .iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn fields(&self) -> &[FieldType] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<FieldType>> for Schema {
    fn from(fields: Vec<FieldType>) -> Self {
        Self(fields)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (position, ty) in self.0.iter().enumerate() {
            if position > 0 {
                write!(f, ",")?;
            }
            write!(f, "{ty}")?;
        }
        write!(f, ")")
    }
}
