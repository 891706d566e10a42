use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Width in bytes of every digest produced by the supported hash functions.
pub const DIGEST_SIZE: usize = 32;

/// Fixed-width digest used for leaves, internal nodes, roots and proof elements.
///
/// Digests order lexicographically by their bytes, which is the order used to
/// canonicalise sibling pairs before hashing.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    pub const fn new(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Creates a digest from a slice, returning `None` when the width is wrong.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; DIGEST_SIZE]>::try_from(bytes).ok().map(Self)
    }

    /// Parses a hex digest with or without the `0x` prefix.
    pub fn from_hex(text: &str) -> Result<Self, DigestParseError> {
        let stripped = text.strip_prefix("0x").unwrap_or(text);
        let raw = hex::decode(stripped).map_err(|_| DigestParseError::InvalidHex)?;
        Self::from_slice(&raw).ok_or(DigestParseError::InvalidWidth { got: raw.len() })
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; DIGEST_SIZE] {
        self.0
    }

    /// Lower-case `0x`-prefixed hex rendering.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

/// Reasons a textual digest failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DigestParseError {
    #[error("digest is not valid hex")]
    InvalidHex,
    #[error("digest must be {DIGEST_SIZE} bytes, got {got}")]
    InvalidWidth { got: usize },
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest(0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = DigestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Digest::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
