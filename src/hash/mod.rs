//! Hash primitives shared by every Merkle component.
//!
//! * Leaves are double hashed: `H(H(encoded_record))`.
//! * Internal nodes hash the two child digests sorted ascending by bytes, so
//!   `hash_node(a, b) == hash_node(b, a)` and proofs carry no side bits.
//! * All backends produce 256-bit digests. [`HashAlgorithm`] selects the
//!   backend at runtime and is recorded in serialized tree documents.

mod blake2s;
mod blake3;
mod digest;
mod keccak;
mod traits;

pub use blake2s::Blake2s256;
pub use blake3::Blake3;
pub use digest::{Digest, DigestParseError, DIGEST_SIZE};
pub use keccak::Keccak256;
pub use traits::MerkleHasher;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Runtime selector for the hash backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// EVM Keccak-256. Default, matches Solidity verifier contracts.
    #[default]
    Keccak256,
    Blake2s256,
    Blake3,
}

impl HashAlgorithm {
    pub fn hash(self, data: &[u8]) -> Digest {
        match self {
            HashAlgorithm::Keccak256 => Keccak256::hash(data),
            HashAlgorithm::Blake2s256 => Blake2s256::hash(data),
            HashAlgorithm::Blake3 => Blake3::hash(data),
        }
    }

    /// Double-hashes an encoded record into a leaf digest.
    pub fn hash_leaf(self, encoded: &[u8]) -> Digest {
        match self {
            HashAlgorithm::Keccak256 => Keccak256::hash_leaf(encoded),
            HashAlgorithm::Blake2s256 => Blake2s256::hash_leaf(encoded),
            HashAlgorithm::Blake3 => Blake3::hash_leaf(encoded),
        }
    }

    /// Hashes a canonically ordered pair of child digests.
    pub fn hash_node(self, a: &Digest, b: &Digest) -> Digest {
        match self {
            HashAlgorithm::Keccak256 => Keccak256::hash_node(a, b),
            HashAlgorithm::Blake2s256 => Blake2s256::hash_node(a, b),
            HashAlgorithm::Blake3 => Blake3::hash_node(a, b),
        }
    }

    /// Canonical identifier used in documents and configuration.
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Keccak256 => "keccak256",
            HashAlgorithm::Blake2s256 => "blake2s256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown hash algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hash algorithm `{0}`")]
pub struct UnknownHashAlgorithm(pub String);

impl FromStr for HashAlgorithm {
    type Err = UnknownHashAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keccak256" => Ok(HashAlgorithm::Keccak256),
            "blake2s256" => Ok(HashAlgorithm::Blake2s256),
            "blake3" => Ok(HashAlgorithm::Blake3),
            other => Err(UnknownHashAlgorithm(other.to_owned())),
        }
    }
}
