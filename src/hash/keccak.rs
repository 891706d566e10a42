use super::digest::Digest;
use super::traits::MerkleHasher;

/// Keccak-256 as used by the EVM; leaves are byte-compatible with
/// `keccak256(bytes.concat(keccak256(abi.encode(...))))` on-chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256;

impl MerkleHasher for Keccak256 {
    fn hash(data: &[u8]) -> Digest {
        Digest::new(alloy_primitives::keccak256(data).0)
    }
}
