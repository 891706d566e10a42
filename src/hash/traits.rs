use super::digest::{Digest, DIGEST_SIZE};

/// Hash abstraction used by the Merkle commitment layer.
///
/// Implementors only supply the raw 256-bit hash; leaf and node hashing are
/// fixed by the provided methods so every backend shares the same
/// domain-separation and pair-ordering rules.
pub trait MerkleHasher {
    /// Hashes an arbitrary byte string.
    fn hash(data: &[u8]) -> Digest;

    /// Hashes an encoded record into a leaf digest.
    ///
    /// The hash is applied twice. The outer preimage is always 32 bytes while
    /// an internal node preimage is always 64 bytes, so no leaf digest can be
    /// presented as the parent of two other digests.
    fn hash_leaf(encoded: &[u8]) -> Digest {
        let inner = Self::hash(encoded);
        Self::hash(inner.as_bytes())
    }

    /// Hashes two children in ascending byte order.
    fn hash_node(a: &Digest, b: &Digest) -> Digest {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let mut buffer = [0u8; 2 * DIGEST_SIZE];
        buffer[..DIGEST_SIZE].copy_from_slice(low.as_bytes());
        buffer[DIGEST_SIZE..].copy_from_slice(high.as_bytes());
        Self::hash(&buffer)
    }
}
