use super::digest::Digest;
use super::traits::MerkleHasher;

/// BLAKE3 in its default 256-bit hashing mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3;

impl MerkleHasher for Blake3 {
    fn hash(data: &[u8]) -> Digest {
        Digest::new(*::blake3::hash(data).as_bytes())
    }
}
