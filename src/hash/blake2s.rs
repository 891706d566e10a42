use blake2::{Blake2s256 as Blake2sCore, Digest as _};

use super::digest::Digest;
use super::traits::MerkleHasher;

/// BLAKE2s with a 256-bit output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake2s256;

impl MerkleHasher for Blake2s256 {
    fn hash(data: &[u8]) -> Digest {
        let mut state = Blake2sCore::new();
        state.update(data);
        Digest::new(state.finalize().into())
    }
}
