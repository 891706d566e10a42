use tracing::debug;

use crate::encoding::{encode, Record, Schema};
use crate::hash::{Digest, HashAlgorithm};

use super::errors::{MerkleError, MerkleResult};
use super::multiproof::MultiProof;
use super::proof::Proof;

/// Longest sibling path a verifier accepts.
pub const MAX_TREE_DEPTH: usize = 64;

/// Stateless proof checker bound to a hash algorithm.
///
/// Needs only the published root. A proof that does not reach the root is
/// reported as `Ok(false)`; errors are reserved for inputs that cannot be
/// evaluated at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verifier {
    hash: HashAlgorithm,
}

impl Verifier {
    pub fn new(hash: HashAlgorithm) -> Self {
        Self { hash }
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash
    }

    /// Encodes `record` and applies the leaf hash.
    pub fn leaf_digest(&self, record: &Record, schema: &Schema) -> MerkleResult<Digest> {
        Ok(self.hash.hash_leaf(&encode(record, schema)?))
    }

    pub fn verify(
        &self,
        root: &Digest,
        record: &Record,
        schema: &Schema,
        proof: &Proof,
    ) -> MerkleResult<bool> {
        let leaf = self.leaf_digest(record, schema)?;
        self.verify_leaf(root, &leaf, proof)
    }

    pub fn verify_leaf(&self, root: &Digest, leaf: &Digest, proof: &Proof) -> MerkleResult<bool> {
        let computed = self.process_proof(leaf, proof)?;
        if computed != *root {
            debug!(index = proof.leaf_index(), %computed, "proof does not reach root");
        }
        Ok(computed == *root)
    }

    /// Folds `leaf` with every sibling and returns the implied root.
    pub fn process_proof(&self, leaf: &Digest, proof: &Proof) -> MerkleResult<Digest> {
        if proof.len() > MAX_TREE_DEPTH {
            return Err(MerkleError::malformed(format!(
                "{} siblings exceed the maximum depth of {MAX_TREE_DEPTH}",
                proof.len()
            )));
        }
        Ok(proof
            .siblings()
            .iter()
            .fold(*leaf, |acc, sibling| self.hash.hash_node(&acc, sibling)))
    }

    /// Verifies `records`, given in `proof.indices()` order.
    pub fn verify_many(
        &self,
        root: &Digest,
        records: &[Record],
        schema: &Schema,
        proof: &MultiProof,
    ) -> MerkleResult<bool> {
        let leaves = records
            .iter()
            .map(|record| self.leaf_digest(record, schema))
            .collect::<MerkleResult<Vec<_>>>()?;
        self.verify_many_leaves(root, &leaves, proof)
    }

    pub fn verify_many_leaves(
        &self,
        root: &Digest,
        leaves: &[Digest],
        proof: &MultiProof,
    ) -> MerkleResult<bool> {
        let computed = self.process_multi_proof(leaves, proof)?;
        if computed != *root {
            debug!(leaves = leaves.len(), %computed, "multi-proof does not reach root");
        }
        Ok(computed == *root)
    }

    /// Replays the flag sequence over a FIFO of known digests: the leaves
    /// first, then each digest computed along the way.
    pub fn process_multi_proof(
        &self,
        leaves: &[Digest],
        proof: &MultiProof,
    ) -> MerkleResult<Digest> {
        let siblings = proof.proof();
        let flags = proof.flags();
        if leaves.is_empty() {
            return Err(MerkleError::malformed("multi-proof covers no leaves"));
        }
        if leaves.len() != proof.indices().len() {
            return Err(MerkleError::malformed(format!(
                "{} leaves supplied for {} indices",
                leaves.len(),
                proof.indices().len()
            )));
        }
        if leaves.len() + siblings.len() != flags.len() + 1 {
            return Err(MerkleError::malformed(format!(
                "{} leaves and {} proof digests cannot be combined in {} steps",
                leaves.len(),
                siblings.len(),
                flags.len()
            )));
        }

        let mut queue = KnownQueue::new(leaves, flags.len());
        let mut remaining = siblings.iter();
        for &flag in flags {
            let a = queue.pop()?;
            let b = if flag {
                queue.pop()?
            } else {
                *remaining
                    .next()
                    .ok_or_else(|| MerkleError::malformed("proof digests exhausted"))?
            };
            queue.push(self.hash.hash_node(&a, &b));
        }
        if remaining.next().is_some() {
            return Err(MerkleError::malformed("unused proof digests"));
        }
        Ok(queue.last().unwrap_or(leaves[0]))
    }
}

/// Leaves followed by computed digests, consumed front to back.
struct KnownQueue<'a> {
    leaves: &'a [Digest],
    hashes: Vec<Digest>,
    leaf_pos: usize,
    hash_pos: usize,
}

impl<'a> KnownQueue<'a> {
    fn new(leaves: &'a [Digest], steps: usize) -> Self {
        Self {
            leaves,
            hashes: Vec::with_capacity(steps),
            leaf_pos: 0,
            hash_pos: 0,
        }
    }

    fn pop(&mut self) -> MerkleResult<Digest> {
        if let Some(leaf) = self.leaves.get(self.leaf_pos) {
            self.leaf_pos += 1;
            return Ok(*leaf);
        }
        let digest = self.hashes.get(self.hash_pos).copied().ok_or_else(|| {
            MerkleError::malformed("flags consume more digests than are known")
        })?;
        self.hash_pos += 1;
        Ok(digest)
    }

    fn push(&mut self, digest: Digest) {
        self.hashes.push(digest);
    }

    fn last(&self) -> Option<Digest> {
        self.hashes.last().copied()
    }
}

/// Checks a single proof with the default Keccak-256 verifier.
pub fn verify(
    root: &Digest,
    record: &Record,
    schema: &Schema,
    proof: &Proof,
) -> MerkleResult<bool> {
    Verifier::default().verify(root, record, schema, proof)
}

/// Checks a multi-proof with the default Keccak-256 verifier.
pub fn verify_many(
    root: &Digest,
    records: &[Record],
    schema: &Schema,
    proof: &MultiProof,
) -> MerkleResult<bool> {
    Verifier::default().verify_many(root, records, schema, proof)
}
