use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::hash::Digest;

use super::errors::{MerkleError, MerkleResult};
use super::tree::MerkleTree;

/// Combined inclusion proof for several records.
///
/// `indices` lists the proven record indices in leaf order; the verifier
/// expects the records in that order. Each flag describes one combination
/// step, breadth first and bottom up: `true` pairs two already known digests,
/// `false` pairs a known digest with the next entry of `proof`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiProof {
    indices: Vec<usize>,
    proof: Vec<Digest>,
    flags: Vec<bool>,
}

impl MultiProof {
    pub fn new(indices: Vec<usize>, proof: Vec<Digest>, flags: Vec<bool>) -> Self {
        Self {
            indices,
            proof,
            flags,
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn proof(&self) -> &[Digest] {
        &self.proof
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }
}

impl MerkleTree {
    /// Builds a multi-proof for the records at `indices`.
    ///
    /// Indices may be given in any order. Siblings that are themselves being
    /// proven, or that are computed from proven leaves, are never included.
    pub fn prove_many(&self, indices: &[usize]) -> MerkleResult<MultiProof> {
        if indices.is_empty() {
            return Err(MerkleError::NoIndices);
        }
        let mut targets = Vec::with_capacity(indices.len());
        for &index in indices {
            let position = self
                .leaf_position(index)
                .ok_or_else(|| self.out_of_range(index))?;
            targets.push((position, index));
        }
        targets.sort_unstable();
        if let Some(window) = targets.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(MerkleError::DuplicateIndex { index: window[1].1 });
        }

        let mut known: Vec<usize> = targets.iter().map(|&(position, _)| position).collect();
        let mut proof = Vec::new();
        let mut flags = Vec::new();
        for layer in self.layers().iter().take(self.height()) {
            let mut parents = Vec::with_capacity(known.len());
            let mut cursor = 0;
            while let Some(&position) = known.get(cursor) {
                let sibling = position ^ 1;
                if known.get(cursor + 1) == Some(&sibling) {
                    flags.push(true);
                    cursor += 2;
                } else {
                    flags.push(false);
                    proof.push(*layer.get(sibling).unwrap_or(&layer[position]));
                    cursor += 1;
                }
                parents.push(position / 2);
            }
            known = parents;
        }

        debug!(
            leaves = targets.len(),
            proof = proof.len(),
            flags = flags.len(),
            "generated multi-proof"
        );
        Ok(MultiProof {
            indices: targets.into_iter().map(|(_, index)| index).collect(),
            proof,
            flags,
        })
    }
}
