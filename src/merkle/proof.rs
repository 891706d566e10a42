use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::hash::Digest;

use super::errors::MerkleResult;
use super::tree::MerkleTree;

/// Inclusion proof for a single record.
///
/// `siblings` are ordered leaf level first. Folding the record's leaf digest
/// with each sibling via `hash_node` yields the root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    leaf_index: usize,
    siblings: Vec<Digest>,
}

impl Proof {
    pub fn new(leaf_index: usize, siblings: Vec<Digest>) -> Self {
        Self {
            leaf_index,
            siblings,
        }
    }

    /// Record index the proof was generated for. Informational only; sorted
    /// node hashing makes verification independent of it.
    pub fn leaf_index(&self) -> usize {
        self.leaf_index
    }

    pub fn siblings(&self) -> &[Digest] {
        &self.siblings
    }

    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    pub fn into_siblings(self) -> Vec<Digest> {
        self.siblings
    }
}

impl MerkleTree {
    /// Collects one sibling per layer below the root for the record at
    /// `index`. A lone trailing node is its own sibling.
    pub fn prove_one(&self, index: usize) -> MerkleResult<Proof> {
        let mut position = self
            .leaf_position(index)
            .ok_or_else(|| self.out_of_range(index))?;
        let mut siblings = Vec::with_capacity(self.height());
        for layer in self.layers().iter().take(self.height()) {
            let own = &layer[position];
            siblings.push(*layer.get(position ^ 1).unwrap_or(own));
            position /= 2;
        }
        trace!(index, siblings = siblings.len(), "generated proof");
        Ok(Proof::new(index, siblings))
    }
}
