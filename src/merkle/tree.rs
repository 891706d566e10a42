use tracing::{debug, instrument, trace, warn};

use crate::config::{TreeConfig, DEFAULT_PARALLEL_MIN_LEAVES};
use crate::encoding::{encode, Record, Schema};
use crate::hash::{Digest, HashAlgorithm};

use super::errors::{MerkleError, MerkleResult};

/// Binary Merkle tree stored as flat layers.
///
/// `layers[0]` holds the leaf digests and the last layer holds only the root.
/// Record indices (input order) map onto leaf positions through
/// `leaf_positions`; the mapping is the identity unless the tree was built
/// with `sort_leaves`. The tree keeps no record data, only digests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    hash: HashAlgorithm,
    schema: Schema,
    layers: Vec<Vec<Digest>>,
    leaf_positions: Vec<usize>,
    root: Digest,
}

impl MerkleTree {
    /// Builds a Keccak-256 tree over `records` with default settings.
    pub fn build(records: &[Record], schema: &Schema) -> MerkleResult<Self> {
        Self::build_with(records, schema, &TreeConfig::default())
    }

    /// Encodes, hashes and commits to `records` in input order.
    #[instrument(skip_all, fields(records = records.len(), hash = %config.hash()))]
    pub fn build_with(
        records: &[Record],
        schema: &Schema,
        config: &TreeConfig,
    ) -> MerkleResult<Self> {
        check_leaf_count(records.len(), config)?;
        let leaves = hash_records(records, schema, config)?;
        let tree = Self::from_leaf_digests(leaves, schema.clone(), config)?;
        debug!(root = %tree.root, height = tree.height(), "built merkle tree");
        Ok(tree)
    }

    /// Builds a tree from leaf digests that are already hashed, given in
    /// record order.
    pub fn from_leaf_digests(
        leaves: Vec<Digest>,
        schema: Schema,
        config: &TreeConfig,
    ) -> MerkleResult<Self> {
        check_leaf_count(leaves.len(), config)?;
        let (leaf_layer, leaf_positions) = if config.sort_leaves() {
            sort_leaves(leaves)
        } else {
            let positions = (0..leaves.len()).collect();
            (leaves, positions)
        };
        let layers = build_layers(config.hash(), leaf_layer, config.parallel_min_leaves());
        let root = root_of(&layers).ok_or(MerkleError::EmptyInput)?;
        Ok(Self {
            hash: config.hash(),
            schema,
            layers,
            leaf_positions,
            root,
        })
    }

    /// Reassembles a tree from stored layers and validates it.
    pub(crate) fn from_parts(
        hash: HashAlgorithm,
        schema: Schema,
        layers: Vec<Vec<Digest>>,
        leaf_positions: Vec<usize>,
    ) -> MerkleResult<Self> {
        let root = root_of(&layers)
            .ok_or_else(|| MerkleError::invalid_document("tree has no layers"))?;
        let tree = Self {
            hash,
            schema,
            layers,
            leaf_positions,
            root,
        };
        tree.validate()?;
        Ok(tree)
    }

    /// Recomputes every internal digest from layer 0 and checks the index
    /// mapping is a permutation of the leaf positions.
    pub fn validate(&self) -> MerkleResult<()> {
        let leaves = match self.layers.first() {
            Some(leaves) if !leaves.is_empty() => leaves,
            _ => return Err(MerkleError::invalid_document("tree has no leaves")),
        };
        if self.leaf_positions.len() != leaves.len() {
            return Err(MerkleError::invalid_document(format!(
                "{} leaf positions for {} leaves",
                self.leaf_positions.len(),
                leaves.len()
            )));
        }
        let mut seen = vec![false; leaves.len()];
        for &position in &self.leaf_positions {
            match seen.get_mut(position) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(MerkleError::invalid_document(
                        "leaf positions are not a permutation",
                    ))
                }
            }
        }

        let expected = build_layers(self.hash, leaves.clone(), DEFAULT_PARALLEL_MIN_LEAVES);
        if expected.len() != self.layers.len() {
            return Err(MerkleError::invalid_document(format!(
                "expected {} layers for {} leaves, found {}",
                expected.len(),
                leaves.len(),
                self.layers.len()
            )));
        }
        if let Some(depth) = expected.iter().zip(&self.layers).position(|(a, b)| a != b) {
            warn!(depth, "stored layer does not match its children");
            return Err(MerkleError::invalid_document(format!(
                "layer {depth} does not match its children"
            )));
        }
        if root_of(&expected) != Some(self.root) {
            return Err(MerkleError::invalid_document("root does not match layers"));
        }
        Ok(())
    }

    pub fn root(&self) -> Digest {
        self.root
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash
    }

    /// Schema every leaf was encoded under.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_positions.len()
    }

    /// Number of layers above the leaves; equals the length of every proof.
    pub fn height(&self) -> usize {
        self.layers.len() - 1
    }

    /// All layers, leaves first.
    pub fn layers(&self) -> &[Vec<Digest>] {
        &self.layers
    }

    /// Record index → leaf position mapping.
    pub fn leaf_positions(&self) -> &[usize] {
        &self.leaf_positions
    }

    /// Position in layer 0 of the record at `index`.
    pub fn leaf_position(&self, index: usize) -> Option<usize> {
        self.leaf_positions.get(index).copied()
    }

    /// Leaf digest of the record at `index`.
    pub fn leaf_digest(&self, index: usize) -> Option<Digest> {
        let position = self.leaf_position(index)?;
        self.layers[0].get(position).copied()
    }

    /// Returns the lowest record index whose leaf matches `record`.
    pub fn find_index(&self, record: &Record) -> MerkleResult<Option<usize>> {
        let digest = self.hash.hash_leaf(&encode(record, &self.schema)?);
        Ok((0..self.leaf_count()).find(|&index| self.leaf_digest(index) == Some(digest)))
    }

    pub(crate) fn out_of_range(&self, index: usize) -> MerkleError {
        MerkleError::IndexOutOfRange {
            index,
            leaf_count: self.leaf_count(),
        }
    }
}

fn check_leaf_count(count: usize, config: &TreeConfig) -> MerkleResult<()> {
    if count == 0 {
        return Err(MerkleError::EmptyInput);
    }
    let count = count as u64;
    if count > config.max_leaves() {
        return Err(MerkleError::TooManyLeaves {
            max: config.max_leaves(),
            got: count,
        });
    }
    Ok(())
}

fn root_of(layers: &[Vec<Digest>]) -> Option<Digest> {
    layers.last().and_then(|layer| layer.first()).copied()
}

fn hash_records(
    records: &[Record],
    schema: &Schema,
    config: &TreeConfig,
) -> MerkleResult<Vec<Digest>> {
    let hash = config.hash();
    let leaf = |record: &Record| -> MerkleResult<Digest> {
        Ok(hash.hash_leaf(&encode(record, schema)?))
    };
    #[cfg(feature = "parallel")]
    {
        if crate::utils::parallelism_enabled() && records.len() >= config.parallel_min_leaves() {
            use rayon::prelude::*;
            let chunk = crate::utils::preferred_chunk_size(records.len());
            return records.par_iter().with_min_len(chunk).map(&leaf).collect();
        }
    }
    records.iter().map(&leaf).collect()
}

/// Sorts leaves ascending by digest. Ties keep input order.
fn sort_leaves(leaves: Vec<Digest>) -> (Vec<Digest>, Vec<usize>) {
    let mut order: Vec<usize> = (0..leaves.len()).collect();
    order.sort_by_key(|&index| leaves[index]);
    let mut positions = vec![0; leaves.len()];
    for (position, &index) in order.iter().enumerate() {
        positions[index] = position;
    }
    let sorted = order.iter().map(|&index| leaves[index]).collect();
    (sorted, positions)
}

/// Hashes layer after layer until a single digest remains.
fn build_layers(
    hash: HashAlgorithm,
    leaves: Vec<Digest>,
    parallel_min_leaves: usize,
) -> Vec<Vec<Digest>> {
    let mut layers = vec![leaves];
    while let Some(current) = layers.last().filter(|layer| layer.len() > 1) {
        let next = hash_layer(hash, current, parallel_min_leaves);
        trace!(depth = layers.len(), width = next.len(), "hashed layer");
        layers.push(next);
    }
    layers
}

/// Pairs `(2k, 2k + 1)`; an odd trailing element is paired with itself.
fn hash_layer(hash: HashAlgorithm, layer: &[Digest], parallel_min_leaves: usize) -> Vec<Digest> {
    let parent = |pair: &[Digest]| {
        let left = &pair[0];
        let right = pair.get(1).unwrap_or(left);
        hash.hash_node(left, right)
    };
    #[cfg(feature = "parallel")]
    {
        if crate::utils::parallelism_enabled() && layer.len() >= parallel_min_leaves {
            use rayon::prelude::*;
            let chunk = crate::utils::preferred_chunk_size(layer.len() / 2);
            return layer.par_chunks(2).with_min_len(chunk).map(&parent).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel_min_leaves;
    layer.chunks(2).map(parent).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::DIGEST_SIZE;

    fn digests(count: u8) -> Vec<Digest> {
        (0..count).map(|i| Digest::new([i; DIGEST_SIZE])).collect()
    }

    fn schema() -> Schema {
        Schema::parse(&["uint256"]).unwrap()
    }

    #[test]
    fn layer_widths_halve_with_duplication() {
        let tree =
            MerkleTree::from_leaf_digests(digests(5), schema(), &TreeConfig::default()).unwrap();
        let widths: Vec<usize> = tree.layers().iter().map(Vec::len).collect();
        assert_eq!(widths, vec![5, 3, 2, 1]);
        assert_eq!(tree.height(), 3);

        let hash = HashAlgorithm::Keccak256;
        let lone = tree.layers()[0][4];
        assert_eq!(tree.layers()[1][2], hash.hash_node(&lone, &lone));
    }

    #[test]
    fn single_leaf_is_its_own_root() {
        let tree =
            MerkleTree::from_leaf_digests(digests(1), schema(), &TreeConfig::default()).unwrap();
        assert_eq!(tree.root(), Digest::new([0; DIGEST_SIZE]));
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = MerkleTree::build(&[], &schema()).unwrap_err();
        assert!(matches!(err, MerkleError::EmptyInput));
    }

    #[test]
    fn max_leaves_is_enforced() {
        let config = TreeConfig::builder().max_leaves(2).build().unwrap();
        let err = MerkleTree::from_leaf_digests(digests(3), schema(), &config).unwrap_err();
        assert!(matches!(err, MerkleError::TooManyLeaves { max: 2, got: 3 }));
    }

    #[test]
    fn sorted_leaves_keep_index_mapping() {
        let mut leaves = digests(4);
        leaves.reverse();
        let config = TreeConfig::builder().sort_leaves(true).build().unwrap();
        let tree = MerkleTree::from_leaf_digests(leaves.clone(), schema(), &config).unwrap();
        assert_eq!(tree.layers()[0], digests(4));
        assert_eq!(tree.leaf_positions(), &[3, 2, 1, 0]);
        for (index, leaf) in leaves.iter().enumerate() {
            assert_eq!(tree.leaf_digest(index), Some(*leaf));
        }
    }

    #[test]
    fn from_parts_detects_tampered_layer() {
        let tree =
            MerkleTree::from_leaf_digests(digests(4), schema(), &TreeConfig::default()).unwrap();
        let mut layers = tree.layers().to_vec();
        layers[1][0] = Digest::new([0xee; DIGEST_SIZE]);
        let err = MerkleTree::from_parts(
            tree.hash_algorithm(),
            schema(),
            layers,
            tree.leaf_positions().to_vec(),
        )
        .unwrap_err();
        assert!(matches!(err, MerkleError::InvalidDocument { .. }));
    }

    #[test]
    fn from_parts_rejects_non_permutation() {
        let tree =
            MerkleTree::from_leaf_digests(digests(3), schema(), &TreeConfig::default()).unwrap();
        let err = MerkleTree::from_parts(
            tree.hash_algorithm(),
            schema(),
            tree.layers().to_vec(),
            vec![0, 0, 2],
        )
        .unwrap_err();
        assert!(matches!(err, MerkleError::InvalidDocument { .. }));
    }
}
