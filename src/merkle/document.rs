use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::encoding::Schema;
use crate::hash::{Digest, HashAlgorithm};

use super::errors::{MerkleError, MerkleResult};
use super::tree::MerkleTree;

/// Format tag written into every document.
pub const DOCUMENT_FORMAT: &str = "merkle-airdrop-v1";

/// Self-describing snapshot of a tree.
///
/// Holds every digest needed to regenerate proofs but no record values, so
/// a distributor can publish it without revealing the committed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeDocument {
    pub format: String,
    pub hash: HashAlgorithm,
    pub leaf_encoding: Schema,
    pub root: Digest,
    pub leaf_count: usize,
    pub layers: Vec<Vec<Digest>>,
    pub leaf_positions: Vec<usize>,
}

/// Captures `tree` as a document.
pub fn dump(tree: &MerkleTree) -> TreeDocument {
    TreeDocument {
        format: DOCUMENT_FORMAT.to_owned(),
        hash: tree.hash_algorithm(),
        leaf_encoding: tree.schema().clone(),
        root: tree.root(),
        leaf_count: tree.leaf_count(),
        layers: tree.layers().to_vec(),
        leaf_positions: tree.leaf_positions().to_vec(),
    }
}

/// Rebuilds a tree from `document` after checking it end to end.
pub fn load(document: TreeDocument) -> MerkleResult<MerkleTree> {
    let result = load_unchecked_schema(document);
    if let Err(err) = &result {
        warn!(error = %err, "rejected tree document");
    }
    result
}

/// Like [`load`], but also requires the document to declare `expected` as
/// its leaf encoding.
pub fn load_with_schema(document: TreeDocument, expected: &Schema) -> MerkleResult<MerkleTree> {
    if document.leaf_encoding != *expected {
        warn!(
            expected = %expected,
            found = %document.leaf_encoding,
            "tree document schema mismatch"
        );
        return Err(MerkleError::SchemaMismatch {
            expected: expected.clone(),
            found: document.leaf_encoding,
        });
    }
    load(document)
}

/// Serialises `tree` as pretty-printed JSON.
pub fn dump_json(tree: &MerkleTree) -> MerkleResult<String> {
    Ok(serde_json::to_string_pretty(&dump(tree))?)
}

/// Parses and validates a JSON tree document.
pub fn load_json(text: &str) -> MerkleResult<MerkleTree> {
    let document: TreeDocument = serde_json::from_str(text)?;
    load(document)
}

fn load_unchecked_schema(document: TreeDocument) -> MerkleResult<MerkleTree> {
    if document.format != DOCUMENT_FORMAT {
        return Err(MerkleError::invalid_document(format!(
            "unsupported format `{}`",
            document.format
        )));
    }
    if document.leaf_count == 0 {
        return Err(MerkleError::invalid_document("document has no leaves"));
    }
    let stored_leaves = document.layers.first().map_or(0, Vec::len);
    if stored_leaves != document.leaf_count {
        return Err(MerkleError::invalid_document(format!(
            "leafCount is {} but layer 0 holds {stored_leaves} digests",
            document.leaf_count
        )));
    }

    let tree = MerkleTree::from_parts(
        document.hash,
        document.leaf_encoding,
        document.layers,
        document.leaf_positions,
    )?;
    if tree.root() != document.root {
        return Err(MerkleError::invalid_document(format!(
            "declared root {} does not match computed root {}",
            document.root,
            tree.root()
        )));
    }
    debug!(root = %tree.root(), leaves = tree.leaf_count(), "loaded tree document");
    Ok(tree)
}

impl MerkleTree {
    pub fn dump(&self) -> TreeDocument {
        dump(self)
    }

    pub fn load(document: TreeDocument) -> MerkleResult<Self> {
        load(document)
    }
}
