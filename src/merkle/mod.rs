//! Merkle commitment layer for typed records.
//!
//! The module fixes the following protocol knobs:
//!
//! * **Arity:** binary. A layer with an odd number of nodes pairs its last
//!   node with itself, so every single proof carries exactly
//!   [`MerkleTree::height`] siblings.
//! * **Leaf hash:** `H(H(encode(record)))`. Outer leaf preimages are 32 bytes
//!   and node preimages are 64 bytes, so a leaf can never pose as a node.
//! * **Node hash:** `H(min(a, b) || max(a, b))`. Proofs carry no direction
//!   bits.
//! * **Hash family:** selected through
//!   [`TreeConfig::hash`](crate::config::TreeConfig::hash) and shared by the
//!   builder, the prover and [`Verifier`].
//!
//! Multi-proofs follow the flag scheme used by EVM verifiers, so roots and
//! proofs produced here can be checked on chain.

mod document;
mod errors;
mod multiproof;
mod proof;
mod ser;
mod tree;
mod verify;

pub use document::{
    dump, dump_json, load, load_json, load_with_schema, TreeDocument, DOCUMENT_FORMAT,
};
pub use errors::{MerkleError, MerkleResult};
pub use multiproof::MultiProof;
pub use proof::Proof;
pub use ser::{
    decode_multi_proof, decode_proof, encode_multi_proof, encode_proof, PROOF_CODEC_VERSION,
};
pub use tree::MerkleTree;
pub use verify::{verify, verify_many, Verifier, MAX_TREE_DEPTH};
