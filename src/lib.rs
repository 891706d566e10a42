//! Canonical Merkle commitments for airdrop and allowlist distributions.
//!
//! A distributor commits once to an ordered set of typed records and
//! publishes the root. Each recipient later proves their own entry, or a
//! batch of entries, against that root without learning anything about the
//! rest of the set.
//!
//! ```
//! use merkle_airdrop::{record, verify, MerkleTree, Schema};
//!
//! let schema = Schema::parse(&["address", "uint256"]).unwrap();
//! let records = vec![
//!     record!["0x1111111111111111111111111111111111111111", "5000000000000000000"],
//!     record!["0x2222222222222222222222222222222222222222", "2500000000000000000"],
//! ];
//! let tree = MerkleTree::build(&records, &schema).unwrap();
//! let proof = tree.prove_one(1).unwrap();
//! assert!(verify(&tree.root(), &records[1], &schema, &proof).unwrap());
//! ```
//!
//! Tree construction can be spread over rayon worker threads with the
//! `parallel` feature; results are identical either way.

pub mod config;
pub mod encoding;
pub mod hash;
pub mod merkle;
pub mod ser;
pub mod utils;

pub use config::{ConfigError, TreeConfig, TreeConfigBuilder};
pub use encoding::{encode, EncodingError, FieldType, FieldValue, Record, Schema};
pub use hash::{Digest, HashAlgorithm, MerkleHasher};
pub use merkle::{
    verify, verify_many, MerkleError, MerkleResult, MerkleTree, MultiProof, Proof, TreeDocument,
    Verifier,
};
