#![cfg(feature = "parallel")]


use _fixtures::{airdrop_schema, synthetic};
use merkle_airdrop::utils::set_parallelism;
use merkle_airdrop::{HashAlgorithm, MerkleTree, TreeConfig};

#[test]
fn merkle_parallel_matches_sequential() {
    let records = synthetic(3_000);
    let schema = airdrop_schema();
    for hash in [HashAlgorithm::Keccak256, HashAlgorithm::Blake3] {
        let config = TreeConfig::builder()
            .hash(hash)
            .parallel_min_leaves(64)
            .build()
            .expect("config");
        let sequential = {
            let _guard = set_parallelism(false);
            MerkleTree::build_with(&records, &schema, &config).expect("sequential tree")
        };
        let parallel = MerkleTree::build_with(&records, &schema, &config).expect("parallel tree");
        assert_eq!(sequential, parallel);
        assert_eq!(
            sequential.prove_many(&[0, 1_499, 2_999]).unwrap(),
            parallel.prove_many(&[0, 1_499, 2_999]).unwrap()
        );
    }
}

#[test]
fn parallel_encoding_errors_propagate() {
    let mut records = synthetic(2_048);
    records[1_000] = merkle_airdrop::record!["not an address", 0u8, 0u8];
    let config = TreeConfig::builder()
        .parallel_min_leaves(2)
        .build()
        .expect("config");
    assert!(MerkleTree::build_with(&records, &airdrop_schema(), &config).is_err());
}
