
use _fixtures::{airdrop_schema, build, entry, scenario, synthetic};
use merkle_airdrop::merkle::{decode_multi_proof, decode_proof, encode_multi_proof, encode_proof};
use merkle_airdrop::{
    record, verify, verify_many, HashAlgorithm, MerkleTree, Record, TreeConfig, Verifier,
};
use proptest::prelude::*;

fn config(hash: HashAlgorithm, sort_leaves: bool) -> TreeConfig {
    TreeConfig::builder()
        .hash(hash)
        .sort_leaves(sort_leaves)
        .build()
        .expect("config")
}

fn hash_strategy() -> impl Strategy<Value = HashAlgorithm> {
    prop_oneof![
        Just(HashAlgorithm::Keccak256),
        Just(HashAlgorithm::Blake2s256),
        Just(HashAlgorithm::Blake3),
    ]
}

#[test]
fn every_index_roundtrips_across_sizes() {
    let schema = airdrop_schema();
    for count in 1..=33 {
        let records = synthetic(count);
        let tree = build(&records);
        let expected_height = (count as f64).log2().ceil() as usize;
        assert_eq!(tree.height(), expected_height, "height for {count} leaves");
        for (index, record) in records.iter().enumerate() {
            let proof = tree.prove_one(index).unwrap();
            assert_eq!(proof.len(), expected_height);
            assert!(verify(&tree.root(), record, &schema, &proof).unwrap());
        }
    }
}

#[test]
fn mutating_any_field_breaks_the_proof() {
    let schema = airdrop_schema();
    let records = scenario(8);
    let tree = build(&records);
    let proof = tree.prove_one(5).unwrap();
    let mutations = [entry(7, 5, 145), entry(6, 4, 145), entry(6, 5, 146)];
    for mutated in &mutations {
        assert!(!verify(&tree.root(), mutated, &schema, &proof).unwrap());
    }
    // Another member's record does not verify with this proof either.
    assert!(!verify(&tree.root(), &records[4], &schema, &proof).unwrap());
}

#[test]
fn reordering_changes_the_root() {
    let records = scenario(4);
    let mut swapped = records.clone();
    swapped.swap(0, 3);
    assert_ne!(build(&records).root(), build(&swapped).root());
}

#[test]
fn equivalent_representations_share_a_leaf() {
    let tree = build(&scenario(4));
    let spelled_out = record![
        "0x0000000000000000000000000000000000000003",
        "2",
        "0x28"
    ];
    assert_eq!(tree.find_index(&spelled_out).unwrap(), Some(2));
    assert_eq!(tree.find_index(&entry(3, 2, 41)).unwrap(), None);
}

#[test]
fn json_input_rows_build_the_same_tree() {
    let rows = serde_json::json!([
        ["0x0000000000000000000000000000000000000001", 0, 10],
        ["0x0000000000000000000000000000000000000002", 1, "100"],
        ["0x0000000000000000000000000000000000000003", "0x2", 40],
        ["0x0000000000000000000000000000000000000004", 3, 50]
    ]);
    let records = rows
        .as_array()
        .unwrap()
        .iter()
        .map(Record::from_json)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(build(&records).root(), build(&scenario(4)).root());
}

#[test]
fn multi_proofs_verify_with_records() {
    let schema = airdrop_schema();
    let records = scenario(8);
    let tree = build(&records);
    let proof = tree.prove_many(&[7, 2, 3]).unwrap();
    let selected: Vec<Record> = proof
        .indices()
        .iter()
        .map(|&index| records[index].clone())
        .collect();
    assert!(verify_many(&tree.root(), &selected, &schema, &proof).unwrap());

    let mut tampered = selected.clone();
    tampered[1] = entry(4, 3, 51);
    assert!(!verify_many(&tree.root(), &tampered, &schema, &proof).unwrap());
}

#[test]
fn document_roundtrip_preserves_proofs() {
    let records = synthetic(13);
    let tree = build(&records);
    let json = merkle_airdrop::merkle::dump_json(&tree).unwrap();
    let loaded = merkle_airdrop::merkle::load_json(&json).unwrap();
    assert_eq!(loaded.root(), tree.root());
    for index in 0..records.len() {
        assert_eq!(loaded.prove_one(index).unwrap(), tree.prove_one(index).unwrap());
    }
    assert_eq!(
        loaded.prove_many(&[0, 5, 12]).unwrap(),
        tree.prove_many(&[0, 5, 12]).unwrap()
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn single_proofs_roundtrip(
        count in 1usize..40,
        pick in any::<prop::sample::Index>(),
        hash in hash_strategy(),
        sort_leaves in any::<bool>(),
    ) {
        let schema = airdrop_schema();
        let records = synthetic(count);
        let tree = MerkleTree::build_with(&records, &schema, &config(hash, sort_leaves)).unwrap();
        let index = pick.index(count);
        let proof = tree.prove_one(index).unwrap();
        let decoded = decode_proof(&encode_proof(&proof).unwrap()).unwrap();
        prop_assert_eq!(&decoded, &proof);
        let verifier = Verifier::new(hash);
        prop_assert!(verifier.verify(&tree.root(), &records[index], &schema, &decoded).unwrap());
    }

    #[test]
    fn multi_proofs_roundtrip(
        count in 1usize..40,
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..12),
        hash in hash_strategy(),
        sort_leaves in any::<bool>(),
    ) {
        let schema = airdrop_schema();
        let records = synthetic(count);
        let tree = MerkleTree::build_with(&records, &schema, &config(hash, sort_leaves)).unwrap();
        let mut indices: Vec<usize> = picks.iter().map(|pick| pick.index(count)).collect();
        indices.sort_unstable();
        indices.dedup();

        let proof = tree.prove_many(&indices).unwrap();
        prop_assert_eq!(
            proof.proof().len() + proof.indices().len(),
            proof.flags().len() + 1
        );
        let decoded = decode_multi_proof(&encode_multi_proof(&proof).unwrap()).unwrap();
        prop_assert_eq!(&decoded, &proof);

        let selected: Vec<Record> = decoded
            .indices()
            .iter()
            .map(|&index| records[index].clone())
            .collect();
        let verifier = Verifier::new(hash);
        prop_assert!(verifier.verify_many(&tree.root(), &selected, &schema, &decoded).unwrap());
    }
}
