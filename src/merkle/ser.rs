//! Canonical byte layout for proofs.
//!
//! ```text
//! Proof      = version:u16 | leaf_index:u64 | siblings:vec<digest>
//! MultiProof = version:u16 | indices:vec<u64> | proof:vec<digest> | flags:vec<bool>
//! ```
//!
//! Integers are little endian, vectors carry a `u32` item count and digests
//! are 32 raw bytes.

use crate::ser::{
    ensure_consumed, read_bool, read_digest, read_u16, read_u64, read_vec, write_bool,
    write_digest, write_u16, write_u64, write_vec, ByteReader, SerError, SerKind, SerResult,
};

use super::errors::{MerkleError, MerkleResult};
use super::multiproof::MultiProof;
use super::proof::Proof;
use super::verify::MAX_TREE_DEPTH;

/// Layout version written ahead of every encoded proof.
pub const PROOF_CODEC_VERSION: u16 = 1;

fn write_index(out: &mut Vec<u8>, index: usize) {
    write_u64(out, index as u64);
}

fn read_index(
    cursor: &mut ByteReader<'_>,
    kind: SerKind,
    field: &'static str,
) -> SerResult<usize> {
    let raw = read_u64(cursor, kind, field)?;
    usize::try_from(raw).map_err(|_| SerError::invalid_value(kind, field))
}

fn read_version(cursor: &mut ByteReader<'_>, kind: SerKind) -> SerResult<()> {
    match read_u16(cursor, kind, "version")? {
        PROOF_CODEC_VERSION => Ok(()),
        _ => Err(SerError::invalid_value(kind, "version")),
    }
}

/// Serialises a [`Proof`].
pub fn encode_proof(proof: &Proof) -> MerkleResult<Vec<u8>> {
    let kind = SerKind::Proof;
    let mut out = Vec::with_capacity(2 + 8 + 4 + 32 * proof.len());
    write_u16(&mut out, PROOF_CODEC_VERSION);
    write_index(&mut out, proof.leaf_index());
    write_vec(&mut out, proof.siblings(), kind, "siblings", |out, digest| {
        write_digest(out, digest);
        Ok(())
    })?;
    Ok(out)
}

/// Deserialises a [`Proof`], rejecting truncated input, trailing bytes and
/// paths longer than [`MAX_TREE_DEPTH`].
pub fn decode_proof(bytes: &[u8]) -> MerkleResult<Proof> {
    let kind = SerKind::Proof;
    let mut cursor = ByteReader::new(bytes);
    read_version(&mut cursor, kind)?;
    let leaf_index = read_index(&mut cursor, kind, "leaf_index")?;
    let siblings = read_vec(&mut cursor, kind, "siblings", |cursor, _| {
        read_digest(cursor, kind, "sibling")
    })?;
    ensure_consumed(&cursor, kind)?;
    if siblings.len() > MAX_TREE_DEPTH {
        return Err(MerkleError::malformed(format!(
            "{} siblings exceed the maximum depth of {MAX_TREE_DEPTH}",
            siblings.len()
        )));
    }
    Ok(Proof::new(leaf_index, siblings))
}

/// Serialises a [`MultiProof`].
pub fn encode_multi_proof(proof: &MultiProof) -> MerkleResult<Vec<u8>> {
    let kind = SerKind::MultiProof;
    let mut out = Vec::new();
    write_u16(&mut out, PROOF_CODEC_VERSION);
    write_vec(&mut out, proof.indices(), kind, "indices", |out, &index| {
        write_index(out, index);
        Ok(())
    })?;
    write_vec(&mut out, proof.proof(), kind, "proof", |out, digest| {
        write_digest(out, digest);
        Ok(())
    })?;
    write_vec(&mut out, proof.flags(), kind, "flags", |out, &flag| {
        write_bool(out, flag);
        Ok(())
    })?;
    Ok(out)
}

/// Deserialises a [`MultiProof`]. Only the layout is checked here; the
/// verifier enforces the relation between leaves, digests and flags.
pub fn decode_multi_proof(bytes: &[u8]) -> MerkleResult<MultiProof> {
    let kind = SerKind::MultiProof;
    let mut cursor = ByteReader::new(bytes);
    read_version(&mut cursor, kind)?;
    let indices = read_vec(&mut cursor, kind, "indices", |cursor, _| {
        read_index(cursor, kind, "index")
    })?;
    let proof = read_vec(&mut cursor, kind, "proof", |cursor, _| {
        read_digest(cursor, kind, "proof")
    })?;
    let flags = read_vec(&mut cursor, kind, "flags", |cursor, _| {
        read_bool(cursor, kind, "flag")
    })?;
    ensure_consumed(&cursor, kind)?;
    Ok(MultiProof::new(indices, proof, flags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{Digest, DIGEST_SIZE};

    fn sample_proof() -> Proof {
        Proof::new(
            5,
            vec![
                Digest::new([0x11; DIGEST_SIZE]),
                Digest::new([0x22; DIGEST_SIZE]),
            ],
        )
    }

    #[test]
    fn proof_layout_is_stable() {
        let bytes = encode_proof(&sample_proof()).unwrap();
        assert_eq!(bytes.len(), 2 + 8 + 4 + 2 * DIGEST_SIZE);
        assert_eq!(&bytes[..2], &[1, 0]);
        assert_eq!(&bytes[2..10], &[5, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[10..14], &[2, 0, 0, 0]);
        assert_eq!(decode_proof(&bytes).unwrap(), sample_proof());
    }

    #[test]
    fn truncated_and_trailing_input_is_malformed() {
        let bytes = encode_proof(&sample_proof()).unwrap();
        let truncated = decode_proof(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(truncated, MerkleError::MalformedProof { .. }));

        let mut padded = bytes.clone();
        padded.push(0);
        let trailing = decode_proof(&padded).unwrap_err();
        assert!(matches!(trailing, MerkleError::MalformedProof { .. }));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut bytes = encode_proof(&sample_proof()).unwrap();
        bytes[0] = 9;
        assert!(matches!(
            decode_proof(&bytes),
            Err(MerkleError::MalformedProof { .. })
        ));
    }

    #[test]
    fn invalid_flag_byte_is_rejected() {
        let proof = MultiProof::new(vec![0, 1], vec![], vec![true]);
        let mut bytes = encode_multi_proof(&proof).unwrap();
        assert_eq!(decode_multi_proof(&bytes).unwrap(), proof);
        let last = bytes.len() - 1;
        bytes[last] = 2;
        assert!(matches!(
            decode_multi_proof(&bytes),
            Err(MerkleError::MalformedProof { .. })
        ));
    }
}
