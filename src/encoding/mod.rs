//! Canonical record encoding.
//!
//! Records are encoded exactly like Solidity's `abi.encode(v1, …, vn)`: one
//! 32-byte big-endian head word per field, with `bytes` and `string` payloads
//! placed in the tail behind an offset word. Values are normalised before
//! encoding, so equal logical values always produce equal bytes regardless of
//! how the caller represented them.

mod abi;
mod error;
mod types;
mod value;

pub use error::EncodingError;
pub use types::{FieldType, Schema};
pub use value::{FieldValue, Record};

/// Encodes `record` under `schema`.
///
/// Fails when the field count differs from the schema or when any value is
/// not representable under its declared type; the error names the field.
pub fn encode(record: &Record, schema: &Schema) -> Result<Vec<u8>, EncodingError> {
    if record.len() != schema.len() {
        return Err(EncodingError::FieldCount {
            expected: schema.len(),
            got: record.len(),
        });
    }
    let tokens = record
        .fields()
        .iter()
        .zip(schema.fields())
        .enumerate()
        .map(|(index, (value, ty))| abi::tokenize(index, *ty, value))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(abi::encode_tokens(&tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    fn airdrop_schema() -> Schema {
        Schema::parse(&["address", "uint256", "uint256"]).unwrap()
    }

    #[test]
    fn encodes_airdrop_entry() {
        let entry = record!["0x0000000000000000000000000000000000000003", "2", "40"];
        let encoded = encode(&entry, &airdrop_schema()).unwrap();
        let expected = [
            format!("{:064x}", 3),
            format!("{:064x}", 2),
            format!("{:064x}", 40),
        ]
        .concat();
        assert_eq!(hex::encode(encoded), expected);
    }

    #[test]
    fn numeric_representations_normalise() {
        let schema = airdrop_schema();
        let address = "0x0000000000000000000000000000000000000003";
        let baseline = encode(&record![address, 2u64, 40u64], &schema).unwrap();
        for entry in [
            record![address, "2", "40"],
            record![address, "0x02", "0x28"],
            record![address, 2i32, 40u8],
            record!["0000000000000000000000000000000000000003", 2u128, "40"],
        ] {
            assert_eq!(encode(&entry, &schema).unwrap(), baseline);
        }
    }

    #[test]
    fn field_count_must_match() {
        let entry = record!["0x0000000000000000000000000000000000000003", 1u8];
        let err = encode(&entry, &airdrop_schema()).unwrap_err();
        assert_eq!(err, EncodingError::FieldCount { expected: 3, got: 2 });
    }

    #[test]
    fn error_names_offending_field() {
        let err = encode(&record!["0x01", 1u8, 2u8], &airdrop_schema()).unwrap_err();
        match err {
            EncodingError::InvalidField { index, ty, .. } => {
                assert_eq!(index, 0);
                assert_eq!(ty, FieldType::Address);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let err = encode(
            &record!["0x0000000000000000000000000000000000000003", 1u8, -2i8],
            &airdrop_schema(),
        )
        .unwrap_err();
        assert!(matches!(err, EncodingError::InvalidField { index: 2, .. }));
    }
}
