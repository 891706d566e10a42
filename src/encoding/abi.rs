//! Solidity ABI tuple encoding (`abi.encode(v1, …, vn)`).

use alloy_primitives::{Address, U256};

use super::error::EncodingError;
use super::types::FieldType;
use super::value::FieldValue;

const WORD: usize = 32;
const ADDRESS_LEN: usize = 20;

/// A field after normalisation: either one head word or an out-of-line payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Word([u8; WORD]),
    Dynamic(Vec<u8>),
}

/// Normalises `value` under `ty`. `index` is only used to label errors.
pub(crate) fn tokenize(
    index: usize,
    ty: FieldType,
    value: &FieldValue,
) -> Result<Token, EncodingError> {
    let invalid = |reason: String| EncodingError::invalid(index, ty, reason);
    match ty {
        FieldType::Address => address_word(value).map(Token::Word).map_err(invalid),
        FieldType::Bool => bool_word(value).map(Token::Word).map_err(invalid),
        FieldType::Uint(bits) => uint_word(value, bits).map(Token::Word).map_err(invalid),
        FieldType::Int(bits) => int_word(value, bits).map(Token::Word).map_err(invalid),
        FieldType::FixedBytes(len) => fixed_bytes_word(value, len as usize)
            .map(Token::Word)
            .map_err(invalid),
        FieldType::Bytes => byte_string(value).map(Token::Dynamic).map_err(invalid),
        FieldType::String => match value {
            FieldValue::Text(text) => Ok(Token::Dynamic(text.as_bytes().to_vec())),
            other => Err(invalid(format!("expected text, got {}", other.kind()))),
        },
    }
}

/// Lays out the head words followed by the tail of dynamic payloads.
pub(crate) fn encode_tokens(tokens: &[Token]) -> Vec<u8> {
    let head_len = WORD * tokens.len();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for token in tokens {
        match token {
            Token::Word(word) => head.extend_from_slice(word),
            Token::Dynamic(payload) => {
                head.extend_from_slice(&usize_word(head_len + tail.len()));
                tail.extend_from_slice(&usize_word(payload.len()));
                tail.extend_from_slice(payload);
                let padding = (WORD - payload.len() % WORD) % WORD;
                tail.resize(tail.len() + padding, 0);
            }
        }
    }
    head.extend_from_slice(&tail);
    head
}

fn usize_word(value: usize) -> [u8; WORD] {
    U256::from(value).to_be_bytes::<WORD>()
}

fn address_word(value: &FieldValue) -> Result<[u8; WORD], String> {
    let address = match value {
        FieldValue::Text(text) => parse_address(text)?,
        FieldValue::Bytes(raw) if raw.len() == ADDRESS_LEN => Address::from_slice(raw),
        FieldValue::Bytes(raw) => {
            return Err(format!("expected 20 address bytes, got {}", raw.len()));
        }
        other => return Err(format!("expected a hex address, got {}", other.kind())),
    };
    let mut word = [0u8; WORD];
    word[WORD - ADDRESS_LEN..].copy_from_slice(address.as_slice());
    Ok(word)
}

fn parse_address(text: &str) -> Result<Address, String> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    if digits.len() != 2 * ADDRESS_LEN {
        return Err(format!("expected 40 hex digits, got {}", digits.len()));
    }
    let raw = hex::decode(digits).map_err(|err| format!("invalid hex address: {err}"))?;
    let address = Address::from_slice(&raw);
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    // All-lowercase and all-uppercase addresses carry no checksum.
    if has_upper && has_lower && address.to_checksum(None)[2..] != *digits {
        return Err("invalid EIP-55 checksum".to_owned());
    }
    Ok(address)
}

fn bool_word(value: &FieldValue) -> Result<[u8; WORD], String> {
    let flag = match value {
        FieldValue::Bool(flag) => *flag,
        FieldValue::Text(text) if text == "true" => true,
        FieldValue::Text(text) if text == "false" => false,
        other => return Err(format!("expected a boolean, got {}", other.kind())),
    };
    let mut word = [0u8; WORD];
    word[WORD - 1] = flag as u8;
    Ok(word)
}

/// Parses a non-negative decimal or `0x` hex integer.
fn parse_magnitude(text: &str) -> Result<U256, String> {
    if let Some(digits) = text.strip_prefix("0x") {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid hex integer `{text}`"));
        }
        U256::from_str_radix(digits, 16).map_err(|err| format!("`{text}`: {err}"))
    } else {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("invalid decimal integer `{text}`"));
        }
        U256::from_str_radix(text, 10).map_err(|err| format!("`{text}`: {err}"))
    }
}

/// Splits any integer representation into sign and magnitude.
fn signed_magnitude(value: &FieldValue) -> Result<(bool, U256), String> {
    match value {
        FieldValue::Unsigned(unsigned) => Ok((false, U256::from(*unsigned))),
        FieldValue::Signed(signed) => Ok((*signed < 0, U256::from(signed.unsigned_abs()))),
        FieldValue::Text(text) => match text.strip_prefix('-') {
            Some(rest) => Ok((true, parse_magnitude(rest)?)),
            None => Ok((false, parse_magnitude(text)?)),
        },
        other => Err(format!("expected an integer, got {}", other.kind())),
    }
}

fn uint_word(value: &FieldValue, bits: u16) -> Result<[u8; WORD], String> {
    let (negative, magnitude) = signed_magnitude(value)?;
    if negative && !magnitude.is_zero() {
        return Err("negative value for unsigned type".to_owned());
    }
    if magnitude.bit_len() > bits as usize {
        return Err(format!("value does not fit in {bits} bits"));
    }
    Ok(magnitude.to_be_bytes::<WORD>())
}

fn int_word(value: &FieldValue, bits: u16) -> Result<[u8; WORD], String> {
    let (negative, magnitude) = signed_magnitude(value)?;
    let limit = U256::from(1u8) << (bits as usize - 1);
    let in_range = if negative {
        magnitude <= limit
    } else {
        magnitude < limit
    };
    if !in_range {
        return Err(format!("value does not fit in int{bits}"));
    }
    let encoded = if negative {
        (!magnitude).wrapping_add(U256::from(1u8))
    } else {
        magnitude
    };
    Ok(encoded.to_be_bytes::<WORD>())
}

fn byte_string(value: &FieldValue) -> Result<Vec<u8>, String> {
    match value {
        FieldValue::Bytes(raw) => Ok(raw.clone()),
        FieldValue::Text(text) => {
            let digits = text
                .strip_prefix("0x")
                .ok_or_else(|| "expected 0x-prefixed hex bytes".to_owned())?;
            hex::decode(digits).map_err(|err| format!("invalid hex bytes: {err}"))
        }
        other => Err(format!("expected bytes, got {}", other.kind())),
    }
}

fn fixed_bytes_word(value: &FieldValue, len: usize) -> Result<[u8; WORD], String> {
    let raw = byte_string(value)?;
    if raw.len() != len {
        return Err(format!("expected exactly {len} bytes, got {}", raw.len()));
    }
    let mut word = [0u8; WORD];
    word[..len].copy_from_slice(&raw);
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_hex(token: Token) -> String {
        match token {
            Token::Word(word) => hex::encode(word),
            Token::Dynamic(_) => panic!("expected a static word"),
        }
    }

    #[test]
    fn negative_ints_use_twos_complement() {
        let token = tokenize(0, FieldType::Int(8), &FieldValue::Signed(-1)).unwrap();
        assert_eq!(word_hex(token), "ff".repeat(32));
        let token = tokenize(0, FieldType::Int(8), &FieldValue::Text("-128".into())).unwrap();
        assert_eq!(word_hex(token), format!("{}80", "ff".repeat(31)));
    }

    #[test]
    fn int_bounds_are_asymmetric() {
        assert!(tokenize(0, FieldType::Int(8), &FieldValue::Signed(127)).is_ok());
        assert!(tokenize(0, FieldType::Int(8), &FieldValue::Signed(128)).is_err());
        assert!(tokenize(0, FieldType::Int(8), &FieldValue::Signed(-128)).is_ok());
        assert!(tokenize(0, FieldType::Int(8), &FieldValue::Signed(-129)).is_err());
    }

    #[test]
    fn uint_width_is_enforced() {
        assert!(tokenize(0, FieldType::Uint(8), &FieldValue::Unsigned(255)).is_ok());
        let err = tokenize(2, FieldType::Uint(8), &FieldValue::Unsigned(256)).unwrap_err();
        assert!(matches!(
            err,
            EncodingError::InvalidField { index: 2, ty: FieldType::Uint(8), .. }
        ));
        assert!(tokenize(0, FieldType::Uint(256), &FieldValue::Signed(-1)).is_err());
        let max = format!("0x{}", "ff".repeat(32));
        assert!(tokenize(0, FieldType::Uint(256), &FieldValue::Text(max)).is_ok());
        let over = format!("0x1{}", "00".repeat(32));
        assert!(tokenize(0, FieldType::Uint(256), &FieldValue::Text(over)).is_err());
    }

    #[test]
    fn rejects_malformed_numeric_text() {
        for text in ["", "+1", "1e3", "0x", "12a", " 1"] {
            assert!(
                tokenize(0, FieldType::Uint(256), &FieldValue::Text(text.into())).is_err(),
                "`{text}` should be rejected"
            );
        }
    }

    #[test]
    fn checksum_is_validated_for_mixed_case() {
        let valid = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        assert!(address_word(&FieldValue::Text(valid.into())).is_ok());
        let broken = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD";
        assert!(address_word(&FieldValue::Text(broken.into())).is_err());
        let lower = valid.to_ascii_lowercase();
        assert_eq!(
            address_word(&FieldValue::Text(lower)).unwrap(),
            address_word(&FieldValue::Text(valid.into())).unwrap()
        );
    }

    #[test]
    fn dynamic_fields_go_to_the_tail() {
        let tokens = vec![
            Token::Word([0x11; WORD]),
            Token::Dynamic(b"abc".to_vec()),
        ];
        let encoded = encode_tokens(&tokens);
        let expected = [
            "11".repeat(32),
            format!("{:064x}", 0x40),
            format!("{:064x}", 3),
            format!("616263{}", "00".repeat(29)),
        ]
        .concat();
        assert_eq!(hex::encode(encoded), expected);
    }

    #[test]
    fn fixed_bytes_are_right_padded() {
        let token =
            tokenize(0, FieldType::FixedBytes(2), &FieldValue::Text("0xbeef".into())).unwrap();
        assert_eq!(word_hex(token), format!("beef{}", "00".repeat(30)));
        assert!(tokenize(0, FieldType::FixedBytes(2), &FieldValue::Bytes(vec![1])).is_err());
    }
}
