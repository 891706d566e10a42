//! Canonical little-endian serialization helpers.
//!
//! The helpers provide the shared vocabulary used by the binary proof codec in
//! [`crate::merkle`]: fixed-width integers, `u32`-prefixed vectors, digests and
//! a bounds-checked [`ByteReader`] cursor. Every read reports the section and
//! field that failed so callers can surface precise decoding errors.

mod bytes;
mod collections;
mod cursor;
mod digest;
mod error;
mod ints;

pub use bytes::ensure_consumed;
pub use collections::{read_vec, write_vec};
pub use cursor::ByteReader;
pub use digest::{read_digest, write_digest};
pub use error::{SerError, SerKind, SerResult};
pub use ints::{
    ensure_u32, read_bool, read_u16, read_u32, read_u64, read_u8, write_bool, write_u16,
    write_u32, write_u64, write_u8,
};
