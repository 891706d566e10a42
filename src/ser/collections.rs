use super::cursor::ByteReader;
use super::error::{SerKind, SerResult};
use super::ints;

/// Writes a slice using a `u32` item count prefix.
pub fn write_vec<T, F>(
    out: &mut Vec<u8>,
    items: &[T],
    kind: SerKind,
    field: &'static str,
    mut write_item: F,
) -> SerResult<()>
where
    F: FnMut(&mut Vec<u8>, &T) -> SerResult<()>,
{
    let count = ints::ensure_u32(items.len(), kind, field)?;
    ints::write_u32(out, count);
    for item in items {
        write_item(out, item)?;
    }
    Ok(())
}

/// Reads a `Vec<T>` encoded with a `u32` length prefix.
///
/// The preallocation is bounded by the remaining input so a forged count
/// cannot force a large allocation before the reads fail.
pub fn read_vec<T, F>(
    cursor: &mut ByteReader<'_>,
    kind: SerKind,
    field: &'static str,
    mut read_item: F,
) -> SerResult<Vec<T>>
where
    F: FnMut(&mut ByteReader<'_>, usize) -> SerResult<T>,
{
    let count = ints::read_u32(cursor, kind, field)? as usize;
    let mut out = Vec::with_capacity(count.min(cursor.remaining()));
    for index in 0..count {
        out.push(read_item(cursor, index)?);
    }
    Ok(out)
}
