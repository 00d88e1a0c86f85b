//! Little-endian scalar codecs consumed by the container encoder.

use super::cursor::ByteReader;
use crate::error::{CodecError, CodecResult, OffsetIssue};

/// Encodes a `u8` into the output buffer.
pub fn write_u8(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

/// Encodes a `u16` in little-endian order.
pub fn write_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Encodes a `u32` in little-endian order.
pub fn write_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Encodes a `u64` in little-endian order.
pub fn write_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Encodes a `u128` in little-endian order.
pub fn write_u128(out: &mut Vec<u8>, value: u128) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Writes a boolean flag as a single byte (`0` or `1`).
pub fn write_bool(out: &mut Vec<u8>, value: bool) {
    write_u8(out, value as u8);
}

/// Reads a `u8` from the cursor.
pub fn read_u8(cursor: &mut ByteReader<'_>, field: usize) -> CodecResult<u8> {
    Ok(cursor.read_array::<1>(field)?[0])
}

/// Reads a `u16` in little-endian order.
pub fn read_u16(cursor: &mut ByteReader<'_>, field: usize) -> CodecResult<u16> {
    Ok(u16::from_le_bytes(cursor.read_array::<2>(field)?))
}

/// Reads a `u32` in little-endian order.
pub fn read_u32(cursor: &mut ByteReader<'_>, field: usize) -> CodecResult<u32> {
    Ok(u32::from_le_bytes(cursor.read_array::<4>(field)?))
}

/// Reads a `u64` in little-endian order.
pub fn read_u64(cursor: &mut ByteReader<'_>, field: usize) -> CodecResult<u64> {
    Ok(u64::from_le_bytes(cursor.read_array::<8>(field)?))
}

/// Reads a `u128` in little-endian order.
pub fn read_u128(cursor: &mut ByteReader<'_>, field: usize) -> CodecResult<u128> {
    Ok(u128::from_le_bytes(cursor.read_array::<16>(field)?))
}

/// Reads a boolean flag encoded as `0` or `1`.
pub fn read_bool(cursor: &mut ByteReader<'_>, field: usize) -> CodecResult<bool> {
    match read_u8(cursor, field)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(CodecError::offset(OffsetIssue::InvalidValue, field)),
    }
}
