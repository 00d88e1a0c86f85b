//! Wire encoding and decoding for stable containers.
//!
//! The helpers in this module implement the little-endian, offset-based
//! layout of the full container form: a bit-packed presence prefix followed
//! by the active fields encoded as a plain record. The body encoder and
//! decoder are shared with the profile compact form, which differs only in
//! its prefix.

mod basic;
mod cursor;
mod decode;
mod encode;

pub use cursor::ByteReader;
pub use decode::deserialize;
pub use encode::{serialize, BYTES_PER_OFFSET};

pub(crate) use decode::{decode_body, ActiveSlot};
pub(crate) use encode::{encode_body, encode_value, ActiveField};
