//! Fixed-offset binary decoding of update messages.
//!
//! Every update message starts with a 6-byte header:
//!
//! ```text
//! offset 0: message-kind byte
//! offset 1: parameter-type index byte
//! offset 2: node index, little-endian u32
//! ```
//!
//! followed by a type-specific payload of little-endian 4-byte floats at
//! the offsets reported by `ParameterType::field_offsets`. Decoders are
//! pure and bounds-checked, never reading past the buffer.

use glam::{Quat, Vec3};

use crate::error::{Error, Result};

/// Minimum length of any update message.
pub const HEADER_LEN: usize = 6;

/// The fixed-offset header fields of an update message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateHeader {
    pub kind: u8,
    pub param_index: u8,
    pub node_index: u32,
}

/// Decode the header of an update message.
pub fn decode_header(buf: &[u8]) -> Result<UpdateHeader> {
    if buf.len() < HEADER_LEN {
        return Err(Error::MalformedMessage {
            len: buf.len(),
            min: HEADER_LEN,
        });
    }
    Ok(UpdateHeader {
        kind: buf[0],
        param_index: buf[1],
        node_index: u32::from_le_bytes([buf[2], buf[3], buf[4], buf[5]]),
    })
}

/// Decode a little-endian f32 payload field at a byte offset.
pub fn decode_f32(buf: &[u8], offset: usize) -> Result<f32> {
    match offset.checked_add(4) {
        Some(end) if end <= buf.len() => Ok(f32::from_le_bytes([
            buf[offset],
            buf[offset + 1],
            buf[offset + 2],
            buf[offset + 3],
        ])),
        _ => Err(Error::OutOfRange {
            offset,
            len: buf.len(),
        }),
    }
}

/// Decode a three-float payload starting at the standard payload offset.
pub fn decode_vec3(buf: &[u8]) -> Result<Vec3> {
    Ok(Vec3::new(
        decode_f32(buf, 6)?,
        decode_f32(buf, 10)?,
        decode_f32(buf, 14)?,
    ))
}

/// Decode a four-float quaternion payload in wire order `(x, y, z, w)`.
pub fn decode_quat(buf: &[u8]) -> Result<Quat> {
    Ok(Quat::from_xyzw(
        decode_f32(buf, 6)?,
        decode_f32(buf, 10)?,
        decode_f32(buf, 14)?,
        decode_f32(buf, 18)?,
    ))
}
