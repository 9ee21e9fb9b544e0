//! Typed response decoder.
//!
//! This module handles the pure byte-level interpretation of a device reply:
//! given the valid prefix of the read buffer, a start offset, a
//! [`ValueKind`], and a [`ByteOrder`], it extracts and interprets one value.
//!
//! # Width table
//!
//! | Kind                      | Bytes consumed at `offset` |
//! |---------------------------|----------------------------|
//! | `uint16` / `int16`        | 2                          |
//! | `uint32` / `int32` / `float` | 4                       |
//! | `uint64` / `int64` / `double` | 8                      |
//! | `raw` / `text`            | remainder of the reply     |
//!
//! Bounds are enforced before any interpretation: a fixed-width kind whose
//! span would extend past the reply fails with
//! [`Error::SpanOutOfBounds`], and no byte beyond the valid prefix is ever
//! inspected. Signed kinds reinterpret the unsigned bit pattern of the same
//! width as two's complement; floats pass IEEE-754 bit patterns through
//! unchanged, NaN and infinities included.
//!
//! The decoder is stateless: a pure function from its inputs to a value or
//! a bounds error.

use crate::error::{Error, Result};
use crate::value::{ByteOrder, Value, ValueKind};

/// Copy the `N`-byte span starting at `offset` out of `buf`.
///
/// Fails with [`Error::SpanOutOfBounds`] if the span would extend past the
/// end of `buf`.
fn span<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N]> {
    let end = offset.checked_add(N).filter(|&end| end <= buf.len());
    let end = end.ok_or(Error::SpanOutOfBounds {
        offset,
        width: N,
        available: buf.len(),
    })?;
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&buf[offset..end]);
    Ok(bytes)
}

/// Decode one value out of a device reply.
///
/// `buf` must be exactly the valid prefix of the read buffer, i.e.
/// `&raw[..n]` where `n` is the byte count the transport actually
/// delivered.
///
/// # Example
///
/// ```
/// use serprobe_core::decode::decode;
/// use serprobe_core::value::{ByteOrder, Value, ValueKind};
///
/// let reply = [0xC2, 0x8F];
/// let v = decode(&reply, 0, ValueKind::Uint16, ByteOrder::Little).unwrap();
/// assert_eq!(v, Value::Unsigned(36802));
///
/// let v = decode(&reply, 0, ValueKind::Int16, ByteOrder::Little).unwrap();
/// assert_eq!(v, Value::Signed(-28734));
/// ```
pub fn decode(buf: &[u8], offset: usize, kind: ValueKind, order: ByteOrder) -> Result<Value> {
    if offset > buf.len() {
        return Err(Error::OffsetOutOfBounds {
            offset,
            available: buf.len(),
        });
    }

    match kind {
        ValueKind::Raw => Ok(Value::Bytes(buf[offset..].to_vec())),
        ValueKind::Text => Ok(Value::Text(buf[offset..].to_vec())),
        ValueKind::Uint16 => {
            let bytes = span::<2>(buf, offset)?;
            let x = match order {
                ByteOrder::Little => u16::from_le_bytes(bytes),
                ByteOrder::Big => u16::from_be_bytes(bytes),
            };
            Ok(Value::Unsigned(u64::from(x)))
        }
        ValueKind::Uint32 => {
            let bytes = span::<4>(buf, offset)?;
            let x = match order {
                ByteOrder::Little => u32::from_le_bytes(bytes),
                ByteOrder::Big => u32::from_be_bytes(bytes),
            };
            Ok(Value::Unsigned(u64::from(x)))
        }
        ValueKind::Uint64 => {
            let bytes = span::<8>(buf, offset)?;
            let x = match order {
                ByteOrder::Little => u64::from_le_bytes(bytes),
                ByteOrder::Big => u64::from_be_bytes(bytes),
            };
            Ok(Value::Unsigned(x))
        }
        ValueKind::Int16 => {
            let bytes = span::<2>(buf, offset)?;
            let x = match order {
                ByteOrder::Little => i16::from_le_bytes(bytes),
                ByteOrder::Big => i16::from_be_bytes(bytes),
            };
            Ok(Value::Signed(i64::from(x)))
        }
        ValueKind::Int32 => {
            let bytes = span::<4>(buf, offset)?;
            let x = match order {
                ByteOrder::Little => i32::from_le_bytes(bytes),
                ByteOrder::Big => i32::from_be_bytes(bytes),
            };
            Ok(Value::Signed(i64::from(x)))
        }
        ValueKind::Int64 => {
            let bytes = span::<8>(buf, offset)?;
            let x = match order {
                ByteOrder::Little => i64::from_le_bytes(bytes),
                ByteOrder::Big => i64::from_be_bytes(bytes),
            };
            Ok(Value::Signed(x))
        }
        ValueKind::Float32 => {
            let bytes = span::<4>(buf, offset)?;
            let x = match order {
                ByteOrder::Little => f32::from_le_bytes(bytes),
                ByteOrder::Big => f32::from_be_bytes(bytes),
            };
            // f32 -> f64 widening is exact, so six-digit formatting of the
            // widened value matches formatting the f32 directly.
            Ok(Value::Float(f64::from(x)))
        }
        ValueKind::Float64 => {
            let bytes = span::<8>(buf, offset)?;
            let x = match order {
                ByteOrder::Little => f64::from_le_bytes(bytes),
                ByteOrder::Big => f64::from_be_bytes(bytes),
            };
            Ok(Value::Float(x))
        }
    }
}
