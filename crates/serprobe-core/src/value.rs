//! Value kinds, byte order, and the decoded value type.
//!
//! A probe reads a span of bytes out of a device reply and interprets it as
//! one of a closed set of [`ValueKind`]s. Multi-byte numeric kinds are
//! assembled in a caller-chosen [`ByteOrder`]. The result of a decode is a
//! [`Value`], whose `Display` impl produces the final textual output of the
//! probe.
//!
//! Kind and byte-order tokens are parsed exactly once at the configuration
//! boundary via `FromStr`; the decoder itself only ever matches on the
//! enums.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Requested interpretation of a byte span in a device reply.
///
/// Fixed-width kinds consume exactly [`width`](ValueKind::width) bytes
/// starting at the configured offset. `Raw` and `Text` consume the whole
/// remainder of the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Remainder of the reply as uppercase hex pairs.
    Raw,
    /// Remainder of the reply as a quoted, escaped string.
    Text,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// Signed 16-bit integer (two's complement).
    Int16,
    /// Signed 32-bit integer (two's complement).
    Int32,
    /// Signed 64-bit integer (two's complement).
    Int64,
    /// IEEE-754 binary32 float.
    Float32,
    /// IEEE-754 binary64 float.
    Float64,
}

impl ValueKind {
    /// Number of bytes a fixed-width kind consumes, or `None` for the
    /// remainder kinds (`Raw`, `Text`).
    pub fn width(&self) -> Option<usize> {
        match self {
            ValueKind::Raw | ValueKind::Text => None,
            ValueKind::Uint16 | ValueKind::Int16 => Some(2),
            ValueKind::Uint32 | ValueKind::Int32 | ValueKind::Float32 => Some(4),
            ValueKind::Uint64 | ValueKind::Int64 | ValueKind::Float64 => Some(8),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Raw => "raw",
            ValueKind::Text => "text",
            ValueKind::Uint16 => "uint16",
            ValueKind::Uint32 => "uint32",
            ValueKind::Uint64 => "uint64",
            ValueKind::Int16 => "int16",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Float32 => "float",
            ValueKind::Float64 => "double",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ValueKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(ValueKind::Raw),
            "text" => Ok(ValueKind::Text),
            "uint16" => Ok(ValueKind::Uint16),
            "uint32" => Ok(ValueKind::Uint32),
            "uint64" => Ok(ValueKind::Uint64),
            "int16" => Ok(ValueKind::Int16),
            "int32" => Ok(ValueKind::Int32),
            "int64" => Ok(ValueKind::Int64),
            "float" => Ok(ValueKind::Float32),
            "double" => Ok(ValueKind::Float64),
            other => Err(Error::InvalidParameter(format!(
                "bad datatype '{other}', expected one of float, double, uint16, uint32, \
                 uint64, int16, int32, int64, raw, text"
            ))),
        }
    }
}

/// Byte order used to assemble a multi-byte value from a contiguous span.
///
/// Irrelevant to the `Raw` and `Text` kinds, which copy bytes in reply
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Little => write!(f, "LE"),
            ByteOrder::Big => write!(f, "BE"),
        }
    }
}

impl FromStr for ByteOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LE" => Ok(ByteOrder::Little),
            "BE" => Ok(ByteOrder::Big),
            other => Err(Error::InvalidParameter(format!(
                "bad endianness '{other}', expected 'LE' or 'BE'"
            ))),
        }
    }
}

/// A decoded value, ready for formatting.
///
/// The `Display` impl renders the probe's final output:
///
/// - integers in base 10, with a leading `-` for negative signed values
/// - floats with six fractional digits
/// - `Bytes` as uppercase hex pairs with no separators
/// - `Text` as a double-quoted string with printable ASCII verbatim and
///   everything else escaped (`\t`, `\r`, `\n`, `\\`, `\"`, `\xNN`)
///
/// # Example
///
/// ```
/// use serprobe_core::value::Value;
///
/// assert_eq!(Value::Unsigned(36802).to_string(), "36802");
/// assert_eq!(Value::Signed(-562).to_string(), "-562");
/// assert_eq!(Value::Bytes(vec![0x68, 0x65]).to_string(), "6865");
/// assert_eq!(Value::Text(b"hi\n".to_vec()).to_string(), "\"hi\\n\"");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An unsigned integer of any supported width, widened to 64 bits.
    Unsigned(u64),
    /// A signed integer of any supported width, sign-extended to 64 bits.
    Signed(i64),
    /// A float of either supported width, widened (exactly) to binary64.
    Float(f64),
    /// The raw remainder span of the reply.
    Bytes(Vec<u8>),
    /// The remainder span of the reply, to be rendered as escaped text.
    Text(Vec<u8>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unsigned(x) => write!(f, "{x}"),
            Value::Signed(x) => write!(f, "{x}"),
            Value::Float(x) => write!(f, "{x:.6}"),
            Value::Bytes(bytes) => {
                for b in bytes {
                    write!(f, "{b:02X}")?;
                }
                Ok(())
            }
            Value::Text(bytes) => {
                write!(f, "\"")?;
                for &b in bytes {
                    for c in std::ascii::escape_default(b) {
                        write!(f, "{}", c as char)?;
                    }
                }
                write!(f, "\"")
            }
        }
    }
}
