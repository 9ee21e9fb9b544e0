//! Probe configuration and the parameter-list boundary.
//!
//! A [`ProbeConfig`] describes exactly one transaction: where to connect,
//! what to send, and how to interpret the reply. It is built once per
//! invocation and owned by that invocation; nothing persists across calls.
//!
//! [`ProbeConfig::from_params`] consumes the ordered parameter list that
//! callers supply (a monitoring key, a command line), validating every
//! field into its typed form here so the engine never compares raw text.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::port::PortDescriptor;
use crate::value::{ByteOrder, ValueKind};

/// Default response buffer capacity in bytes.
pub const CAPACITY_DEFAULT: usize = 128;

/// Default read timeout.
pub const READ_TIMEOUT_DEFAULT: Duration = Duration::from_secs(5);

/// Configuration of a single probe transaction.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Serial connection descriptor.
    pub descriptor: PortDescriptor,
    /// Byte offset into the reply where decoding starts.
    pub offset: usize,
    /// Request payload as hex text; empty for a read-only probe.
    pub command: String,
    /// Interpretation of the reply span.
    pub kind: ValueKind,
    /// Byte order for multi-byte numeric kinds.
    pub order: ByteOrder,
    /// Response buffer capacity; at most this many bytes are read.
    pub capacity: usize,
    /// How long one read waits for the device before failing.
    pub timeout: Duration,
}

impl ProbeConfig {
    /// Configuration for `descriptor` with every other field at its
    /// default: offset 0, no request, raw kind, little-endian, 128-byte
    /// buffer, 5-second timeout.
    pub fn new(descriptor: PortDescriptor) -> Self {
        ProbeConfig {
            descriptor,
            offset: 0,
            command: String::new(),
            kind: ValueKind::Raw,
            order: ByteOrder::Little,
            capacity: CAPACITY_DEFAULT,
            timeout: READ_TIMEOUT_DEFAULT,
        }
    }

    /// Build a configuration from the ordered parameter list:
    ///
    /// 1. connection string (`"<device> [baud] [parity] [databits] [stopbits]"`)
    /// 2. start offset (decimal)
    /// 3. request payload as hex text
    /// 4. value kind (`float`, `double`, `uint16` .. `int64`, `raw`, `text`)
    /// 5. byte order (`LE` or `BE`)
    ///
    /// Only the connection string is mandatory; an absent or empty field
    /// selects its default. A field that is present and non-empty but does
    /// not validate is rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use serprobe_core::config::ProbeConfig;
    /// use serprobe_core::value::{ByteOrder, ValueKind};
    ///
    /// let config =
    ///     ProbeConfig::from_params(&["/dev/ttyS0 9600 N 8 2", "5", "1B06", "uint32", "BE"])
    ///         .unwrap();
    /// assert_eq!(config.offset, 5);
    /// assert_eq!(config.command, "1B06");
    /// assert_eq!(config.kind, ValueKind::Uint32);
    /// assert_eq!(config.order, ByteOrder::Big);
    /// ```
    pub fn from_params<S: AsRef<str>>(params: &[S]) -> Result<Self> {
        let connection = params.first().ok_or_else(|| {
            Error::InvalidParameter(
                "please provide at least a connection string, \
                 for example in the form of /dev/ttyS0 9600 N 8 2"
                    .into(),
            )
        })?;
        if params.len() > 5 {
            return Err(Error::InvalidParameter("too many parameters".into()));
        }

        let descriptor: PortDescriptor = connection.as_ref().parse()?;
        let mut config = ProbeConfig::new(descriptor);

        if let Some(field) = present(params.get(1)) {
            config.offset = field.parse().map_err(|_| {
                Error::InvalidParameter(format!("bad byte to start from provided '{field}'"))
            })?;
        }
        if let Some(field) = params.get(2) {
            config.command = field.as_ref().to_string();
        }
        if let Some(field) = present(params.get(3)) {
            config.kind = field.parse()?;
        }
        if let Some(field) = present(params.get(4)) {
            config.order = field.parse()?;
        }

        Ok(config)
    }
}

/// A parameter counts only when it is present and non-empty.
fn present<S: AsRef<str>>(param: Option<&S>) -> Option<&str> {
    param.map(AsRef::as_ref).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_only_takes_defaults() {
        let config = ProbeConfig::from_params(&["/dev/ttyS0"]).unwrap();
        assert_eq!(config.descriptor.path, "/dev/ttyS0");
        assert_eq!(config.offset, 0);
        assert_eq!(config.command, "");
        assert_eq!(config.kind, ValueKind::Raw);
        assert_eq!(config.order, ByteOrder::Little);
        assert_eq!(config.capacity, 128);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn all_five_params() {
        let config =
            ProbeConfig::from_params(&["/dev/ttyS0 19200 E 7 1", "3", "FEFE", "int16", "BE"])
                .unwrap();
        assert_eq!(config.descriptor.baud, 19200);
        assert_eq!(config.offset, 3);
        assert_eq!(config.command, "FEFE");
        assert_eq!(config.kind, ValueKind::Int16);
        assert_eq!(config.order, ByteOrder::Big);
    }

    #[test]
    fn no_params_rejected() {
        let err = ProbeConfig::from_params::<&str>(&[]).unwrap_err();
        assert!(err.to_string().contains("connection string"));
    }

    #[test]
    fn too_many_params_rejected() {
        let params = ["/dev/ttyS0", "0", "", "raw", "LE", "extra"];
        let err = ProbeConfig::from_params(&params).unwrap_err();
        assert!(err.to_string().contains("too many parameters"));
    }

    #[test]
    fn bad_offset_rejected() {
        let err = ProbeConfig::from_params(&["/dev/ttyS0", "ten"]).unwrap_err();
        assert!(err.to_string().contains("ten"));
        let err = ProbeConfig::from_params(&["/dev/ttyS0", "-1"]).unwrap_err();
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn empty_fields_take_defaults() {
        let config = ProbeConfig::from_params(&["/dev/ttyS0", "", "", "", ""]).unwrap();
        assert_eq!(config.offset, 0);
        assert_eq!(config.kind, ValueKind::Raw);
        assert_eq!(config.order, ByteOrder::Little);
    }

    #[test]
    fn bad_kind_rejected() {
        let err = ProbeConfig::from_params(&["/dev/ttyS0", "0", "", "int8"]).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn bad_order_rejected() {
        let err = ProbeConfig::from_params(&["/dev/ttyS0", "0", "", "raw", "XX"]).unwrap_err();
        assert!(err.to_string().contains("XX"));
    }

    #[test]
    fn descriptor_errors_propagate() {
        let err = ProbeConfig::from_params(&["/dev/ttyS0 9600 Q"]).unwrap_err();
        assert!(err.to_string().contains("parity"));
    }
}
