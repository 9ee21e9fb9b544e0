//! Error types for serprobe.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. Boundary validation, transport-layer,
//! and decode-layer errors are all captured here.
//!
//! Every error is detected at the point of occurrence and returned
//! immediately; nothing is retried or logged-and-continued. At most one
//! error reaches the caller per probe, carrying the offending value and the
//! expected range or format.

/// The error type for all serprobe operations.
///
/// Variants cover the full range of failure modes of a single
/// request/response probe: parameter validation, port open/configure
/// failures, write failures, read timeouts, and decode bounds violations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request string is not valid hexadecimal text.
    ///
    /// Raised for an odd number of digits or any non-hex character. The
    /// probe fails before any transport I/O takes place.
    #[error("failed to parse command string '{command}': expected an even number of hex digits")]
    MalformedCommand {
        /// The offending command text, verbatim.
        command: String,
    },

    /// The serial port could not be opened or configured.
    #[error("failed to open port {descriptor}: {reason}")]
    Connection {
        /// The full connection descriptor (device, baud, parity, data bits,
        /// stop bits) that was being opened.
        descriptor: String,
        /// The underlying driver error, rendered as text.
        reason: String,
    },

    /// Writing the command to the port failed after a successful open.
    #[error("failed to write command to the port: {0}")]
    Write(String),

    /// No response arrived within the read timeout.
    #[error("timeout: failed to read from the port in time")]
    Timeout,

    /// The start offset lies beyond the bytes actually read.
    #[error("start offset {offset} is out of bounds of the {available}-byte reply")]
    OffsetOutOfBounds {
        /// Requested start offset.
        offset: usize,
        /// Number of bytes actually read.
        available: usize,
    },

    /// A fixed-width value at the start offset does not fit in the reply.
    #[error("a {width}-byte value at offset {offset} does not fit in the {available}-byte reply")]
    SpanOutOfBounds {
        /// Requested start offset.
        offset: usize,
        /// Width in bytes of the requested value kind.
        width: usize,
        /// Number of bytes actually read.
        available: usize,
    },

    /// A parameter failed validation at the configuration boundary.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The descriptor parsed but the host serial driver cannot express it.
    #[error("unsupported setting: {0}")]
    Unsupported(String),

    /// Operation on a transport that is not connected.
    #[error("not connected")]
    NotConnected,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_malformed_command() {
        let e = Error::MalformedCommand {
            command: "ZZ".into(),
        };
        assert_eq!(
            e.to_string(),
            "failed to parse command string 'ZZ': expected an even number of hex digits"
        );
    }

    #[test]
    fn error_display_connection() {
        let e = Error::Connection {
            descriptor: "/dev/ttyS0 9600 N 8 2".into(),
            reason: "no such device".into(),
        };
        assert_eq!(
            e.to_string(),
            "failed to open port /dev/ttyS0 9600 N 8 2: no such device"
        );
    }

    #[test]
    fn error_display_timeout() {
        let e = Error::Timeout;
        assert_eq!(e.to_string(), "timeout: failed to read from the port in time");
    }

    #[test]
    fn error_display_offset_out_of_bounds() {
        let e = Error::OffsetOutOfBounds {
            offset: 10,
            available: 5,
        };
        assert_eq!(
            e.to_string(),
            "start offset 10 is out of bounds of the 5-byte reply"
        );
    }

    #[test]
    fn error_display_span_out_of_bounds() {
        let e = Error::SpanOutOfBounds {
            offset: 3,
            width: 4,
            available: 5,
        };
        assert_eq!(
            e.to_string(),
            "a 4-byte value at offset 3 does not fit in the 5-byte reply"
        );
    }

    #[test]
    fn error_display_invalid_parameter() {
        let e = Error::InvalidParameter("bad endianness 'XX', expected 'LE' or 'BE'".into());
        assert_eq!(
            e.to_string(),
            "invalid parameter: bad endianness 'XX', expected 'LE' or 'BE'"
        );
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broken");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("pipe broken"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<Error>();
    }
}
