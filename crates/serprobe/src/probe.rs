//! The probe engine: one request/response transaction, start to finish.
//!
//! A probe is a single open-(optional write)-read-decode-close cycle
//! against one serial device. There is no retry, no connection reuse, and
//! no pipelining: every failure is terminal for the transaction and is
//! surfaced to the caller as-is. Callers that overlap probes against the
//! same physical device are responsible for serializing them.

use tracing::debug;

use serprobe_core::command::encode_command;
use serprobe_core::config::ProbeConfig;
use serprobe_core::decode::decode;
use serprobe_core::error::{Error, Result};
use serprobe_core::transport::Transport;
use serprobe_core::value::Value;
use serprobe_transport::SerialTransport;

/// Run one exchange over an already-open transport.
///
/// `command` is the encoded request, or `None` for a read-only probe.
/// Reads at most `config.capacity` bytes once, bounds-checks the offset
/// against the bytes actually read, and decodes.
pub async fn exchange(
    transport: &mut dyn Transport,
    command: Option<&[u8]>,
    config: &ProbeConfig,
) -> Result<Value> {
    if let Some(cmd) = command {
        debug!(bytes = cmd.len(), "writing request");
        transport.send(cmd).await.map_err(|e| match e {
            Error::Write(reason) => Error::Write(reason),
            other => Error::Write(other.to_string()),
        })?;
    }

    let mut buf = vec![0u8; config.capacity];
    let n = match transport.receive(&mut buf, config.timeout).await {
        Ok(n) if n > 0 => n,
        // A silent line and a failed read look the same to the caller:
        // no usable reply within the timeout.
        Ok(_) => return Err(Error::Timeout),
        Err(e) => {
            debug!(error = %e, "read failed");
            return Err(Error::Timeout);
        }
    };
    debug!(bytes = n, "reply received");

    if config.offset > n {
        return Err(Error::OffsetOutOfBounds {
            offset: config.offset,
            available: n,
        });
    }

    decode(&buf[..n], config.offset, config.kind, config.order)
}

/// Run one probe over an already-open transport.
///
/// Encodes the configured request and performs the exchange. Library users
/// with their own [`Transport`] implementation enter here; [`execute`]
/// wraps this with serial port acquisition and release.
pub async fn run(transport: &mut dyn Transport, config: &ProbeConfig) -> Result<Value> {
    let command = encode_command(&config.command)?;
    exchange(transport, command.as_deref(), config).await
}

/// Execute one probe against the serial port named in `config`.
///
/// Opens the port, performs the exchange, and closes the port on every
/// exit path, decode failures included. Returns the decoded value
/// formatted as text, the sole output of a probe.
///
/// # Example
///
/// ```no_run
/// use serprobe_core::ProbeConfig;
///
/// # async fn example() -> serprobe_core::Result<()> {
/// let config = ProbeConfig::from_params(&["/dev/ttyS0 9600 N 8 2", "0", "1B06", "uint16"])?;
/// let value = serprobe::execute(&config).await?;
/// println!("{value}");
/// # Ok(())
/// # }
/// ```
pub async fn execute(config: &ProbeConfig) -> Result<String> {
    // Reject a malformed request before touching the port.
    let command = encode_command(&config.command)?;

    let mut transport = SerialTransport::open(&config.descriptor).await?;
    let result = exchange(&mut transport, command.as_deref(), config).await;

    // The port is released no matter how the exchange went.
    if let Err(e) = transport.close().await {
        tracing::warn!(error = %e, "failed to close port cleanly");
    }

    result.map(|value| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serprobe_core::port::PortDescriptor;
    use serprobe_core::value::{ByteOrder, ValueKind};
    use serprobe_test_harness::MockTransport;

    fn test_config() -> ProbeConfig {
        ProbeConfig::new(PortDescriptor::new("/dev/null"))
    }

    #[tokio::test]
    async fn write_then_read_decodes_value() {
        let mut mock = MockTransport::new();
        mock.expect(&[0x1B, 0x06], &[0xC2, 0x8F]);

        let mut config = test_config();
        config.command = "1B06".into();
        config.kind = ValueKind::Uint16;

        let value = run(&mut mock, &config).await.unwrap();
        assert_eq!(value, Value::Unsigned(36802));
        assert_eq!(mock.sent_data(), [vec![0x1B, 0x06]]);
    }

    #[tokio::test]
    async fn read_only_probe_sends_nothing() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"hello world");

        let config = test_config();

        let value = run(&mut mock, &config).await.unwrap();
        assert_eq!(value.to_string(), "68656C6C6F20776F726C64");
        assert!(mock.sent_data().is_empty());
    }

    #[tokio::test]
    async fn malformed_command_fails_before_any_io() {
        for command in ["1", "ZZ"] {
            let mut mock = MockTransport::new();
            mock.push_reply(&[0x00]);

            let mut config = test_config();
            config.command = command.into();

            let err = run(&mut mock, &config).await.unwrap_err();
            assert!(
                matches!(err, Error::MalformedCommand { .. }),
                "command {command:?} expected MalformedCommand, got {err:?}"
            );
            assert!(mock.sent_data().is_empty());
        }
    }

    #[tokio::test]
    async fn offset_beyond_reply_fails_before_decode() {
        let mut mock = MockTransport::new();
        mock.push_reply(&[0x01, 0x02, 0x03, 0x04, 0x05]);

        let mut config = test_config();
        config.offset = 10;

        let err = run(&mut mock, &config).await.unwrap_err();
        match err {
            Error::OffsetOutOfBounds { offset, available } => {
                assert_eq!(offset, 10);
                assert_eq!(available, 5);
            }
            other => panic!("expected OffsetOutOfBounds, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn offset_at_reply_end_is_an_empty_raw_value() {
        let mut mock = MockTransport::new();
        mock.push_reply(&[0x01, 0x02, 0x03, 0x04, 0x05]);

        let mut config = test_config();
        config.offset = 5;

        let value = run(&mut mock, &config).await.unwrap();
        assert_eq!(value.to_string(), "");
    }

    #[tokio::test]
    async fn silent_device_times_out() {
        let mut mock = MockTransport::new();

        let config = test_config();

        let err = run(&mut mock, &config).await.unwrap_err();
        assert!(matches!(err, Error::Timeout));
    }

    #[tokio::test]
    async fn short_reply_is_a_span_error() {
        let mut mock = MockTransport::new();
        mock.push_reply(&[0x01, 0x02, 0x03]);

        let mut config = test_config();
        config.kind = ValueKind::Uint32;

        let err = run(&mut mock, &config).await.unwrap_err();
        assert!(matches!(
            err,
            Error::SpanOutOfBounds {
                offset: 0,
                width: 4,
                available: 3
            }
        ));
    }

    #[tokio::test]
    async fn write_failure_surfaces_as_write_error() {
        // No exchange loaded: the mock refuses the request.
        let mut mock = MockTransport::new();

        let mut config = test_config();
        config.command = "FF".into();

        let err = run(&mut mock, &config).await.unwrap_err();
        assert!(matches!(err, Error::Write(_)));
    }

    #[tokio::test]
    async fn float_probe_end_to_end() {
        let mut mock = MockTransport::new();
        mock.expect(&[0x10], &[0x0D, 0xC2, 0x8F, 0xC2]);

        let mut config = test_config();
        config.command = "10".into();
        config.kind = ValueKind::Float32;

        let value = run(&mut mock, &config).await.unwrap();
        assert_eq!(value.to_string(), "-71.879005");
    }

    #[tokio::test]
    async fn big_endian_probe_at_offset() {
        // Value of interest is in the middle of a longer frame.
        let mut mock = MockTransport::new();
        mock.push_reply(&[0x1B, 0x06, 0x00, 0x00, 0x08, 0x3A, 0x41, 0xBB, 0x01, 0x1B, 0x03]);

        let mut config = test_config();
        config.offset = 5;
        config.kind = ValueKind::Uint32;
        config.order = ByteOrder::Big;

        let value = run(&mut mock, &config).await.unwrap();
        assert_eq!(value, Value::Unsigned(977_386_241));
    }

    #[tokio::test]
    async fn text_probe_quotes_and_escapes() {
        let mut mock = MockTransport::new();
        mock.push_reply(b"OK\r\n");

        let mut config = test_config();
        config.kind = ValueKind::Text;

        let value = run(&mut mock, &config).await.unwrap();
        assert_eq!(value.to_string(), "\"OK\\r\\n\"");
    }

    #[tokio::test]
    async fn reply_longer_than_capacity_is_truncated_to_capacity() {
        let mut mock = MockTransport::new();
        let reply: Vec<u8> = (0..=255).map(|i| i as u8).collect();
        mock.push_reply(&reply);

        let mut config = test_config();
        config.capacity = 4;
        config.kind = ValueKind::Uint32;

        // One read fills the 4-byte buffer; the rest of the reply is
        // never fetched.
        let value = run(&mut mock, &config).await.unwrap();
        assert_eq!(value, Value::Unsigned(u32::from_le_bytes([0, 1, 2, 3]).into()));
    }

    #[tokio::test]
    async fn execute_reports_connection_error_with_descriptor() {
        let mut config = test_config();
        config.descriptor = PortDescriptor::new("/dev/serprobe-no-such-device");

        let err = execute(&config).await.unwrap_err();
        match err {
            Error::Connection { descriptor, .. } => {
                assert!(descriptor.contains("/dev/serprobe-no-such-device"));
            }
            other => panic!("expected Connection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn execute_rejects_malformed_command_without_opening() {
        // The device does not exist, but the command error comes first.
        let mut config = test_config();
        config.descriptor = PortDescriptor::new("/dev/serprobe-no-such-device");
        config.command = "XYZ".into();

        let err = execute(&config).await.unwrap_err();
        assert!(matches!(err, Error::MalformedCommand { .. }));
    }
}
