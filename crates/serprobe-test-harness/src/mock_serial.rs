//! Mock transport for deterministic testing of the probe engine.
//!
//! [`MockTransport`] implements the [`Transport`] trait with pre-loaded
//! replies. This lets you test request encoding, reply decoding, and the
//! transaction sequencing without real hardware.
//!
//! Two kinds of pre-loading are supported, matching the two shapes a probe
//! transaction can take:
//!
//! - [`expect`](MockTransport::expect): a request/reply pair. The reply is
//!   served only after the exact request bytes have been sent.
//! - [`push_reply`](MockTransport::push_reply): a standalone reply for a
//!   read-only probe, where the engine never sends anything and just
//!   listens.
//!
//! # Example
//!
//! ```
//! use serprobe_test_harness::MockTransport;
//!
//! let mut mock = MockTransport::new();
//! // When the engine sends this request, return this reply.
//! mock.expect(&[0x1B, 0x06], &[0xC2, 0x8F]);
//!
//! // For a read-only probe, queue the reply directly.
//! let mut listener = MockTransport::new();
//! listener.push_reply(b"hello world");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;

use serprobe_core::error::{Error, Result};
use serprobe_core::transport::Transport;

/// A pre-loaded request/reply pair.
#[derive(Debug, Clone)]
struct Exchange {
    /// The exact bytes we expect to be sent.
    request: Vec<u8>,
    /// The bytes to return once the matching request has been received.
    reply: Vec<u8>,
}

/// A mock [`Transport`] for testing the probe engine without hardware.
///
/// Expectations are consumed in order. When `send()` is called, the sent
/// data is recorded and matched against the next expectation; the
/// corresponding reply is then returned by the next `receive()` call.
/// Standalone replies queued with [`push_reply`](MockTransport::push_reply)
/// are served by `receive()` when no exchange reply is pending.
///
/// When nothing is pending at all, `receive()` returns
/// [`Error::Timeout`], which is exactly what a silent device looks like.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Ordered queue of expected request/reply pairs.
    exchanges: VecDeque<Exchange>,
    /// Standalone replies for read-only probes.
    unsolicited: VecDeque<Vec<u8>>,
    /// The reply pending for the next `receive()` call.
    pending_reply: Option<Vec<u8>>,
    /// Cursor into the pending reply (bytes already read).
    reply_cursor: usize,
    /// Whether the transport is "connected".
    disconnected: bool,
    /// Log of all bytes sent through this transport.
    sent_log: Vec<Vec<u8>>,
}

impl MockTransport {
    /// Create a new mock transport in the connected state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an expected request/reply pair.
    ///
    /// When `send()` is called with data matching `request`, the
    /// subsequent `receive()` call will return `reply`.
    pub fn expect(&mut self, request: &[u8], reply: &[u8]) {
        self.exchanges.push_back(Exchange {
            request: request.to_vec(),
            reply: reply.to_vec(),
        });
    }

    /// Queue a standalone reply, served by `receive()` without any
    /// preceding `send()`.
    pub fn push_reply(&mut self, reply: &[u8]) {
        self.unsolicited.push_back(reply.to_vec());
    }

    /// Return all data that has been sent through this transport.
    ///
    /// Each element is the byte slice from one `send()` call.
    pub fn sent_data(&self) -> &[Vec<u8>] {
        &self.sent_log
    }

    /// Return the number of expectations that have not yet been consumed.
    pub fn remaining_exchanges(&self) -> usize {
        self.exchanges.len()
    }

    /// Set the connected state of the mock transport.
    ///
    /// When set to `false`, subsequent `send()` and `receive()` calls
    /// return [`Error::NotConnected`].
    pub fn set_connected(&mut self, connected: bool) {
        self.disconnected = !connected;
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        if self.disconnected {
            return Err(Error::NotConnected);
        }

        self.sent_log.push(data.to_vec());

        match self.exchanges.pop_front() {
            Some(exchange) => {
                if data != exchange.request.as_slice() {
                    return Err(Error::Write(format!(
                        "unexpected request: expected {:02X?}, got {:02X?}",
                        exchange.request, data
                    )));
                }
                self.pending_reply = Some(exchange.reply);
                self.reply_cursor = 0;
                Ok(())
            }
            None => Err(Error::Write("no more exchanges in mock transport".into())),
        }
    }

    async fn receive(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<usize> {
        if self.disconnected {
            return Err(Error::NotConnected);
        }

        if self.pending_reply.is_none() {
            self.pending_reply = self.unsolicited.pop_front();
            self.reply_cursor = 0;
        }

        match self.pending_reply {
            Some(ref reply) => {
                let remaining = &reply[self.reply_cursor..];
                if remaining.is_empty() {
                    self.pending_reply = None;
                    self.reply_cursor = 0;
                    return Err(Error::Timeout);
                }
                let n = remaining.len().min(buf.len());
                buf[..n].copy_from_slice(&remaining[..n]);
                self.reply_cursor += n;
                if self.reply_cursor >= reply.len() {
                    // All reply bytes consumed; clear for the next exchange.
                    self.pending_reply = None;
                    self.reply_cursor = 0;
                }
                Ok(n)
            }
            None => Err(Error::Timeout),
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.disconnected = true;
        self.pending_reply = None;
        self.reply_cursor = 0;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        !self.disconnected
    }
}
