//! Transport trait for device communication.
//!
//! The [`Transport`] trait abstracts over the physical byte-oriented line.
//! The real implementation lives in `serprobe-transport` (serial ports via
//! `tokio-serial`); `serprobe-test-harness` provides a mock for
//! deterministic unit testing.
//!
//! The probe engine operates on a `Transport` rather than directly on a
//! serial port, so the same exchange logic runs against real hardware and
//! against canned test replies.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Asynchronous byte-level transport to a device.
///
/// A probe holds exclusive ownership of one transport for its whole
/// duration: open, optional write, one read, close. Implementations do not
/// need to support concurrent callers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send raw bytes to the device.
    ///
    /// Implementations should not return until all bytes have been handed
    /// to the underlying line (serial TX buffer flushed).
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive bytes from the device into the provided buffer.
    ///
    /// Returns the number of bytes actually read; only that prefix of
    /// `buf` is valid. Waits up to `timeout` for data to arrive and
    /// returns [`Error::Timeout`](crate::error::Error::Timeout) if none
    /// does.
    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Close the transport.
    ///
    /// After `close()`, subsequent `send()` and `receive()` calls return
    /// [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn close(&mut self) -> Result<()>;

    /// Check whether the transport is currently connected.
    fn is_connected(&self) -> bool;
}
