//! Serial port transport for probe transactions.
//!
//! This module provides [`SerialTransport`], which implements the
//! [`Transport`] trait for physical RS-232/RS-485 lines and USB virtual COM
//! ports.
//!
//! # Example
//!
//! ```no_run
//! use serprobe_core::{PortDescriptor, Transport};
//! use serprobe_transport::SerialTransport;
//! use std::time::Duration;
//!
//! # async fn example() -> serprobe_core::Result<()> {
//! let descriptor: PortDescriptor = "/dev/ttyS0 9600 N 8 2".parse()?;
//! let mut transport = SerialTransport::open(&descriptor).await?;
//!
//! // Request one register, then read the reply.
//! transport.send(&[0x1B, 0x06]).await?;
//! let mut buf = [0u8; 128];
//! let n = transport.receive(&mut buf, Duration::from_secs(5)).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

use serprobe_core::error::{Error, Result};
use serprobe_core::port::{DataBits, Parity, PortDescriptor, StopBits};
use serprobe_core::transport::Transport;

/// Map a parity setting onto the host serial driver.
///
/// Mark and space parity parse at the configuration boundary but have no
/// counterpart in the driver; opening such a descriptor fails here rather
/// than silently substituting a different line discipline.
fn driver_parity(parity: Parity) -> Result<tokio_serial::Parity> {
    match parity {
        Parity::None => Ok(tokio_serial::Parity::None),
        Parity::Even => Ok(tokio_serial::Parity::Even),
        Parity::Odd => Ok(tokio_serial::Parity::Odd),
        Parity::Mark | Parity::Space => Err(Error::Unsupported(format!(
            "parity '{parity}' is not supported by the host serial driver"
        ))),
    }
}

fn driver_data_bits(bits: DataBits) -> tokio_serial::DataBits {
    match bits {
        DataBits::Five => tokio_serial::DataBits::Five,
        DataBits::Six => tokio_serial::DataBits::Six,
        DataBits::Seven => tokio_serial::DataBits::Seven,
        DataBits::Eight => tokio_serial::DataBits::Eight,
    }
}

/// Map a stop-bits setting onto the host serial driver.
///
/// One-and-a-half stop bits has no driver counterpart; see
/// [`driver_parity`].
fn driver_stop_bits(bits: StopBits) -> Result<tokio_serial::StopBits> {
    match bits {
        StopBits::One => Ok(tokio_serial::StopBits::One),
        StopBits::Two => Ok(tokio_serial::StopBits::Two),
        StopBits::OneAndHalf => Err(Error::Unsupported(
            "1.5 stop bits are not supported by the host serial driver".into(),
        )),
    }
}

/// Serial port transport for probe transactions.
///
/// One instance owns one open port for the duration of one probe.
pub struct SerialTransport {
    /// The underlying serial port stream.
    port: Option<SerialStream>,
    /// Full descriptor text for logging and error context.
    descriptor: String,
}

impl SerialTransport {
    /// Open the port named by `descriptor`.
    ///
    /// Fails with [`Error::Connection`] when the device cannot be opened
    /// or configured, and with [`Error::Unsupported`] when the descriptor
    /// asks for a line discipline the host driver cannot express (mark or
    /// space parity, 1.5 stop bits).
    pub async fn open(descriptor: &PortDescriptor) -> Result<Self> {
        tracing::debug!(
            path = %descriptor.path,
            baud = descriptor.baud,
            parity = %descriptor.parity,
            data_bits = %descriptor.data_bits,
            stop_bits = %descriptor.stop_bits,
            "Opening serial port"
        );

        let parity = driver_parity(descriptor.parity)?;
        let stop_bits = driver_stop_bits(descriptor.stop_bits)?;

        let stream = tokio_serial::new(&descriptor.path, descriptor.baud)
            .parity(parity)
            .data_bits(driver_data_bits(descriptor.data_bits))
            .stop_bits(stop_bits)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| {
                tracing::error!(path = %descriptor.path, error = %e, "Failed to open serial port");
                Error::Connection {
                    descriptor: descriptor.to_string(),
                    reason: e.to_string(),
                }
            })?;

        tracing::info!(path = %descriptor.path, baud = descriptor.baud, "Serial port opened");

        Ok(SerialTransport {
            port: Some(stream),
            descriptor: descriptor.to_string(),
        })
    }

    /// Get the connection descriptor this transport was opened with.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(
            descriptor = %self.descriptor,
            bytes = data.len(),
            data = ?data,
            "Sending request"
        );

        port.write_all(data).await.map_err(|e| {
            tracing::error!(descriptor = %self.descriptor, error = %e, "Failed to send request");
            Error::Io(e)
        })?;

        // Flush so the request is on the wire before the read starts.
        port.flush().await.map_err(Error::Io)?;

        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(
            descriptor = %self.descriptor,
            buf_len = buf.len(),
            timeout_ms = timeout.as_millis(),
            "Waiting for reply"
        );

        match tokio::time::timeout(timeout, port.read(buf)).await {
            Ok(Ok(n)) => {
                tracing::trace!(
                    descriptor = %self.descriptor,
                    bytes = n,
                    data = ?&buf[..n],
                    "Received reply"
                );
                Ok(n)
            }
            Ok(Err(e)) => {
                tracing::error!(descriptor = %self.descriptor, error = %e, "Failed to read reply");
                Err(Error::Io(e))
            }
            Err(_) => {
                tracing::trace!(
                    descriptor = %self.descriptor,
                    timeout_ms = timeout.as_millis(),
                    "Timeout waiting for reply"
                );
                Err(Error::Timeout)
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut port) = self.port.take() {
            tracing::debug!(descriptor = %self.descriptor, "Closing serial port");

            // Flush any pending data before the stream is dropped.
            if let Err(e) = port.flush().await {
                tracing::warn!(
                    descriptor = %self.descriptor,
                    error = %e,
                    "Failed to flush before closing (continuing anyway)"
                );
            }

            tracing::info!(descriptor = %self.descriptor, "Serial port closed");
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        if self.port.is_some() {
            tracing::debug!(descriptor = %self.descriptor, "SerialTransport dropped, closing port");
            // The stream closes when dropped.
        }
    }
}
