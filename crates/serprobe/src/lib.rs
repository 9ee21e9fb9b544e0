//! # serprobe -- one-shot serial request/response probe
//!
//! `serprobe` performs a single request/response transaction against a
//! byte-oriented serial device and decodes a caller-chosen typed value out
//! of the raw reply: write an optional hex-text command, read once, then
//! interpret a span of the reply at a byte offset as an integer, float,
//! raw hex, or escaped text in a chosen byte order.
//!
//! It exists for the long tail of instrumentation gear (power meters,
//! environment sensors, UPSes, PLC front-ends) that answers a fixed query
//! with a fixed binary frame, where a full protocol driver would be
//! overkill.
//!
//! ## Quick Start
//!
//! ```no_run
//! use serprobe::ProbeConfig;
//!
//! #[tokio::main]
//! async fn main() -> serprobe::Result<()> {
//!     // Query a register and read a big-endian uint32 at offset 5.
//!     let config =
//!         ProbeConfig::from_params(&["/dev/ttyS0 9600 N 8 2", "5", "1B06", "uint32", "BE"])?;
//!     let value = serprobe::execute(&config).await?;
//!     println!("{value}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a workspace of focused crates:
//!
//! | Crate                   | Purpose                                      |
//! |-------------------------|----------------------------------------------|
//! | `serprobe-core`         | Types, `Transport` trait, decoder, errors    |
//! | `serprobe-transport`    | Serial port transport (`tokio-serial`)       |
//! | `serprobe-test-harness` | Mock transport for hardware-free testing     |
//! | **`serprobe`**          | This crate -- the probe engine and facade    |
//!
//! The engine operates on the [`Transport`] trait, so the same exchange
//! logic runs against real ports and against canned replies in tests.
//!
//! ## Semantics
//!
//! One call to [`execute`] is exactly one open-(write)-read-decode-close
//! cycle. Nothing is retried, no connection is pooled, and the port is
//! released on every exit path. Overlapping probes against the same
//! physical device must be serialized by the caller.

pub mod probe;

pub use probe::{exchange, execute, run};

pub use serprobe_core::{
    encode_command, ByteOrder, DataBits, Error, Parity, PortDescriptor, ProbeConfig, Result,
    StopBits, Transport, Value, ValueKind,
};
pub use serprobe_transport::SerialTransport;
