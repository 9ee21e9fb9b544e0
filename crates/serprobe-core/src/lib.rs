//! serprobe-core: Core traits, types, and the typed response decoder for
//! serprobe.
//!
//! This crate defines the transport-agnostic pieces of a one-shot serial
//! probe. The real serial transport and the probe engine build on these
//! types without this crate knowing anything about the underlying driver.
//!
//! # Key types
//!
//! - [`Transport`] -- byte-level communication channel
//! - [`ProbeConfig`] -- everything one transaction needs
//! - [`ValueKind`] / [`ByteOrder`] -- requested interpretation of the reply
//! - [`decode`](decode::decode) -- the bounds-checked typed decoder
//! - [`Error`] / [`Result`] -- error handling

pub mod command;
pub mod config;
pub mod decode;
pub mod error;
pub mod port;
pub mod transport;
pub mod value;

// Re-export key types at crate root for ergonomic `use serprobe_core::*`.
pub use command::encode_command;
pub use config::ProbeConfig;
pub use error::{Error, Result};
pub use port::{DataBits, Parity, PortDescriptor, StopBits};
pub use transport::Transport;
pub use value::{ByteOrder, Value, ValueKind};
