//! serprobe-test-harness: Mock transport for serprobe.
//!
//! This crate provides [`MockTransport`] for deterministic unit testing of
//! the probe engine without serial hardware.

pub mod mock_serial;

pub use mock_serial::MockTransport;
