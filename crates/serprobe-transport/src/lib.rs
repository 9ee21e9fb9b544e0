//! Transport implementation for serprobe.
//!
//! This crate provides [`SerialTransport`], the concrete implementation of
//! the [`Transport`](serprobe_core::Transport) trait from `serprobe-core`
//! for serial devices. The probe engine only ever sees the trait, so tests
//! substitute the mock transport from `serprobe-test-harness` without
//! touching hardware.

pub mod serial;

pub use serial::SerialTransport;
