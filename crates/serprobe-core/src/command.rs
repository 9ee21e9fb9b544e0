//! Request command encoder.
//!
//! A probe's request is given as hex text: each pair of hex digits is one
//! literal byte to transmit. An empty request means a read-only probe that
//! listens for whatever the device sends on its own.

use crate::error::{Error, Result};

/// Encode a hex-text request into the raw bytes to transmit.
///
/// Returns `None` for an empty request (read-only probe). Fails with
/// [`Error::MalformedCommand`] on an odd number of digits or any non-hex
/// character; encoding happens before any transport I/O, so a malformed
/// request never touches the port.
///
/// # Example
///
/// ```
/// use serprobe_core::command::encode_command;
///
/// assert_eq!(encode_command("").unwrap(), None);
/// assert_eq!(
///     encode_command("1B0631").unwrap(),
///     Some(vec![0x1B, 0x06, 0x31])
/// );
/// assert!(encode_command("ZZ").is_err());
/// ```
pub fn encode_command(text: &str) -> Result<Option<Vec<u8>>> {
    if text.is_empty() {
        return Ok(None);
    }
    let bytes = hex::decode(text).map_err(|_| Error::MalformedCommand {
        command: text.to_string(),
    })?;
    Ok(Some(bytes))
}
