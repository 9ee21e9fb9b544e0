// serprobe -- CLI for one-shot serial request/response probes.
//
// Usage:
//   serprobe "/dev/ttyS0 9600 N 8 2"
//   serprobe "/dev/ttyS0 9600 N 8 2" 0 1B06 uint16 LE
//   serprobe "/dev/ttyUSB0 19200" 5 "" uint32 BE
//   serprobe --mock "/dev/ttyS0" 0 "" raw
//
// The positional parameters mirror the monitoring-item form
// <connection> [offset] [command] [kind] [order]; only the connection
// string is mandatory, and an empty string selects a field's default.
// The decoded value is printed on stdout; any failure goes to stderr
// with a non-zero exit.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use serprobe::{ProbeConfig, Transport};
use serprobe_test_harness::MockTransport;

/// One-shot serial probe: write an optional hex command, read one reply,
/// decode a typed value at a byte offset.
#[derive(Parser)]
#[command(name = "serprobe", version, about)]
struct Cli {
    /// Connection string: "<device> [baud] [parity] [databits] [stopbits]".
    /// Defaults: 9600 baud, no parity, 8 data bits, 2 stop bits.
    connection: String,

    /// Byte offset into the reply where decoding starts.
    offset: Option<String>,

    /// Request payload as hex text (e.g. "1B06"); empty or omitted for a
    /// read-only probe.
    command: Option<String>,

    /// Value kind: float, double, uint16, uint32, uint64, int16, int32,
    /// int64, raw, text.
    kind: Option<String>,

    /// Byte order for numeric kinds: LE or BE.
    order: Option<String>,

    /// Read timeout in seconds.
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,

    /// Reply buffer capacity in bytes; at most this many bytes are read.
    #[arg(long, default_value_t = 128)]
    capacity: usize,

    /// Run against a mock transport with a canned reply instead of a real
    /// port. Useful for verifying parameter parsing and decode settings
    /// without hardware.
    #[arg(long)]
    mock: bool,
}

impl Cli {
    /// Reassemble the positional fields into the ordered parameter list
    /// the configuration boundary validates.
    fn params(&self) -> Vec<String> {
        let mut params = vec![self.connection.clone()];
        for field in [&self.offset, &self.command, &self.kind, &self.order] {
            match field {
                Some(value) => params.push(value.clone()),
                None => break,
            }
        }
        params
    }
}

/// Canned reply served by the mock transport: "hello world".
///
/// Decodes under every kind (11 bytes covers the widest numeric span), so
/// any combination of offset/kind/order can be exercised offline.
const MOCK_REPLY: &[u8] = b"hello world";

async fn run(cli: Cli) -> Result<String> {
    let mut config =
        ProbeConfig::from_params(&cli.params()).context("invalid probe parameters")?;
    config.timeout = Duration::from_secs(cli.timeout_secs);
    config.capacity = cli.capacity;

    if cli.mock {
        let mut mock = MockTransport::new();
        match serprobe::encode_command(&config.command)? {
            Some(request) => mock.expect(&request, MOCK_REPLY),
            None => mock.push_reply(MOCK_REPLY),
        }
        let value = serprobe::run(&mut mock, &config).await?;
        mock.close().await?;
        return Ok(value.to_string());
    }

    let value = serprobe::execute(&config).await?;
    Ok(value)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let value = run(cli).await?;
    println!("{value}");
    Ok(())
}
