//! Serial line settings and the connection descriptor.
//!
//! A probe names its port with a single space-separated connection string:
//!
//! ```text
//! <device> [baud] [parity] [databits] [stopbits]
//! ```
//!
//! Only the device is mandatory. Absent fields take the conventional
//! defaults for instrumentation gear (9600 baud, no parity, 8 data bits,
//! 2 stop bits); present-but-invalid fields are rejected. Parsing happens
//! once here; the rest of the library only ever sees the typed
//! [`PortDescriptor`].

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Default baud rate when the connection string omits one.
pub const BAUD_DEFAULT: u32 = 9600;

/// Default number of data bits when the connection string omits one.
pub const DATA_BITS_DEFAULT: DataBits = DataBits::Eight;

/// Parity checking mode.
///
/// All five conventional modes parse; whether the host serial driver can
/// actually produce mark/space parity is decided when the port is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
    Mark,
    Space,
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Parity::None => 'N',
            Parity::Even => 'E',
            Parity::Odd => 'O',
            Parity::Mark => 'M',
            Parity::Space => 'S',
        };
        write!(f, "{c}")
    }
}

impl FromStr for Parity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Parity::None),
            "E" => Ok(Parity::Even),
            "O" => Ok(Parity::Odd),
            "M" => Ok(Parity::Mark),
            "S" => Ok(Parity::Space),
            other => Err(Error::InvalidParameter(format!(
                "failed to parse parity from '{other}', expected 'N','E','O','M' or 'S'"
            ))),
        }
    }
}

/// Number of data bits per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

impl fmt::Display for DataBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = match self {
            DataBits::Five => 5,
            DataBits::Six => 6,
            DataBits::Seven => 7,
            DataBits::Eight => 8,
        };
        write!(f, "{n}")
    }
}

impl FromStr for DataBits {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5" => Ok(DataBits::Five),
            "6" => Ok(DataBits::Six),
            "7" => Ok(DataBits::Seven),
            "8" => Ok(DataBits::Eight),
            other => Err(Error::InvalidParameter(format!(
                "failed to parse databits size from '{other}', expected 5, 6, 7 or 8"
            ))),
        }
    }
}

/// Number of stop bits per character.
///
/// `15` in a connection string means one-and-a-half stop bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
    OneAndHalf,
}

impl fmt::Display for StopBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopBits::One => "1",
            StopBits::Two => "2",
            StopBits::OneAndHalf => "15",
        };
        write!(f, "{s}")
    }
}

impl FromStr for StopBits {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(StopBits::One),
            "2" => Ok(StopBits::Two),
            "15" => Ok(StopBits::OneAndHalf),
            other => Err(Error::InvalidParameter(format!(
                "failed to parse stopbits from '{other}', expected '1', '2' or '15'"
            ))),
        }
    }
}

/// Typed serial connection descriptor.
///
/// # Example
///
/// ```
/// use serprobe_core::port::{DataBits, Parity, PortDescriptor, StopBits};
///
/// let d: PortDescriptor = "/dev/ttyS0 19200 E 7 1".parse().unwrap();
/// assert_eq!(d.path, "/dev/ttyS0");
/// assert_eq!(d.baud, 19200);
/// assert_eq!(d.parity, Parity::Even);
/// assert_eq!(d.data_bits, DataBits::Seven);
/// assert_eq!(d.stop_bits, StopBits::One);
///
/// // Only the device is mandatory.
/// let d: PortDescriptor = "/dev/ttyUSB0".parse().unwrap();
/// assert_eq!(d.baud, 9600);
/// assert_eq!(d.stop_bits, StopBits::Two);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortDescriptor {
    /// Device path (e.g. `/dev/ttyS0` on Linux, `COM3` on Windows).
    pub path: String,
    /// Baud rate.
    pub baud: u32,
    /// Parity checking mode.
    pub parity: Parity,
    /// Data bits per character.
    pub data_bits: DataBits,
    /// Stop bits per character.
    pub stop_bits: StopBits,
}

impl PortDescriptor {
    /// Descriptor for `path` with all other settings at their defaults.
    pub fn new(path: impl Into<String>) -> Self {
        PortDescriptor {
            path: path.into(),
            baud: BAUD_DEFAULT,
            parity: Parity::None,
            data_bits: DATA_BITS_DEFAULT,
            stop_bits: StopBits::Two,
        }
    }
}

impl fmt::Display for PortDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.path, self.baud, self.parity, self.data_bits, self.stop_bits
        )
    }
}

impl FromStr for PortDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split(' ');
        let path = match fields.next() {
            Some(p) if !p.is_empty() => p,
            _ => {
                return Err(Error::InvalidParameter(
                    "connection string is missing the device".into(),
                ))
            }
        };

        let mut descriptor = PortDescriptor::new(path);

        if let Some(field) = fields.next() {
            descriptor.baud = field.parse().map_err(|_| {
                Error::InvalidParameter(format!("failed to parse baudrate of '{field}'"))
            })?;
        }
        if let Some(field) = fields.next() {
            descriptor.parity = field.parse()?;
        }
        if let Some(field) = fields.next() {
            descriptor.data_bits = field.parse()?;
        }
        if let Some(field) = fields.next() {
            descriptor.stop_bits = field.parse()?;
        }

        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_only_takes_defaults() {
        let d: PortDescriptor = "/dev/ttyS0".parse().unwrap();
        assert_eq!(d.path, "/dev/ttyS0");
        assert_eq!(d.baud, 9600);
        assert_eq!(d.parity, Parity::None);
        assert_eq!(d.data_bits, DataBits::Eight);
        assert_eq!(d.stop_bits, StopBits::Two);
    }

    #[test]
    fn full_connection_string() {
        let d: PortDescriptor = "COM3 115200 O 7 1".parse().unwrap();
        assert_eq!(d.path, "COM3");
        assert_eq!(d.baud, 115_200);
        assert_eq!(d.parity, Parity::Odd);
        assert_eq!(d.data_bits, DataBits::Seven);
        assert_eq!(d.stop_bits, StopBits::One);
    }

    #[test]
    fn mark_space_and_one_and_half_parse() {
        let d: PortDescriptor = "/dev/ttyS1 9600 M 8 15".parse().unwrap();
        assert_eq!(d.parity, Parity::Mark);
        assert_eq!(d.stop_bits, StopBits::OneAndHalf);

        let d: PortDescriptor = "/dev/ttyS1 9600 S".parse().unwrap();
        assert_eq!(d.parity, Parity::Space);
    }

    #[test]
    fn empty_connection_string_rejected() {
        assert!("".parse::<PortDescriptor>().is_err());
    }

    #[test]
    fn bad_baud_rejected() {
        let err = "/dev/ttyS0 fast".parse::<PortDescriptor>().unwrap_err();
        assert!(err.to_string().contains("baudrate"));
        assert!(err.to_string().contains("fast"));
    }

    #[test]
    fn bad_parity_rejected() {
        let err = "/dev/ttyS0 9600 X".parse::<PortDescriptor>().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert!(err.to_string().contains('X'));
    }

    #[test]
    fn bad_data_bits_rejected() {
        assert!("/dev/ttyS0 9600 N 9".parse::<PortDescriptor>().is_err());
    }

    #[test]
    fn bad_stop_bits_rejected() {
        let err = "/dev/ttyS0 9600 N 8 3".parse::<PortDescriptor>().unwrap_err();
        assert!(err.to_string().contains("stopbits"));
    }

    #[test]
    fn display_round_trips() {
        let d: PortDescriptor = "/dev/ttyUSB0 19200 E 7 15".parse().unwrap();
        assert_eq!(d.to_string(), "/dev/ttyUSB0 19200 E 7 15");
        assert_eq!(d.to_string().parse::<PortDescriptor>().unwrap(), d);
    }
}
