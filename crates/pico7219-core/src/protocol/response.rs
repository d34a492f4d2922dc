//! Response decoding
//!
//! The device answers every request with one line: a decimal status code,
//! then the code's label and possibly more text (`0 OK`, `4 TOOLONG`).
//! Only the leading number is significant.

use std::fmt;

use super::{ProtocolError, ProtocolResult};

/// Status codes reported by the display firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// Command accepted
    Ok,
    /// Input had no command character
    TooShort,
    /// Too many or too few arguments
    BadArgs,
    /// Unknown command character
    BadCommand,
    /// Input too long, e.g. too much text for the line buffer
    TooLong,
}

impl DeviceStatus {
    /// Map a numeric status code to a known status
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(DeviceStatus::Ok),
            1 => Some(DeviceStatus::TooShort),
            2 => Some(DeviceStatus::BadArgs),
            3 => Some(DeviceStatus::BadCommand),
            4 => Some(DeviceStatus::TooLong),
            _ => None,
        }
    }

    /// Numeric code as sent on the wire
    pub fn code(self) -> u8 {
        match self {
            DeviceStatus::Ok => 0,
            DeviceStatus::TooShort => 1,
            DeviceStatus::BadArgs => 2,
            DeviceStatus::BadCommand => 3,
            DeviceStatus::TooLong => 4,
        }
    }

    /// Label the firmware sends after the code
    pub fn label(self) -> &'static str {
        match self {
            DeviceStatus::Ok => "OK",
            DeviceStatus::TooShort => "TOOSHORT",
            DeviceStatus::BadArgs => "ARGS",
            DeviceStatus::BadCommand => "BADCMD",
            DeviceStatus::TooLong => "TOOLONG",
        }
    }

    /// Convert into the client-facing result
    ///
    /// Codes 1-3 collapse into [`ProtocolError::Internal`], which still carries
    /// the exact status.
    pub fn into_result(self) -> ProtocolResult<()> {
        match self {
            DeviceStatus::Ok => Ok(()),
            DeviceStatus::TooShort | DeviceStatus::BadArgs | DeviceStatus::BadCommand => {
                Err(ProtocolError::Internal(self))
            }
            DeviceStatus::TooLong => Err(ProtocolError::TooLong),
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.label())
    }
}

/// Extract the leading decimal integer of a response line
///
/// Accepts leading whitespace and an optional sign; anything after the
/// digits is ignored. Returns `None` if there are no digits.
pub fn parse_status_code(line: &[u8]) -> Option<i64> {
    let mut rest = line;
    while let Some((first, tail)) = rest.split_first() {
        if first.is_ascii_whitespace() {
            rest = tail;
        } else {
            break;
        }
    }

    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for b in &rest[..digits] {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    Some(if negative { -value } else { value })
}

/// Decode a response line (without its terminator) into a result
pub fn decode(line: &[u8]) -> ProtocolResult<()> {
    match parse_status_code(line).and_then(DeviceStatus::from_code) {
        Some(status) => status.into_result(),
        None => Err(ProtocolError::UnknownResponse(
            String::from_utf8_lossy(line).into_owned(),
        )),
    }
}
