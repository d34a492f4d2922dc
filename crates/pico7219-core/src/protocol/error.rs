//! Protocol errors

use thiserror::Error;

use super::DeviceStatus;

/// Outcome of a protocol operation
pub type ProtocolResult<T = ()> = Result<T, ProtocolError>;

/// Errors that can occur during protocol communication
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Can't open serial device {path}: {source}")]
    CannotOpenDevice {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Can't configure serial device {path}: {source}")]
    CannotConfigureDevice {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Serial device is not open")]
    NotOpen,

    #[error("Serial device is already open")]
    AlreadyOpen,

    #[error("Write to serial device failed: {0}")]
    Write(#[source] std::io::Error),

    #[error("Read from serial device failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("Timed out waiting for response (received {received:?})")]
    Timeout { received: String },

    /// Device rejected the command with code 1, 2 or 3
    #[error("Device reported an internal error ({0})")]
    Internal(DeviceStatus),

    #[error("String too long")]
    TooLong,

    #[error("Unknown response from device: {0:?}")]
    UnknownResponse(String),
}

impl ProtocolError {
    /// Status reported by the device, if this error came from a device response
    pub fn device_status(&self) -> Option<DeviceStatus> {
        match self {
            ProtocolError::Internal(status) => Some(*status),
            ProtocolError::TooLong => Some(DeviceStatus::TooLong),
            _ => None,
        }
    }

    /// Whether the serial link itself failed (as opposed to the device answering)
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            ProtocolError::CannotOpenDevice { .. }
                | ProtocolError::CannotConfigureDevice { .. }
                | ProtocolError::NotOpen
                | ProtocolError::AlreadyOpen
                | ProtocolError::Write(_)
                | ProtocolError::Read(_)
                | ProtocolError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_status_of_collapsed_errors() {
        let err = ProtocolError::Internal(DeviceStatus::BadCommand);
        assert_eq!(err.device_status(), Some(DeviceStatus::BadCommand));
        assert!(!err.is_transport_error());

        assert_eq!(
            ProtocolError::TooLong.device_status(),
            Some(DeviceStatus::TooLong)
        );
        assert_eq!(
            ProtocolError::UnknownResponse(String::new()).device_status(),
            None
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ProtocolError::TooLong.to_string(), "String too long");
        let err = ProtocolError::Timeout {
            received: "0 O".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Timed out waiting for response (received \"0 O\")"
        );
        assert!(err.is_transport_error());
    }

    #[test]
    fn test_open_error_names_device() {
        let err = ProtocolError::CannotOpenDevice {
            path: "/dev/ttyACM9".to_string(),
            source: serialport::Error::new(serialport::ErrorKind::NoDevice, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Can't open serial device /dev/ttyACM9"));
        assert!(msg.contains("missing"));
    }
}
