//! Serial port handling
//!
//! Opens the display's USB serial device and puts it into the line mode the
//! firmware expects: raw 8N1, no flow control.

use serialport::{DataBits, ErrorKind, FlowControl, Parity, SerialPort, StopBits};
use std::time::Duration;

use super::{ProtocolError, TransportConfig};

/// Open the serial device read/write
///
/// `serialport` already switches the line to raw mode (no canonical input,
/// echo, signals, output post-processing or break handling) while opening.
/// Failures after the file itself was opened (e.g. the path is not a tty)
/// are reported as [`ProtocolError::CannotConfigureDevice`].
pub fn open_port(
    path: &str,
    config: &TransportConfig,
) -> Result<Box<dyn SerialPort>, ProtocolError> {
    serialport::new(path, config.baud_rate)
        .timeout(config.inter_byte_timeout())
        .open()
        .map_err(|source| classify_open_error(path, source))
}

/// Split `serialport` open errors into "could not open" and "could not configure"
fn classify_open_error(path: &str, source: serialport::Error) -> ProtocolError {
    let path = path.to_string();
    match source.kind() {
        ErrorKind::NoDevice | ErrorKind::Io(_) => ProtocolError::CannotOpenDevice { path, source },
        // termios/ioctl failures (ENOTTY and friends) surface as Unknown
        ErrorKind::InvalidInput | ErrorKind::Unknown => {
            ProtocolError::CannotConfigureDevice { path, source }
        }
    }
}

/// Configure an open port for the display protocol
pub fn configure_port(
    port: &mut dyn SerialPort,
    path: &str,
    config: &TransportConfig,
) -> Result<(), ProtocolError> {
    apply_line_settings(port, config.baud_rate, config.inter_byte_timeout()).map_err(|source| {
        ProtocolError::CannotConfigureDevice {
            path: path.to_string(),
            source,
        }
    })
}

fn apply_line_settings(
    port: &mut dyn SerialPort,
    baud_rate: u32,
    timeout: Duration,
) -> serialport::Result<()> {
    // Standard 8N1 configuration
    port.set_baud_rate(baud_rate)?;
    port.set_data_bits(DataBits::Eight)?;
    port.set_parity(Parity::None)?;
    port.set_stop_bits(StopBits::One)?;
    port.set_flow_control(FlowControl::None)?;
    port.set_timeout(timeout)?;
    Ok(())
}
