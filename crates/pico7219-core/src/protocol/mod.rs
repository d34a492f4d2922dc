//! Serial Protocol Communication
//!
//! Implements the Pico7219 line protocol: one opcode character plus arguments,
//! terminated by a line feed, answered by a single `<code> <LABEL>` status line.

mod client;
pub mod commands;
mod error;
pub mod response;
pub mod serial;
pub mod stream;
mod transport;

pub use commands::{clamp_brightness, Command};
pub use error::{ProtocolError, ProtocolResult};
pub use response::DeviceStatus;
pub use serial::{configure_port, open_port};
pub use stream::{Channel, SerialChannel};
pub use transport::{Transport, TransportConfig};

/// Default baud rate of the display's USB serial link
pub const DEFAULT_BAUD_RATE: u32 = 115200;

/// Per-read timeout once a response has started arriving, in milliseconds
pub const DEFAULT_INTER_BYTE_TIMEOUT_MS: u64 = 500;

/// Upper bound on the wait for one complete response line, in milliseconds
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 5000;

/// Maximum number of response payload bytes kept; the rest of the line is dropped
pub const MAX_RESPONSE_LEN: usize = 29;

/// Terminates both requests and responses
pub const LINE_TERMINATOR: u8 = b'\n';
