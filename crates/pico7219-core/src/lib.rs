//! # Pico7219 Core Library
//!
//! Host-side client for the Pico7219 USB LED-matrix display.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Serial transport management (open, raw 8N1 configuration, bounded reads)
//! - The display command set and its line-oriented wire encoding
//! - Decoding of the device's numeric status responses
//!
//! ## Example
//!
//! ```rust,no_run
//! use pico7219_core::protocol::{Command, Transport};
//!
//! let mut display = Transport::new("/dev/ttyACM0");
//! display.init()?;
//! display.display_text("Hello")?;
//! display.send_and_receive(&Command::ScrollOn)?;
//! # Ok::<(), pico7219_core::protocol::ProtocolError>(())
//! ```

pub mod protocol;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::protocol::{
        Command, DeviceStatus, ProtocolError, ProtocolResult, Transport, TransportConfig,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
