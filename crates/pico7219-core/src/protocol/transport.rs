//! Transport management
//!
//! Owns the serial connection to one display: its lifecycle and the raw
//! line exchange. Knows nothing about command semantics.

use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Read, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{
    serial::{configure_port, open_port},
    Channel, ProtocolError, ProtocolResult, SerialChannel, DEFAULT_BAUD_RATE,
    DEFAULT_INTER_BYTE_TIMEOUT_MS, DEFAULT_RESPONSE_TIMEOUT_MS, LINE_TERMINATOR,
    MAX_RESPONSE_LEN,
};

/// Transport configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Baud rate
    pub baud_rate: u32,
    /// Per-read timeout once a response has started, in milliseconds
    pub inter_byte_timeout_ms: u64,
    /// Maximum wait for one complete response line, in milliseconds
    pub response_timeout_ms: u64,
    /// Response bytes kept per line; extra bytes are dropped
    pub max_response_len: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            inter_byte_timeout_ms: DEFAULT_INTER_BYTE_TIMEOUT_MS,
            response_timeout_ms: DEFAULT_RESPONSE_TIMEOUT_MS,
            max_response_len: MAX_RESPONSE_LEN,
        }
    }
}

impl TransportConfig {
    /// Per-read timeout as a Duration
    pub fn inter_byte_timeout(&self) -> Duration {
        Duration::from_millis(self.inter_byte_timeout_ms)
    }

    /// Overall response timeout as a Duration
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}

/// Serial connection to one display
///
/// Created unopened; [`init`](Self::init) opens it and [`deinit`](Self::deinit)
/// closes it again, after which it may be re-initialised. Dropping the handle
/// always closes the device.
pub struct Transport {
    /// Device path (e.g. "/dev/ttyACM0")
    path: String,
    /// Line settings and timeouts
    config: TransportConfig,
    /// Open channel, `None` while unopened
    channel: Option<Box<dyn Channel>>,
}

impl Transport {
    /// Create an unopened transport for `path` with default settings
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_config(path, TransportConfig::default())
    }

    /// Create an unopened transport with explicit settings
    pub fn with_config(path: impl Into<String>, config: TransportConfig) -> Self {
        Self {
            path: path.into(),
            config,
            channel: None,
        }
    }

    /// Device path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Transport configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Check whether the device is open
    pub fn is_open(&self) -> bool {
        self.channel.is_some()
    }

    /// Open and configure the serial device
    ///
    /// On failure the transport stays unopened.
    pub fn init(&mut self) -> ProtocolResult<()> {
        if self.is_open() {
            return Err(ProtocolError::AlreadyOpen);
        }

        let mut port = open_port(&self.path, &self.config)?;
        configure_port(port.as_mut(), &self.path, &self.config)?;

        let mut channel = SerialChannel::new(port);
        // Stale bytes would be taken for the first response
        if let Err(e) = channel.clear_input_buffer() {
            debug!("init: could not clear input buffer on {}: {}", self.path, e);
        }

        info!(
            "Opened {} at {} baud",
            channel.name().unwrap_or_else(|| self.path.clone()),
            self.config.baud_rate
        );
        self.channel = Some(Box::new(channel));
        Ok(())
    }

    /// Open the transport over an already established channel
    pub fn attach(&mut self, mut channel: Box<dyn Channel>) -> ProtocolResult<()> {
        if self.is_open() {
            return Err(ProtocolError::AlreadyOpen);
        }
        channel
            .set_timeout(self.config.inter_byte_timeout())
            .map_err(|e| ProtocolError::CannotConfigureDevice {
                path: self.path.clone(),
                source: e.into(),
            })?;
        debug!("Attached channel for {}", self.path);
        self.channel = Some(channel);
        Ok(())
    }

    /// Close the device if it is open
    pub fn deinit(&mut self) {
        if self.channel.take().is_some() {
            info!("Closed {}", self.path);
        }
    }

    fn channel_mut(&mut self) -> ProtocolResult<&mut dyn Channel> {
        match self.channel {
            Some(ref mut channel) => Ok(channel.as_mut()),
            None => Err(ProtocolError::NotOpen),
        }
    }

    /// Drop anything the device sent that nobody read, such as a reply
    /// that arrived after its request timed out
    pub fn discard_input(&mut self) -> ProtocolResult<()> {
        let path = self.path.clone();
        let channel = self.channel_mut()?;
        if let Err(e) = channel.clear_input_buffer() {
            debug!("could not clear input buffer on {}: {}", path, e);
        }
        Ok(())
    }

    /// Write `bytes` followed by a line feed
    pub fn write_line(&mut self, bytes: &[u8]) -> ProtocolResult<()> {
        let channel = self.channel_mut()?;

        let mut line = Vec::with_capacity(bytes.len() + 1);
        line.extend_from_slice(bytes);
        line.push(LINE_TERMINATOR);

        // write_all goes straight to the kernel tty buffer, so no flush (tcdrain)
        channel.write_all(&line).map_err(ProtocolError::Write)?;
        debug!("tx {:?}", String::from_utf8_lossy(bytes));
        Ok(())
    }

    /// Read one response line, without its terminator
    ///
    /// Waits up to the response timeout for the first byte. After that, a
    /// read that times out or returns nothing ends the line. Only the first
    /// `max_response_len` bytes are kept. A line that ends without a line
    /// feed is reported as [`ProtocolError::Timeout`].
    pub fn read_line(&mut self) -> ProtocolResult<Vec<u8>> {
        let max_len = self.config.max_response_len;
        let started = Instant::now();
        let deadline = self.config.response_timeout();
        let channel = self.channel_mut()?;

        let mut line = Vec::with_capacity(max_len);
        let mut received_any = false;
        let mut dropped = 0usize;
        let mut byte = [0u8; 1];

        // Every read is attempted at least once, even with a zero deadline
        let terminated = loop {
            match channel.read(&mut byte) {
                Ok(0) => break false,
                Ok(_) => {
                    received_any = true;
                    if byte[0] == LINE_TERMINATOR {
                        break true;
                    }
                    if line.len() < max_len {
                        line.push(byte[0]);
                    } else {
                        dropped += 1;
                    }
                }
                Err(ref e)
                    if e.kind() == ErrorKind::TimedOut || e.kind() == ErrorKind::WouldBlock =>
                {
                    // Silence before the first byte is the device still working
                    if received_any {
                        break false;
                    }
                }
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(ProtocolError::Read(e)),
            }

            if started.elapsed() >= deadline {
                break false;
            }
        };

        if dropped > 0 {
            warn!(
                "Response longer than {} bytes, dropped {} bytes",
                max_len, dropped
            );
        }

        let text = String::from_utf8_lossy(&line).into_owned();
        if !terminated {
            debug!(
                "rx timed out after {}ms with {:?}",
                started.elapsed().as_millis(),
                text
            );
            return Err(ProtocolError::Timeout { received: text });
        }

        debug!("rx {:?}", text);
        Ok(line)
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.deinit();
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("path", &self.path)
            .field("config", &self.config)
            .field("open", &self.is_open())
            .finish()
    }
}
