//! Command execution
//!
//! Every display operation is one synchronous round trip through
//! [`Transport::send_and_receive`]. The transport must already be open;
//! nothing here opens or closes it.

use tracing::debug;

use super::{response, Command, ProtocolError, ProtocolResult, Transport};

impl Transport {
    /// Send a command and wait for the device's status line
    ///
    /// A failed round trip leaves the transport open, so the call can be retried.
    pub fn send_and_receive(&mut self, command: &Command) -> ProtocolResult<()> {
        if !self.is_open() {
            return Err(ProtocolError::NotOpen);
        }

        let request = command.encode();
        debug!("send_and_receive: {} {:?}", command.name(), request);

        self.discard_input()?;
        self.write_line(request.as_bytes())?;
        let line = self.read_line()?;
        let result = response::decode(&line);
        if let Err(ref e) = result {
            debug!("send_and_receive: {} failed: {}", command.name(), e);
        }
        result
    }

    /// Replace the displayed text
    pub fn display_text(&mut self, text: &str) -> ProtocolResult<()> {
        self.send_and_receive(&Command::SetText(text.to_string()))
    }

    /// Append one character to the displayed text
    pub fn append_char(&mut self, c: char) -> ProtocolResult<()> {
        self.send_and_receive(&Command::AppendChar(c))
    }

    /// Reset the display: all LEDs off, scrolling stopped, default brightness
    pub fn reset(&mut self) -> ProtocolResult<()> {
        self.send_and_receive(&Command::Reset)
    }

    /// Flush pending pixel changes to the hardware
    pub fn flush(&mut self) -> ProtocolResult<()> {
        self.send_and_receive(&Command::Flush)
    }

    /// Start scrolling
    pub fn scroll_on(&mut self) -> ProtocolResult<()> {
        self.send_and_receive(&Command::ScrollOn)
    }

    /// Stop scrolling
    pub fn scroll_off(&mut self) -> ProtocolResult<()> {
        self.send_and_receive(&Command::ScrollOff)
    }

    /// Scroll one pixel to the left
    pub fn scroll_step(&mut self) -> ProtocolResult<()> {
        self.send_and_receive(&Command::ScrollOneStep)
    }

    /// Turn on the LED at `row`, `col`
    pub fn turn_on(&mut self, row: i32, col: i32) -> ProtocolResult<()> {
        self.send_and_receive(&Command::TurnOn { row, col })
    }

    /// Turn off the LED at `row`, `col`
    pub fn turn_off(&mut self, row: i32, col: i32) -> ProtocolResult<()> {
        self.send_and_receive(&Command::TurnOff { row, col })
    }

    /// Set brightness; values outside 0-15 are clamped
    pub fn set_brightness(&mut self, level: i32) -> ProtocolResult<()> {
        self.send_and_receive(&Command::SetBrightness(level))
    }
}
