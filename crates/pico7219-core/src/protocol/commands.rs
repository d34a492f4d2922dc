//! Protocol commands
//!
//! Defines the commands understood by the display firmware and their wire
//! encoding: a single opcode character immediately followed by its arguments.

use serde::{Deserialize, Serialize};

/// Lowest brightness level the display accepts
pub const MIN_BRIGHTNESS: i32 = 0;

/// Highest brightness level the display accepts
pub const MAX_BRIGHTNESS: i32 = 15;

/// Commands for the LED-matrix display
///
/// Coordinates are zero-indexed from the bottom-left corner of the virtual
/// display. They are not range-checked here; the device ignores pixels it
/// cannot show, and pixels outside the panel can later be scrolled into view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Turn on one LED ('A' command)
    TurnOn { row: i32, col: i32 },

    /// Turn off one LED ('B' command)
    TurnOff { row: i32, col: i32 },

    /// Append a character to the line buffer ('C' command)
    AppendChar(char),

    /// Replace the line buffer and flush it to the hardware ('D' command)
    SetText(String),

    /// Flush pending changes to the hardware ('F' command)
    Flush,

    /// Start scrolling ('G' command)
    ScrollOn,

    /// Stop scrolling ('H' command)
    ScrollOff,

    /// Set brightness, clamped to 0-15 when encoded ('I' command)
    SetBrightness(i32),

    /// Clear pixels and text, stop scrolling, restore default brightness ('R' command)
    Reset,

    /// Scroll one pixel to the left and flush ('S' command)
    ScrollOneStep,
}

impl Command {
    /// Get the opcode character
    pub fn opcode(&self) -> char {
        match self {
            Command::TurnOn { .. } => 'A',
            Command::TurnOff { .. } => 'B',
            Command::AppendChar(_) => 'C',
            Command::SetText(_) => 'D',
            Command::Flush => 'F',
            Command::ScrollOn => 'G',
            Command::ScrollOff => 'H',
            Command::SetBrightness(_) => 'I',
            Command::Reset => 'R',
            Command::ScrollOneStep => 'S',
        }
    }

    /// Short name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            Command::TurnOn { .. } => "on",
            Command::TurnOff { .. } => "off",
            Command::AppendChar(_) => "char",
            Command::SetText(_) => "string",
            Command::Flush => "flush",
            Command::ScrollOn => "scroll-on",
            Command::ScrollOff => "scroll-off",
            Command::SetBrightness(_) => "brightness",
            Command::Reset => "reset",
            Command::ScrollOneStep => "scroll",
        }
    }

    /// Encode the request line, without the line terminator
    ///
    /// Pixel commands put the column first (`A<col>,<row>`).
    pub fn encode(&self) -> String {
        let mut line = String::new();
        line.push(self.opcode());
        match self {
            Command::TurnOn { row, col } | Command::TurnOff { row, col } => {
                line.push_str(&format!("{},{}", col, row));
            }
            Command::AppendChar(c) => line.push(*c),
            Command::SetText(text) => line.push_str(text),
            Command::SetBrightness(level) => {
                line.push_str(&clamp_brightness(*level).to_string());
            }
            Command::Flush
            | Command::ScrollOn
            | Command::ScrollOff
            | Command::Reset
            | Command::ScrollOneStep => {}
        }
        line
    }
}

/// Clamp a brightness level into the range the device accepts
pub fn clamp_brightness(level: i32) -> u8 {
    level.clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_opcodes() {
        assert_eq!(Command::TurnOn { row: 0, col: 0 }.opcode(), 'A');
        assert_eq!(Command::TurnOff { row: 0, col: 0 }.opcode(), 'B');
        assert_eq!(Command::AppendChar('x').opcode(), 'C');
        assert_eq!(Command::SetText(String::new()).opcode(), 'D');
        assert_eq!(Command::Flush.opcode(), 'F');
        assert_eq!(Command::ScrollOn.opcode(), 'G');
        assert_eq!(Command::ScrollOff.opcode(), 'H');
        assert_eq!(Command::SetBrightness(1).opcode(), 'I');
        assert_eq!(Command::Reset.opcode(), 'R');
        assert_eq!(Command::ScrollOneStep.opcode(), 'S');
    }

    #[test]
    fn test_pixel_commands_put_column_first() {
        assert_eq!(Command::TurnOn { row: 2, col: 7 }.encode(), "A7,2");
        assert_eq!(Command::TurnOff { row: 2, col: 7 }.encode(), "B7,2");
    }

    #[test]
    fn test_pixel_commands_accept_any_coordinates() {
        for (row, col) in [(0, 0), (-1, 5), (7, -40), (1000, 31), (i32::MIN, i32::MAX)] {
            assert_eq!(
                Command::TurnOn { row, col }.encode(),
                format!("A{},{}", col, row)
            );
            assert_eq!(
                Command::TurnOff { row, col }.encode(),
                format!("B{},{}", col, row)
            );
        }
    }

    #[test]
    fn test_brightness_is_clamped() {
        assert_eq!(Command::SetBrightness(-5).encode(), "I0");
        assert_eq!(Command::SetBrightness(0).encode(), "I0");
        assert_eq!(Command::SetBrightness(7).encode(), "I7");
        assert_eq!(Command::SetBrightness(15).encode(), "I15");
        assert_eq!(Command::SetBrightness(99).encode(), "I15");
        assert_eq!(Command::SetBrightness(i32::MIN).encode(), "I0");
    }

    #[test]
    fn test_clamp_brightness() {
        assert_eq!(clamp_brightness(-1), 0);
        assert_eq!(clamp_brightness(8), 8);
        assert_eq!(clamp_brightness(16), 15);
    }

    #[test]
    fn test_text_commands() {
        assert_eq!(Command::AppendChar('x').encode(), "Cx");
        assert_eq!(Command::AppendChar('°').encode(), "C°");
        assert_eq!(Command::SetText("Hello, world".into()).encode(), "DHello, world");
        assert_eq!(Command::SetText(String::new()).encode(), "D");

        let long = "x".repeat(500);
        assert_eq!(Command::SetText(long.clone()).encode(), format!("D{}", long));
    }

    #[test]
    fn test_bare_commands() {
        assert_eq!(Command::Flush.encode(), "F");
        assert_eq!(Command::ScrollOn.encode(), "G");
        assert_eq!(Command::ScrollOff.encode(), "H");
        assert_eq!(Command::Reset.encode(), "R");
        assert_eq!(Command::ScrollOneStep.encode(), "S");
    }

    #[test]
    fn test_command_serde() {
        let cmd = Command::TurnOn { row: 1, col: 2 };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
