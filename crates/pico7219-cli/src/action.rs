//! The one display action an invocation performs

use pico7219_core::protocol::Command;

use crate::validation::Pixel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Reset,
    Text(String),
    Char(char),
    Flush,
    ScrollOn,
    ScrollOff,
    ScrollStep,
    On(Pixel),
    Off(Pixel),
    Intensity(i32),
}

impl Action {
    /// The protocol command carrying out this action
    pub fn command(&self) -> Command {
        match self {
            Action::Reset => Command::Reset,
            Action::Text(text) => Command::SetText(text.clone()),
            Action::Char(c) => Command::AppendChar(*c),
            Action::Flush => Command::Flush,
            Action::ScrollOn => Command::ScrollOn,
            Action::ScrollOff => Command::ScrollOff,
            Action::ScrollStep => Command::ScrollOneStep,
            Action::On(p) => Command::TurnOn {
                row: p.row,
                col: p.col,
            },
            Action::Off(p) => Command::TurnOff {
                row: p.row,
                col: p.col,
            },
            Action::Intensity(level) => Command::SetBrightness(*level),
        }
    }
}
