//! # pico7219
//!
//! Command-line tool for Pico7219 USB LED-matrix displays. Each invocation
//! opens the device, sends one command and reports the device's answer.
//!
//! ```bash
//! pico7219 --text "Hello" && pico7219 --scroll-on
//! pico7219 --dev /dev/ttyACM1 --on 0,3
//! pico7219 --intensity 4
//! ```

use anyhow::{bail, Result};
use clap::{ArgAction, ArgGroup, CommandFactory, FromArgMatches, Parser};
use pico7219_core::protocol::Transport;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod action;
mod config;
mod validation;

use action::Action;
use config::CliConfig;
use validation::{parse_pixel, Pixel};

/// Control a Pico7219 LED-matrix display over USB serial
#[derive(Parser, Debug)]
#[command(name = "pico7219")]
#[command(about = "Control a Pico7219 LED-matrix display over USB serial", long_about = None)]
#[command(version, disable_version_flag = true)]
#[command(group(ArgGroup::new("action").multiple(false)))]
struct Cli {
    /// Turn on the LED
    #[arg(short = 'a', long = "on", value_name = "ROW,COL", value_parser = parse_pixel,
          allow_hyphen_values = true, group = "action")]
    on: Option<Pixel>,

    /// Turn off the LED
    #[arg(short = 'b', long = "off", value_name = "ROW,COL", value_parser = parse_pixel,
          allow_hyphen_values = true, group = "action")]
    off: Option<Pixel>,

    /// Stop scrolling
    #[arg(short = 'c', long, group = "action")]
    scroll_off: bool,

    /// USB serial device
    #[arg(short = 'd', long = "dev", value_name = "DEVICE")]
    dev: Option<String>,

    /// Flush changes to display
    #[arg(short = 'f', long, group = "action")]
    flush: bool,

    /// Set display brightness
    #[arg(short = 'i', long, value_name = "0..15", allow_hyphen_values = true,
          value_parser = clap::value_parser!(i32).range(0..=15), group = "action")]
    intensity: Option<i32>,

    /// Append one character to the displayed text
    #[arg(short = 'p', long = "char", value_name = "CHAR", group = "action")]
    character: Option<char>,

    /// Reset display
    #[arg(short = 'r', long, group = "action")]
    reset: bool,

    /// Start scrolling
    #[arg(short = 's', long, group = "action")]
    scroll_on: bool,

    /// Scroll one pixel to the left
    #[arg(short = 'S', long, group = "action")]
    scroll_step: bool,

    /// Display text string
    #[arg(short = 't', long, value_name = "STRING", group = "action")]
    text: Option<String>,

    /// Configuration file (default: <config dir>/pico7219/config.json)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Response timeout in milliseconds
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Log protocol traffic to stderr
    #[arg(long)]
    debug: bool,
}

impl Cli {
    /// Parse the process arguments, with `-v` as the version flag
    fn parse_args() -> Self {
        let matches = Self::command()
            .arg(
                clap::Arg::new("version")
                    .short('v')
                    .long("version")
                    .help("Show version")
                    .action(ArgAction::Version),
            )
            .get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    fn action(&self) -> Option<Action> {
        if self.reset {
            Some(Action::Reset)
        } else if let Some(text) = &self.text {
            Some(Action::Text(text.clone()))
        } else if let Some(c) = self.character {
            Some(Action::Char(c))
        } else if self.flush {
            Some(Action::Flush)
        } else if self.scroll_on {
            Some(Action::ScrollOn)
        } else if self.scroll_off {
            Some(Action::ScrollOff)
        } else if self.scroll_step {
            Some(Action::ScrollStep)
        } else if let Some(p) = self.on {
            Some(Action::On(p))
        } else if let Some(p) = self.off {
            Some(Action::Off(p))
        } else {
            self.intensity.map(Action::Intensity)
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let Some(action) = cli.action() else {
        bail!("no action specified");
    };

    let config = CliConfig::load(cli.config.as_deref())?;
    let device = config.device(cli.dev.as_deref());
    let mut transport_config = config.transport.clone();
    if let Some(ms) = cli.timeout {
        transport_config.response_timeout_ms = ms;
    }

    debug!("Using {} for {:?}", device, action);
    let mut transport = Transport::with_config(device, transport_config);
    transport.init()?;
    transport.send_and_receive(&action.command())?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pico7219: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("pico7219").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_actions() {
        assert_eq!(parse(&["-r"]).unwrap().action(), Some(Action::Reset));
        assert_eq!(
            parse(&["-t", "Hello"]).unwrap().action(),
            Some(Action::Text("Hello".to_string()))
        );
        assert_eq!(
            parse(&["--on", "1,2"]).unwrap().action(),
            Some(Action::On(Pixel { row: 1, col: 2 }))
        );
        assert_eq!(
            parse(&["-b", "-1,2"]).unwrap().action(),
            Some(Action::Off(Pixel { row: -1, col: 2 }))
        );
        assert_eq!(parse(&["-i", "15"]).unwrap().action(), Some(Action::Intensity(15)));
        assert_eq!(parse(&["-p", "x"]).unwrap().action(), Some(Action::Char('x')));
        assert_eq!(parse(&["-S"]).unwrap().action(), Some(Action::ScrollStep));
        assert_eq!(parse(&["-d", "/dev/ttyUSB0"]).unwrap().action(), None);
    }

    #[test]
    fn test_brightness_out_of_range_is_rejected() {
        assert!(parse(&["-i", "16"]).is_err());
        assert!(parse(&["-i", "-1"]).is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(parse(&["--timeout", "0", "-r"]).is_err());
        assert_eq!(parse(&["--timeout", "1", "-r"]).unwrap().timeout, Some(1));
    }

    #[test]
    fn test_actions_are_exclusive() {
        assert!(parse(&["--reset", "--flush"]).is_err());
        assert!(parse(&["--text", "a", "--on", "1,1"]).is_err());
    }

    #[test]
    fn test_no_action_is_an_error() {
        let cli = parse(&["--dev", "/dev/pico7219-does-not-exist"]).unwrap();
        let err = run(&cli).unwrap_err();
        assert_eq!(err.to_string(), "no action specified");
    }
}
