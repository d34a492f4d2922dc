//! Configuration file
//!
//! Optional JSON file with the device path and transport settings:
//!
//! ```json
//! { "device": "/dev/ttyACM1", "transport": { "response_timeout_ms": 2000 } }
//! ```

use anyhow::{bail, Context, Result};
use pico7219_core::protocol::TransportConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Device used when neither `--dev` nor the config file names one
pub const DEFAULT_DEVICE: &str = "/dev/ttyACM0";

const CONFIG_DIR_NAME: &str = "pico7219";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub device: Option<String>,
    pub transport: TransportConfig,
}

impl CliConfig {
    /// Load from an explicit path; the file must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        if config.transport.response_timeout_ms == 0 {
            bail!(
                "Invalid config file {}: response_timeout_ms must be at least 1",
                path.display()
            );
        }
        Ok(config)
    }

    /// Load `path` if given, else the per-user file if present, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Device path: explicit choice, then config file, then built-in default
    pub fn device(&self, explicit: Option<&str>) -> String {
        explicit
            .or(self.device.as_deref())
            .unwrap_or(DEFAULT_DEVICE)
            .to_string()
    }
}

/// `<config_dir>/pico7219/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
