use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default local endpoint of the response service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/get_response";

/// Application configuration, loaded from `~/.schemer/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL the user turns are POSTed to.
    pub endpoint: String,

    /// Delay between typewriter steps, in milliseconds.
    pub typing_interval_ms: u64,

    /// HTTP request timeout, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            typing_interval_ms: 2,
            request_timeout_secs: 60,
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults when missing.
    pub fn load() -> Result<Self> {
        let home = Self::schemer_home()?;
        fs::create_dir_all(&home).context("Failed to create .schemer directory")?;

        let config_path = home.join("config.toml");
        if config_path.exists() {
            let content =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::schemer_home()?.join("config.toml");
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content).context("Failed to write config file")?;
        Ok(())
    }

    pub fn schemer_home() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".schemer"))
    }

    /// Diagnostics log file (the TUI cannot log to stdout).
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::schemer_home()?.join("schemer.log"))
    }

    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
