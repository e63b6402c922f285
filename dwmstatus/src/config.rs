//! Configuration for the status daemon.
//!
//! Every key is optional; an empty file (or no file at all) yields the
//! built-in defaults.

use dwmstatus_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default tick interval in seconds.
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 5;

/// Default per-command timeout for external collaborators, in seconds.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 2;

/// Default location of the per-interface counter table.
pub const DEFAULT_COUNTER_PATH: &str = "/proc/net/dev";

/// Interfaces monitored when none are configured.
pub const DEFAULT_INTERFACES: &[&str] = &[
    "eth0:", "eth1:", "eth2:", "wlan0:", "wlan1:", "wlan2:", "ppp0:",
];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] dwmstatus_common::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Complete daemon configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Status line settings.
    #[serde(default)]
    pub status: StatusSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Status line settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSettings {
    /// Tick interval in seconds (default: 5).
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: u64,

    /// Monitored interface names as they appear in the counter table,
    /// including the trailing colon (e.g. "eth0:"). A name given without
    /// the colon is normalized on load.
    #[serde(default = "default_interfaces")]
    pub interfaces: Vec<String>,

    /// Path of the counter table (default: "/proc/net/dev").
    #[serde(default = "default_counter_path")]
    pub counter_path: PathBuf,

    /// Timeout applied to each external command, in seconds (default: 2).
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,

    /// Set the X root window name every tick (default: true).
    #[serde(default = "default_true")]
    pub publish_title: bool,
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval(),
            interfaces: default_interfaces(),
            counter_path: default_counter_path(),
            command_timeout_secs: default_command_timeout(),
            publish_title: true,
        }
    }
}

fn default_tick_interval() -> u64 {
    DEFAULT_TICK_INTERVAL_SECS
}

fn default_interfaces() -> Vec<String> {
    DEFAULT_INTERFACES.iter().map(|s| s.to_string()).collect()
}

fn default_counter_path() -> PathBuf {
    PathBuf::from(DEFAULT_COUNTER_PATH)
}

fn default_command_timeout() -> u64 {
    DEFAULT_COMMAND_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

impl StatusConfig {
    /// Load configuration from a JSON5 file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: StatusConfig = dwmstatus_common::load_config(path)?;
        config.finish()
    }

    /// Load configuration from a JSON5 string.
    pub fn from_json5(content: &str) -> Result<Self, ConfigError> {
        let config: StatusConfig = dwmstatus_common::parse_config(content)?;
        config.finish()
    }

    /// Resolve the configuration to use.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used if a file is present there, otherwise built-in defaults apply.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => match dwmstatus_common::default_config_path() {
                Some(path) if path.exists() => Self::load_from_file(path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn finish(mut self) -> Result<Self, ConfigError> {
        self.normalize();
        self.validate()?;
        Ok(self)
    }

    /// Append the table's colon suffix to interface names that lack it.
    pub fn normalize(&mut self) {
        for name in &mut self.status.interfaces {
            if !name.ends_with(':') {
                name.push(':');
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.status.tick_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "tick_interval_secs must be > 0".to_string(),
            ));
        }

        if self.status.command_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "command_timeout_secs must be > 0".to_string(),
            ));
        }

        if self.status.interfaces.is_empty() {
            return Err(ConfigError::Validation(
                "At least one interface must be monitored".to_string(),
            ));
        }

        if let Some(bad) = self.status.interfaces.iter().find(|i| i.trim() == ":") {
            return Err(ConfigError::Validation(format!(
                "Invalid interface name: {:?}",
                bad
            )));
        }

        Ok(())
    }
}

impl StatusSettings {
    /// Tick interval as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    /// External command timeout as a [`Duration`].
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}
