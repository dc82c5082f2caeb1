use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const KEYS: [&str; 3] = ["settle_ms", "step", "baseline_threshold"];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Inactivity window before a slider change counts as settled.
    pub settle_ms: u64,
    /// Slider increment per key press.
    pub step: u8,
    pub baseline_threshold: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settle_ms: 100,
            step: 1,
            baseline_threshold: 128,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = get_config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Missing file means defaults; a file that exists but does not parse
    /// is an error.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        if config.step == 0 {
            return Err(ConfigError::InvalidValue {
                key: "step".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = get_config_file_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content =
            toml::to_string(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(&config_path, content).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "settle_ms" => Ok(self.settle_ms.to_string()),
            "step" => Ok(self.step.to_string()),
            "baseline_threshold" => Ok(self.baseline_threshold.to_string()),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "settle_ms" => self.settle_ms = value.trim().parse().map_err(|_| invalid())?,
            "step" => {
                let step: u8 = value.trim().parse().map_err(|_| invalid())?;
                if step == 0 {
                    return Err(invalid());
                }
                self.step = step;
            }
            "baseline_threshold" => {
                self.baseline_threshold = value.trim().parse().map_err(|_| invalid())?
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn get_config_file_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;

    Ok(config_dir.join("adjust").join("config.toml"))
}

#[derive(Debug)]
pub enum ConfigError {
    ConfigDirNotFound,
    UnknownKey(String),
    InvalidValue { key: String, value: String },
    ReadError(String),
    WriteError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigDirNotFound => {
                write!(f, "Could not find config directory")
            }
            ConfigError::UnknownKey(key) => {
                write!(
                    f,
                    "Unknown configuration key '{}'. Supported keys: {}",
                    key,
                    KEYS.join(", ")
                )
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{}' for '{}'", value, key)
            }
            ConfigError::ReadError(msg) => {
                write!(f, "Failed to read config file: {}", msg)
            }
            ConfigError::WriteError(msg) => {
                write!(f, "Failed to write config file: {}", msg)
            }
            ConfigError::ParseError(msg) => {
                write!(f, "Failed to parse config file: {}", msg)
            }
            ConfigError::SerializeError(msg) => {
                write!(f, "Failed to serialize config: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
