//! Configuration system

use std::path::Path;

use log::{info, warn};
pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    /// Load from file, falling back to defaults when the file does not exist
    ///
    /// A file that exists but fails to parse is still an error.
    fn load_or_default(path: &str) -> Result<Self, ConfigError> {
        if Path::new(path).exists() {
            let config = Self::load_from_file(path)?;
            info!("Loaded configuration from {}", path);
            Ok(config)
        } else {
            warn!("Configuration file {} not found, using defaults", path);
            Ok(Self::default())
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value was parsed but is out of range
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Kernel settings shared by every game built on the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scheduler ticks per second
    pub tick_rate_hz: f64,
    /// Logical playfield width in world units
    pub viewport_width: f64,
    /// Logical playfield height in world units
    pub viewport_height: f64,
    /// Log level name applied once config is loaded, unless `RUST_LOG` is set
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 120.0,
            viewport_width: 1280.0,
            viewport_height: 680.0,
            log_filter: "info".to_string(),
        }
    }
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Check ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(ConfigError::Invalid {
                field: "tick_rate_hz",
                reason: format!("must be positive, got {}", self.tick_rate_hz),
            });
        }
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "viewport",
                reason: format!(
                    "must have a positive size, got {}x{}",
                    self.viewport_width, self.viewport_height
                ),
            });
        }
        Ok(())
    }
}
