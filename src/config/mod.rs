//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/numint/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::quadrature::Method;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for integration
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Default values for integration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default integration method
    #[serde(default = "default_method")]
    pub method: String,

    /// Default number of sample points
    #[serde(default = "default_num_points")]
    pub num_points: usize,

    /// Default CLI output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Random source for Monte Carlo ("pseudo" or "seeded")
    #[serde(default = "default_rng")]
    pub rng: String,

    /// Seed used when `rng` is "seeded"
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Browser origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

// Default value functions for serde
fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}
fn default_num_points() -> usize {
    DEFAULT_NUM_POINTS
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_rng() -> String {
    DEFAULT_RNG.to_string()
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_allowed_origins() -> Vec<String> {
    vec![DEFAULT_ALLOWED_ORIGIN.to_string()]
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            num_points: default_num_points(),
            format: default_format(),
            rng: default_rng(),
            seed: default_seed(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "method"] => Some(self.defaults.method.clone()),
            ["defaults", "num_points"] => Some(self.defaults.num_points.to_string()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),
            ["defaults", "rng"] => Some(self.defaults.rng.clone()),
            ["defaults", "seed"] => Some(self.defaults.seed.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),
            ["server", "allowed_origins"] => Some(self.server.allowed_origins.join(",")),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "method"] => {
                let method = Method::from_str(value).map_err(Error::Config)?;
                self.defaults.method = method.to_string();
            }
            ["defaults", "num_points"] => {
                self.defaults.num_points = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid num_points value: {}", value))
                })?;
            }
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }
            ["defaults", "rng"] => {
                self.defaults.rng = value.to_string();
            }
            ["defaults", "seed"] => {
                self.defaults.seed = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid seed value: {}", value)))?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }
            ["server", "allowed_origins"] => {
                self.server.allowed_origins = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.method",
            "defaults.num_points",
            "defaults.format",
            "defaults.rng",
            "defaults.seed",
            "server.host",
            "server.port",
            "server.allowed_origins",
        ]
    }

    /// Default integration method, parsed
    pub fn default_method(&self) -> Result<Method> {
        Method::from_str(&self.defaults.method).map_err(Error::Config)
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
