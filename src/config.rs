//! Configuration management for phishscout
//!
//! All configuration is loaded from `./config/phishscout.toml`.
//! No hardcoded defaults exist in source code - all defaults are in the
//! config template.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::features::ExtractorKind;

/// Configuration file path relative to working directory
pub const CONFIG_PATH: &str = "./config/phishscout.toml";

/// Default configuration file content - this is the ONLY place defaults exist
pub const DEFAULT_CONFIG: &str = include_str!("../config/phishscout.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found at {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid URL in '{field}': {url}")]
    InvalidUrl { field: String, url: String },

    #[error("Configuration field '{field}' cannot be empty")]
    EmptyRequired { field: String },

    #[error("Timeout '{field}' must be greater than zero")]
    ZeroTimeout { field: String },

    #[error("At least one [[models]] entry must be configured")]
    NoModels,
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub signals: SignalsConfig,
    pub models: Vec<ModelConfig>,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

/// External signal collector configuration. Every collector makes a single
/// attempt bounded by its own timeout.
#[derive(Debug, Clone, Deserialize)]
pub struct SignalsConfig {
    pub dns_timeout_secs: u64,
    pub tls_timeout_secs: u64,
    #[serde(default = "default_tls_port")]
    pub tls_port: u16,
    pub whois_timeout_secs: u64,
    pub geo_timeout_secs: u64,
    pub reputation_timeout_secs: u64,
    pub geo_endpoint: String,
    pub reputation_endpoint: String,
}

fn default_tls_port() -> u16 {
    443
}

/// One trained classifier: its artifact, the column schema it was trained
/// against, and the extractor that feeds it.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    pub artifact: String,
    pub schema: String,
    pub features: ExtractorKind,
}

impl AppConfig {
    /// Load configuration from the default path
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(Path::new(CONFIG_PATH))
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.user_agent.is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "http.user_agent".to_string(),
            });
        }
        if self.http.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "http.request_timeout_secs".to_string(),
            });
        }

        for (field, value) in [
            ("signals.dns_timeout_secs", self.signals.dns_timeout_secs),
            ("signals.tls_timeout_secs", self.signals.tls_timeout_secs),
            ("signals.whois_timeout_secs", self.signals.whois_timeout_secs),
            ("signals.geo_timeout_secs", self.signals.geo_timeout_secs),
            (
                "signals.reputation_timeout_secs",
                self.signals.reputation_timeout_secs,
            ),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroTimeout {
                    field: field.to_string(),
                });
            }
        }

        for (field, url) in [
            ("signals.geo_endpoint", &self.signals.geo_endpoint),
            (
                "signals.reputation_endpoint",
                &self.signals.reputation_endpoint,
            ),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidUrl {
                    field: field.to_string(),
                    url: url.clone(),
                });
            }
        }

        if self.models.is_empty() {
            return Err(ConfigError::NoModels);
        }
        for (i, model) in self.models.iter().enumerate() {
            for (name, value) in [
                (format!("models[{}].name", i), &model.name),
                (format!("models[{}].artifact", i), &model.artifact),
                (format!("models[{}].schema", i), &model.schema),
            ] {
                if value.is_empty() {
                    return Err(ConfigError::EmptyRequired { field: name });
                }
            }
        }

        Ok(())
    }

    /// Create default configuration file at the standard location
    pub fn create_default_config() -> Result<PathBuf, ConfigError> {
        let path = Path::new(CONFIG_PATH);

        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::File::create(path)?;
        file.write_all(DEFAULT_CONFIG.as_bytes())?;

        Ok(path.to_path_buf())
    }

    /// Check if stdin is a TTY (interactive terminal)
    pub fn is_interactive() -> bool {
        atty::is(atty::Stream::Stdin)
    }

    /// Prompt user to create default config (only in interactive mode)
    pub fn prompt_create_config() -> Result<Option<PathBuf>, ConfigError> {
        if !Self::is_interactive() {
            return Ok(None);
        }

        print!("Configuration file not found. Create default config? [Y/n] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim().to_lowercase();

        if input.is_empty() || input == "y" || input == "yes" {
            let path = Self::create_default_config()?;
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }
}
