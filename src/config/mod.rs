//! Configuration management for tfcop

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::error::{ConfigError, Result};
use crate::models::{DisplayValue, Entity};
use crate::output::RenderOptions;
use crate::output::formatters::{DEFAULT_TIMESTAMP_FORMAT, is_valid_timestamp_format};

/// Terraform Cloud hostname used when none is configured
pub const DEFAULT_HOSTNAME: &str = "app.terraform.io";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Terraform Cloud / Enterprise hostname
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Default organization name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// API token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// strftime format for timestamps in text output
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".tfcop").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an explicit path or the default location.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// file the user pointed at explicitly is an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let resolved = Self::resolve_path(path)?;
        if path.is_none() && !resolved.exists() {
            log::debug!("No config at {}, using defaults", resolved.display());
            return Ok(Self::default());
        }
        Self::load_from(&resolved)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Validate values serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if let Some(hostname) = &self.hostname {
            if hostname.trim().is_empty() {
                return Err(ConfigError::Invalid("hostname must not be empty".to_string()).into());
            }
        }
        if !is_valid_timestamp_format(&self.preferences.timestamp_format) {
            return Err(ConfigError::Invalid(format!(
                "invalid timestamp_format '{}'",
                self.preferences.timestamp_format
            ))
            .into());
        }
        Ok(())
    }

    /// Hostname, falling back to Terraform Cloud
    pub fn hostname(&self) -> &str {
        self.hostname.as_deref().unwrap_or(DEFAULT_HOSTNAME)
    }

    /// Render settings derived from preferences
    pub fn render_options(&self, color: bool) -> RenderOptions {
        RenderOptions {
            timestamp_format: self.preferences.timestamp_format.clone(),
            color,
        }
    }

    /// Key-value view of the effective configuration. The token is redacted.
    pub fn to_entity(&self, path: &Path, format: OutputFormat) -> Entity {
        let mut entity = Entity::new()
            .with("Config File", path.display().to_string())
            .with("Hostname", self.hostname())
            .with("Organization", self.organization.clone());
        if self.token.is_some() {
            entity.insert("Token", DisplayValue::Redacted);
        }
        entity
            .with("Format", format.to_string())
            .with("Timestamp Format", self.preferences.timestamp_format.as_str())
    }
}
