use anyhow::{Context, Result};
use contamscan_core::{DiscoveryOptions, MatchMode};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::OutputFormat;
use crate::paths;

/// Prefix of environment variables overriding configuration values
pub const ENV_PREFIX: &str = "CONTAMSCAN_";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub discovery: DiscoveryOptions,

    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct MatchingConfig {
    #[serde(default)]
    pub mode: MatchMode,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: OutputFormat,
    pub color_enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            color_enabled: true,
        }
    }
}

/// Overrides taken from the command line
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub exclude_patterns: Vec<String>,
    pub exact_match: bool,
    pub format: Option<OutputFormat>,
    pub no_color: bool,
}

impl AppConfig {
    /// Apply CLI argument overrides to the configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        self.discovery
            .exclude_patterns
            .extend(overrides.exclude_patterns);
        if overrides.exact_match {
            self.matching.mode = MatchMode::Exact;
        }
        if let Some(format) = overrides.format {
            self.output.default_format = format;
        }
        if overrides.no_color {
            self.output.color_enabled = false;
        }
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: paths::get_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Load configuration: defaults, then the TOML file, then
    /// `CONTAMSCAN_*` variables (`__` separates section and key)
    ///
    /// CLI flags are applied on top by the caller.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if self.config_path.exists() {
            log::debug!("Loading configuration from {}", self.config_path.display());
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| {
                format!(
                    "Failed to load configuration from {}",
                    self.config_path.display()
                )
            })
    }
}
