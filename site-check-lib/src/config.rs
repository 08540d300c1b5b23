//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and environment
//! variables, and merging configurations with proper precedence rules.

use crate::error::SiteCheckError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration loaded from TOML files.
///
/// This represents the structure of configuration files that users can create
/// to set default values for checking runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Output formatting preferences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default concurrency level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Default per-probe timeout (as string, e.g., "5s", "30s")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Default overall deadline for a whole run (e.g., "30s", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,

    /// Default pretty output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,

    /// Whether the HTTP probe tries HEAD before GET
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_first: Option<bool>,

    /// Redirect-follow limit for the HTTP probe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_limit: Option<usize>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Default output format ("text", "json")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Pretty-print JSON by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_pretty: Option<bool>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// The parsed configuration or an error if parsing fails.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, SiteCheckError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SiteCheckError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            SiteCheckError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            SiteCheckError::config(format!("Failed to parse TOML configuration: {}", e))
        })?;

        // Validate the loaded configuration
        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Looks for configuration files in standard locations and merges them
    /// according to precedence rules.
    ///
    /// # Returns
    ///
    /// Merged configuration from all discovered files.
    pub fn discover_and_load(&self) -> Result<FileConfig, SiteCheckError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        // 1. Load XDG config (lowest precedence)
        if let Some(xdg_path) = self.get_xdg_config_path() {
            if let Ok(config) = self.load_file(&xdg_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(xdg_path);
            }
        }

        // 2. Load home-directory config
        if let Some(global_path) = self.get_global_config_path() {
            if let Ok(config) = self.load_file(&global_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(global_path);
            }
        }

        // 3. Load local config (highest precedence)
        if let Some(local_path) = self.get_local_config_path() {
            if let Ok(config) = self.load_file(&local_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(local_path);
            }
        }

        if self.verbose && loaded_files.len() > 1 {
            tracing::info!(
                files = ?loaded_files,
                "multiple config files found, later entries take precedence"
            );
        }

        Ok(merged_config)
    }

    /// Get the local configuration file path.
    ///
    /// Looks for configuration files in the current directory.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./site-check.toml", "./.site-check.toml"];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Some(path.to_path_buf());
            }
        }

        None
    }

    /// Get the home-directory configuration file path.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        if let Some(home) = env::var_os("HOME") {
            let candidates = [".site-check.toml", "site-check.toml"];

            for candidate in &candidates {
                let path = Path::new(&home).join(candidate);
                if path.exists() {
                    return Some(path);
                }
            }
        }

        None
    }

    /// Get the XDG configuration file path.
    ///
    /// Follows the XDG Base Directory Specification.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("site-check").join("config.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Merge two configurations with proper precedence.
    ///
    /// Values from `higher` take precedence over values from `lower`.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(mut lower_defaults), Some(higher_defaults)) => {
                    if higher_defaults.concurrency.is_some() {
                        lower_defaults.concurrency = higher_defaults.concurrency;
                    }
                    if higher_defaults.timeout.is_some() {
                        lower_defaults.timeout = higher_defaults.timeout;
                    }
                    if higher_defaults.deadline.is_some() {
                        lower_defaults.deadline = higher_defaults.deadline;
                    }
                    if higher_defaults.pretty.is_some() {
                        lower_defaults.pretty = higher_defaults.pretty;
                    }
                    if higher_defaults.head_first.is_some() {
                        lower_defaults.head_first = higher_defaults.head_first;
                    }
                    if higher_defaults.redirect_limit.is_some() {
                        lower_defaults.redirect_limit = higher_defaults.redirect_limit;
                    }
                    Some(lower_defaults)
                }
                (None, Some(higher_defaults)) => Some(higher_defaults),
                (Some(lower_defaults), None) => Some(lower_defaults),
                (None, None) => None,
            },
            output: higher.output.or(lower.output),
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), SiteCheckError> {
        if let Some(defaults) = &config.defaults {
            // Validate concurrency
            if let Some(concurrency) = defaults.concurrency {
                if concurrency == 0 || concurrency > 100 {
                    return Err(SiteCheckError::config(
                        "Concurrency must be between 1 and 100",
                    ));
                }
            }

            // Validate timeout and deadline formats
            for (name, value) in [("timeout", &defaults.timeout), ("deadline", &defaults.deadline)]
            {
                if let Some(raw) = value {
                    if parse_timeout_string(raw).is_none() {
                        return Err(SiteCheckError::config(format!(
                            "Invalid {} format '{}'. Use format like '5s', '30s', '2m'",
                            name, raw
                        )));
                    }
                }
            }
        }

        if let Some(output) = &config.output {
            if let Some(format) = &output.default_format {
                if !matches!(format.as_str(), "text" | "json") {
                    return Err(SiteCheckError::config(format!(
                        "Unknown output format '{}', expected 'text' or 'json'",
                        format
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Environment variable configuration that mirrors CLI options.
///
/// This represents configuration values that can be set via SC_* environment
/// variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub concurrency: Option<usize>,
    pub timeout: Option<String>,
    pub deadline: Option<String>,
    pub pretty: Option<bool>,
    pub json: Option<bool>,
    pub file: Option<String>,
    pub config: Option<String>,
}

/// Load configuration from environment variables.
///
/// Parses all SC_* environment variables and returns a structured
/// configuration. Invalid values are logged as warnings and ignored.
pub fn load_env_config() -> EnvConfig {
    let mut env_config = EnvConfig::default();

    // SC_CONCURRENCY - concurrent probes
    if let Ok(val) = env::var("SC_CONCURRENCY") {
        match val.parse::<usize>() {
            Ok(concurrency) if concurrency > 0 && concurrency <= 100 => {
                tracing::debug!(concurrency, "using SC_CONCURRENCY");
                env_config.concurrency = Some(concurrency);
            }
            _ => {
                tracing::warn!(value = %val, "invalid SC_CONCURRENCY, must be 1-100");
            }
        }
    }

    // SC_TIMEOUT - per-probe timeout
    if let Ok(val) = env::var("SC_TIMEOUT") {
        if parse_timeout_string(&val).is_some() {
            tracing::debug!(timeout = %val, "using SC_TIMEOUT");
            env_config.timeout = Some(val);
        } else {
            tracing::warn!(value = %val, "invalid SC_TIMEOUT, use format like '5s', '2m'");
        }
    }

    // SC_DEADLINE - overall run deadline
    if let Ok(val) = env::var("SC_DEADLINE") {
        if parse_timeout_string(&val).is_some() {
            tracing::debug!(deadline = %val, "using SC_DEADLINE");
            env_config.deadline = Some(val);
        } else {
            tracing::warn!(value = %val, "invalid SC_DEADLINE, use format like '30s', '2m'");
        }
    }

    // SC_PRETTY - enable pretty output
    if let Ok(val) = env::var("SC_PRETTY") {
        match parse_bool_string(&val) {
            Some(pretty) => {
                tracing::debug!(pretty, "using SC_PRETTY");
                env_config.pretty = Some(pretty);
            }
            None => {
                tracing::warn!(value = %val, "invalid SC_PRETTY, use true/false");
            }
        }
    }

    // SC_JSON - enable JSON output
    if let Ok(val) = env::var("SC_JSON") {
        match parse_bool_string(&val) {
            Some(json) => {
                tracing::debug!(json, "using SC_JSON");
                env_config.json = Some(json);
            }
            None => {
                tracing::warn!(value = %val, "invalid SC_JSON, use true/false");
            }
        }
    }

    // SC_FILE - default URL list file
    if let Ok(file_path) = env::var("SC_FILE") {
        if !file_path.trim().is_empty() {
            tracing::debug!(file = %file_path, "using SC_FILE");
            env_config.file = Some(file_path);
        }
    }

    // SC_CONFIG - default config file
    if let Ok(config_path) = env::var("SC_CONFIG") {
        if !config_path.trim().is_empty() {
            tracing::debug!(config = %config_path, "using SC_CONFIG");
            env_config.config = Some(config_path);
        }
    }

    env_config
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
///
/// # Returns
///
/// Number of seconds, or None if parsing fails.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if timeout_str.ends_with('s') {
        timeout_str
            .strip_suffix('s')
            .and_then(|s| s.parse::<u64>().ok())
    } else if timeout_str.ends_with('m') {
        timeout_str
            .strip_suffix('m')
            .and_then(|s| s.parse::<u64>().ok())
            .map(|m| m * 60)
    } else {
        // Assume seconds if no unit
        timeout_str.parse::<u64>().ok()
    }
}

fn parse_bool_string(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
