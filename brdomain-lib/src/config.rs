//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and the
//! `BRDOMAIN_*` environment variables, and merging them with proper
//! precedence rules.

use crate::error::DomainCheckError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "BRDOMAIN_CONFIG";
/// Environment variable overriding the request timeout.
pub const ENV_TIMEOUT: &str = "BRDOMAIN_TIMEOUT";
/// Environment variable overriding the lookup endpoint.
pub const ENV_ENDPOINT: &str = "BRDOMAIN_ENDPOINT";

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DefaultsConfig {
    /// Request timeout (as string, e.g., "5s", "30s", "1m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Lookup endpoint base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Configuration discovery and loading functionality.
#[derive(Debug, Default)]
pub struct ConfigManager {
    /// Directory searched for local config files; the working directory when unset
    local_dir: Option<PathBuf>,
    /// Home directory override; `$HOME` when unset
    home_dir: Option<PathBuf>,
}

impl ConfigManager {
    /// Create a new configuration manager using the process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `dir` instead of the working directory for local config files.
    pub fn with_local_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.local_dir = Some(dir.into());
        self
    }

    /// Use `dir` instead of `$HOME` for global and XDG fallback lookups.
    pub fn with_home_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// `FileError` when the file is missing or unreadable, `ConfigError` when
    /// it is not valid TOML or holds invalid values.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DomainCheckError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainCheckError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainCheckError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content)?;

        self.validate_config(&config)?;

        debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Files that exist but fail to load are skipped with a warning.
    pub fn discover_and_load(&self) -> FileConfig {
        let mut merged_config = FileConfig::default();

        // XDG (lowest), then global, then local (highest)
        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        for path in candidates.into_iter().flatten() {
            match self.load_file(&path) {
                Ok(config) => merged_config = merge_configs(merged_config, config),
                Err(e) => warn!(path = %path.display(), error = %e, "ignoring configuration file"),
            }
        }

        merged_config
    }

    /// Get the local configuration file path.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let dir = self.local_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        ["brdomain.toml", ".brdomain.toml"]
            .iter()
            .map(|candidate| dir.join(candidate))
            .find(|path| path.exists())
    }

    /// Get the global configuration file path in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = self.home()?;
        [".brdomain.toml", "brdomain.toml"]
            .iter()
            .map(|candidate| home.join(candidate))
            .find(|path| path.exists())
    }

    /// Get the XDG configuration file path.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = match (&self.home_dir, env::var_os("XDG_CONFIG_HOME")) {
            (None, Some(xdg)) => PathBuf::from(xdg),
            _ => self.home()?.join(".config"),
        };

        let path = config_dir.join("brdomain").join("config.toml");
        path.exists().then_some(path)
    }

    fn home(&self) -> Option<PathBuf> {
        self.home_dir
            .clone()
            .or_else(|| env::var_os("HOME").map(PathBuf::from))
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), DomainCheckError> {
        if let Some(defaults) = &config.defaults {
            if let Some(timeout_str) = &defaults.timeout {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(DomainCheckError::config(format!(
                        "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
                        timeout_str
                    )));
                }
            }

            if let Some(endpoint) = &defaults.endpoint {
                validate_endpoint(endpoint)?;
            }
        }

        Ok(())
    }
}

/// Merge two configurations; values from `higher` win.
pub fn merge_configs(lower: FileConfig, higher: FileConfig) -> FileConfig {
    FileConfig {
        defaults: match (lower.defaults, higher.defaults) {
            (Some(mut lower_defaults), Some(higher_defaults)) => {
                if higher_defaults.timeout.is_some() {
                    lower_defaults.timeout = higher_defaults.timeout;
                }
                if higher_defaults.endpoint.is_some() {
                    lower_defaults.endpoint = higher_defaults.endpoint;
                }
                Some(lower_defaults)
            }
            (None, Some(higher_defaults)) => Some(higher_defaults),
            (Some(lower_defaults), None) => Some(lower_defaults),
            (None, None) => None,
        },
    }
}

/// Configuration values read from `BRDOMAIN_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub timeout: Option<String>,
    pub endpoint: Option<String>,
    pub config: Option<String>,
}

/// Load configuration from environment variables.
///
/// Invalid values are logged as warnings and ignored.
pub fn load_env_config() -> EnvConfig {
    env_config_from(|key| env::var(key).ok())
}

/// Build an [`EnvConfig`] from any variable source.
pub fn env_config_from<F>(lookup: F) -> EnvConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_config = EnvConfig::default();

    if let Some(timeout_str) = lookup(ENV_TIMEOUT) {
        if parse_timeout_string(&timeout_str).is_some() {
            debug!("using {}={}", ENV_TIMEOUT, timeout_str);
            env_config.timeout = Some(timeout_str);
        } else {
            warn!(
                "invalid {}='{}', use format like '5s', '30s', '2m'",
                ENV_TIMEOUT, timeout_str
            );
        }
    }

    if let Some(endpoint) = lookup(ENV_ENDPOINT) {
        match validate_endpoint(&endpoint) {
            Ok(()) => {
                debug!("using {}={}", ENV_ENDPOINT, endpoint);
                env_config.endpoint = Some(endpoint);
            }
            Err(e) => warn!("ignoring {}: {}", ENV_ENDPOINT, e),
        }
    }

    if let Some(config_path) = lookup(ENV_CONFIG) {
        if !config_path.trim().is_empty() {
            debug!("using {}={}", ENV_CONFIG, config_path);
            env_config.config = Some(config_path);
        }
    }

    env_config
}

/// Check that an endpoint is an http(s) URL.
pub fn validate_endpoint(endpoint: &str) -> Result<(), DomainCheckError> {
    let endpoint = endpoint.trim();
    let has_host = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());

    if has_host {
        Ok(())
    } else {
        Err(DomainCheckError::config(format!(
            "Invalid endpoint '{}'. Use an http:// or https:// URL",
            endpoint
        )))
    }
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
///
/// A bare number is taken as seconds. Zero is rejected.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    let secs = if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.parse::<u64>().ok()
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.parse::<u64>().ok().and_then(|m| m.checked_mul(60))
    } else {
        timeout_str.parse::<u64>().ok()
    }?;

    (secs > 0).then_some(secs)
}
