//! Configuration loading and merging logic
//!
//! Precedence order (highest to lowest):
//! 1. Environment variable overrides
//! 2. Root config file
//! 3. Built-in defaults

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Override for the kubectl binary
pub const ENV_KUBECTL: &str = "KUBESCRIBE_KUBECTL";
/// Override for the default operation timeout, in seconds
pub const ENV_TIMEOUT_SECONDS: &str = "KUBESCRIBE_TIMEOUT_SECONDS";
/// Override for the log retrieval timeout, in seconds
pub const ENV_LOGS_TIMEOUT_SECONDS: &str = "KUBESCRIBE_LOGS_TIMEOUT_SECONDS";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    pub fn load() -> Result<Config> {
        let root_path = paths::root_config_path();
        let config = if root_path.exists() {
            Self::load_file(&root_path)?
        } else {
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config, |key| std::env::var(key).ok()))
    }

    /// Load configuration from a file; missing keys fall back to defaults
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(config: &Config) -> Result<()> {
        if config.kubectl.trim().is_empty() {
            anyhow::bail!("kubectl must not be empty");
        }
        if config.timeouts.default_seconds == 0 {
            anyhow::bail!("timeouts.defaultSeconds must be greater than 0");
        }
        if config.timeouts.logs_seconds == 0 {
            anyhow::bail!("timeouts.logsSeconds must be greater than 0");
        }
        if config.transcript.capacity == 0 {
            anyhow::bail!("transcript.capacity must be greater than 0");
        }
        if config.logs.default_tail == 0 {
            anyhow::bail!("logs.defaultTail must be greater than 0");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// Unparseable numeric overrides are ignored with a warning.
    pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(kubectl) = lookup(ENV_KUBECTL).filter(|v| !v.is_empty()) {
            config.kubectl = kubectl;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECONDS) {
            match raw.parse() {
                Ok(secs) => config.timeouts.default_seconds = secs,
                Err(_) => tracing::warn!("Ignoring {}={}: not a number", ENV_TIMEOUT_SECONDS, raw),
            }
        }

        if let Some(raw) = lookup(ENV_LOGS_TIMEOUT_SECONDS) {
            match raw.parse() {
                Ok(secs) => config.timeouts.logs_seconds = secs,
                Err(_) => tracing::warn!(
                    "Ignoring {}={}: not a number",
                    ENV_LOGS_TIMEOUT_SECONDS,
                    raw
                ),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}
